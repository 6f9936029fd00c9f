use clap::{Arg, ArgAction, Command, arg, value_parser};

pub const SCAN_CMD: &str = "scan";
pub const BACKGROUND_CMD: &str = "background";

/// Inputs and options shared by `scan` and `background`.
fn with_scan_args(cmd: Command) -> Command {
    cmd.arg_required_else_help(true)
        .arg(
            Arg::new("depth")
                .required(true)
                .help("Read depth as bedGraph (chrom, start, end, depth), sorted by coordinate"),
        )
        .arg(
            Arg::new("chrom-sizes")
                .required(true)
                .help("Chromosome sizes ('chr<tab>size'); chromosomes in both inputs are scanned"),
        )
        .arg(
            arg!(-c --config <CONFIG>)
                .required(false)
                .help("TOML file with scan options; command-line flags take precedence"),
        )
        .arg(
            arg!(-w --window <WINDOW>)
                .required(false)
                .value_parser(value_parser!(u32))
                .help("Size of the window used for scanning candidate regions [300]"),
        )
        .arg(
            arg!(-n --"sample-size" <N>)
                .required(false)
                .value_parser(value_parser!(usize))
                .help("Regions sampled to estimate the background [10000]"),
        )
        .arg(
            arg!(--"peak-frac" <FRAC>)
                .required(false)
                .value_parser(value_parser!(f64))
                .help("Expected genome fraction in peaks; trims top background depths [0.05]"),
        )
        .arg(
            arg!(--trim5 <BASES>)
                .required(false)
                .value_parser(value_parser!(u32))
                .help("Bases excluded at the start of each chromosome [10000]"),
        )
        .arg(
            arg!(--trim3 <BASES>)
                .required(false)
                .value_parser(value_parser!(u32))
                .help("Bases excluded at the end of each chromosome [10000]"),
        )
        .arg(
            arg!(--seed <SEED>)
                .required(false)
                .value_parser(value_parser!(u64))
                .help("Seed for background sampling [random, logged]"),
        )
        .arg(
            arg!(--"max-rows" <ROWS>)
                .required(false)
                .value_parser(value_parser!(usize))
                .help("Read at most this many rows of the depth file [all]"),
        )
        .arg(
            arg!(--"header-lines" <LINES>)
                .required(false)
                .value_parser(value_parser!(usize))
                .help("Leading lines of the depth file to skip [1]"),
        )
        .arg(
            arg!(--"background-out" <FILE>)
                .required(false)
                .help("Where to write the trimmed background depths [bg-depth.<pid>.csv]"),
        )
}

pub fn create_scan_cli() -> Command {
    with_scan_args(
        Command::new(SCAN_CMD)
            .about("Scan genome windows and compute empirical p-values of their mean depth."),
    )
    .arg(
        arg!(-q --fdr <FDR>)
            .required(false)
            .value_parser(value_parser!(f64))
            .help("False discovery rate for identified peaks; recorded but not applied [0.01]"),
    )
    .arg(
        arg!(-t --threads <THREADS>)
            .required(false)
            .value_parser(value_parser!(usize))
            .help("Number of threads for the window scan [1]"),
    )
    .arg(
        arg!(-o --outfile <FILE>)
            .required(false)
            .help("Output filename [stdout]"),
    )
}

pub fn create_background_cli() -> Command {
    with_scan_args(
        Command::new(BACKGROUND_CMD)
            .about("Only sample the background depth distribution and write it to file."),
    )
}

pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .global(true)
        .action(ArgAction::Count)
        .help("Increase logging verbosity (-v debug, -vv trace)")
}
