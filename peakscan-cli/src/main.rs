mod scan;

use anyhow::Result;
use clap::{ArgMatches, Command};
use log::LevelFilter;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "peakscan";
    pub const BIN_NAME: &str = "peakscan";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Score genome windows of read depth against an empirical background.")
        .subcommand_required(true)
        .arg(scan::cli::verbose_arg())
        .subcommand(scan::cli::create_scan_cli())
        .subcommand(scan::cli::create_background_cli())
}

fn init_logger(matches: &ArgMatches) {
    let level = match matches.get_count("verbose") {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    pretty_env_logger::formatted_builder()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();
    init_logger(&matches);

    match matches.subcommand() {
        //
        // SCAN
        //
        Some((scan::cli::SCAN_CMD, matches)) => {
            scan::handlers::run_scan(matches)?;
        }

        //
        // BACKGROUND ONLY
        //
        Some((scan::cli::BACKGROUND_CMD, matches)) => {
            scan::handlers::run_background(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    log::info!("Job is done!!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_parser_is_consistent() {
        build_parser().debug_assert();
    }

    #[test]
    fn test_subcommand_is_required() {
        let result = build_parser().try_get_matches_from(["peakscan"]);
        assert_eq!(result.is_err(), true);
    }

    #[test]
    fn test_verbose_is_global() {
        let matches = build_parser()
            .try_get_matches_from(["peakscan", "scan", "-vv", "depth.bg", "chrom.sizes"])
            .unwrap();
        assert_eq!(matches.get_count("verbose"), 2);
    }
}
