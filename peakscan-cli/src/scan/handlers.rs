use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;

use peakscan_caller::ScanConfig;

///
/// Resolve the run configuration: the `--config` file (or defaults), then any
/// option given on the command line on top.
pub fn config_from_matches(matches: &ArgMatches) -> Result<ScanConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => ScanConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to load config file {path}"))?,
        None => ScanConfig::default(),
    };

    if let Some(v) = matches.get_one::<u32>("window") {
        config.window_size = *v;
    }
    if let Some(v) = matches.get_one::<usize>("sample-size") {
        config.sample_size = *v;
    }
    if let Some(v) = matches.get_one::<f64>("peak-frac") {
        config.peak_frac = *v;
    }
    if let Some(v) = matches.get_one::<u32>("trim5") {
        config.trim5 = *v;
    }
    if let Some(v) = matches.get_one::<u32>("trim3") {
        config.trim3 = *v;
    }
    if let Some(v) = matches.get_one::<u64>("seed") {
        config.seed = Some(*v);
    }
    if let Some(v) = matches.get_one::<usize>("max-rows") {
        config.max_rows = Some(*v);
    }
    if let Some(v) = matches.get_one::<usize>("header-lines") {
        config.header_lines = *v;
    }
    if let Some(v) = matches.get_one::<String>("background-out") {
        config.background_file = Some(PathBuf::from(v));
    }

    // scan only
    if let Ok(Some(v)) = matches.try_get_one::<f64>("fdr") {
        config.fdr_cutoff = *v;
    }
    if let Ok(Some(v)) = matches.try_get_one::<usize>("threads") {
        config.threads = *v;
    }
    if let Ok(Some(v)) = matches.try_get_one::<String>("outfile") {
        config.out_file = Some(PathBuf::from(v));
    }

    Ok(config)
}

fn input_paths(matches: &ArgMatches) -> Result<(&Path, &Path)> {
    let depth = matches
        .get_one::<String>("depth")
        .context("A path to a depth track is required.")?;
    let sizes = matches
        .get_one::<String>("chrom-sizes")
        .context("A path to a chromosome sizes file is required.")?;
    Ok((Path::new(depth), Path::new(sizes)))
}

pub fn run_scan(matches: &ArgMatches) -> Result<()> {
    let config = config_from_matches(matches)?;
    let (depth, sizes) = input_paths(matches)?;

    let summary = peakscan_caller::run_scan(&config, depth, sizes)
        .with_context(|| format!("Scan of {} failed", depth.display()))?;

    log::info!(
        "Scanned {} windows, {} with depth data",
        summary.windows_scanned,
        summary.windows_with_depth
    );
    log::info!(
        "Background: {} values at or below {}",
        summary.background_size,
        summary.background_cutoff
    );
    if let Some(seed) = summary.seed {
        log::info!("Rerun with --seed {seed} to reproduce this background");
    }
    if !summary.skipped_chromosomes.is_empty() {
        log::info!(
            "Too short to tile: {}",
            summary.skipped_chromosomes.join(", ")
        );
    }

    Ok(())
}

pub fn run_background(matches: &ArgMatches) -> Result<()> {
    let config = config_from_matches(matches)?;
    let (depth, sizes) = input_paths(matches)?;

    let background = peakscan_caller::run_background(&config, depth, sizes)
        .with_context(|| format!("Background estimation from {} failed", depth.display()))?;

    log::info!(
        "Wrote {} background values to {}",
        background.len(),
        config.background_path().display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::scan::cli::{create_background_cli, create_scan_cli};

    fn scan_matches(args: &[&str]) -> ArgMatches {
        let argv = ["scan"].iter().chain(args.iter());
        create_scan_cli().try_get_matches_from(argv).unwrap()
    }

    #[rstest]
    fn test_defaults_without_flags() {
        let matches = scan_matches(&["depth.bg", "chrom.sizes"]);
        let config = config_from_matches(&matches).unwrap();
        assert_eq!(config, ScanConfig::default());
    }

    #[rstest]
    fn test_flags_override_defaults() {
        let matches = scan_matches(&[
            "depth.bg",
            "chrom.sizes",
            "-w",
            "500",
            "-n",
            "200",
            "-q",
            "0.05",
            "--peak-frac",
            "0.1",
            "--trim5",
            "0",
            "--trim3",
            "25",
            "--seed",
            "7",
            "-t",
            "4",
            "-o",
            "out.tsv",
        ]);
        let config = config_from_matches(&matches).unwrap();

        assert_eq!(config.window_size, 500);
        assert_eq!(config.sample_size, 200);
        assert_eq!(config.fdr_cutoff, 0.05);
        assert_eq!(config.peak_frac, 0.1);
        assert_eq!(config.trim5, 0);
        assert_eq!(config.trim3, 25);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.threads, 4);
        assert_eq!(config.out_file, Some(PathBuf::from("out.tsv")));
    }

    #[rstest]
    fn test_flags_override_config_file() {
        let mut file = tempfile_with("window_size = 100\nseed = 3\ntrim5 = 0\n");
        file.flush().unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let matches = scan_matches(&["depth.bg", "chrom.sizes", "-c", &path, "-w", "250"]);
        let config = config_from_matches(&matches).unwrap();

        assert_eq!(config.window_size, 250);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.trim5, 0);
        assert_eq!(config.trim3, ScanConfig::default().trim3);
    }

    #[rstest]
    fn test_bad_config_file_is_reported() {
        let matches = scan_matches(&["depth.bg", "chrom.sizes", "-c", "no/such/config.toml"]);
        let err = config_from_matches(&matches).unwrap_err();
        assert_eq!(format!("{err}").contains("no/such/config.toml"), true);
    }

    #[rstest]
    fn test_background_command_has_no_scan_options() {
        let matches = create_background_cli()
            .try_get_matches_from(["background", "depth.bg", "chrom.sizes", "--seed", "9"])
            .unwrap();
        let config = config_from_matches(&matches).unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.out_file, None);

        let rejected = create_background_cli().try_get_matches_from([
            "background",
            "depth.bg",
            "chrom.sizes",
            "-o",
            "out.tsv",
        ]);
        assert_eq!(rejected.is_err(), true);
    }

    #[rstest]
    #[case("-w", "0")]
    #[case("-w", "-5")]
    #[case("--seed", "abc")]
    fn test_unparsable_values_rejected(#[case] flag: &str, #[case] value: &str) {
        let result = create_scan_cli().try_get_matches_from([
            "scan",
            "depth.bg",
            "chrom.sizes",
            flag,
            value,
        ]);
        // 0 parses; validation of the value happens in the library
        assert_eq!(result.is_err(), value != "0");
    }

    fn tempfile_with(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }
}
