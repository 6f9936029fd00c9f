use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::errors::{PeakCallError, PeakCallResult};

/// Run configuration for a scan.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// window_size = 500
/// peak_frac = 0.1
/// seed = 42
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Width of each scanning window in bases.
    pub window_size: u32,
    /// Number of windows drawn for the background distribution.
    pub sample_size: usize,
    /// Accepted for compatibility; not used to filter the output.
    pub fdr_cutoff: f64,
    /// Expected fraction of the genome under true signal. Inflates the
    /// number of background draws and trims the background's upper tail.
    pub peak_frac: f64,
    /// Bases excluded at the start of every chromosome.
    pub trim5: u32,
    /// Bases excluded at the end of every chromosome.
    pub trim3: u32,
    /// Seed for background sampling; a random seed is drawn and logged if unset.
    pub seed: Option<u64>,
    /// Optional cap on the number of depth-track rows read.
    pub max_rows: Option<usize>,
    /// Leading lines of the depth track to skip.
    pub header_lines: usize,
    /// Worker threads for the exhaustive scan; 1 scans sequentially.
    pub threads: usize,
    /// Destination of the scan table; stdout when unset.
    pub out_file: Option<PathBuf>,
    /// Destination of the trimmed background values.
    pub background_file: Option<PathBuf>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            window_size: DEFAULT_WINDOW_SIZE,
            sample_size: DEFAULT_SAMPLE_SIZE,
            fdr_cutoff: DEFAULT_FDR_CUTOFF,
            peak_frac: DEFAULT_PEAK_FRAC,
            trim5: DEFAULT_TRIM,
            trim3: DEFAULT_TRIM,
            seed: None,
            max_rows: None,
            header_lines: DEFAULT_HEADER_LINES,
            threads: DEFAULT_THREADS,
            out_file: None,
            background_file: None,
        }
    }
}

impl ScanConfig {
    ///
    /// Check the configuration before any input is touched.
    ///
    /// # Returns
    /// `PeakCallError::Config` naming the first offending option
    pub fn validate(&self) -> PeakCallResult<()> {
        if self.window_size == 0 {
            return Err(PeakCallError::Config(
                "window_size must be a positive integer".to_string(),
            ));
        }
        if self.sample_size == 0 {
            return Err(PeakCallError::Config(
                "sample_size must be a positive integer".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.peak_frac) {
            return Err(PeakCallError::Config(format!(
                "peak_frac should be in [0,1], got {}",
                self.peak_frac
            )));
        }
        if self.threads == 0 {
            return Err(PeakCallError::Config(
                "threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Where the background values are written: the configured path, or
    /// `bg-depth.<pid>.csv` in the working directory.
    pub fn background_path(&self) -> PathBuf {
        self.background_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("bg-depth.{}.csv", std::process::id())))
    }
}

impl TryFrom<&Path> for ScanConfig {
    type Error = PeakCallError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}
