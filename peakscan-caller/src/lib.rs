//! Window scanning peak caller for genome-wide depth tracks.
//!
//! The genome is tiled into fixed-width windows, a background distribution of
//! window depths is sampled at random, and every window is then scored with an
//! empirical p-value against that background:
//!
//! - [`tiling`]: windows and the flat, genome-wide window index
//! - [`background`]: Monte-Carlo background with the upper tail trimmed
//! - [`pvalue`]: empirical upper-tail p-values
//! - [`scan`]: the end-to-end pipeline, streaming one row per window
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use peakscan_caller::{ScanConfig, run_scan};
//!
//! let config = ScanConfig { seed: Some(42), ..Default::default() };
//! let summary = run_scan(&config, Path::new("sample.bedGraph"), Path::new("hg38.chrom.sizes")).unwrap();
//! println!("{} windows scanned", summary.windows_scanned);
//! ```
//!
//! Adjacent significant windows are not merged into peaks, and `fdr_cutoff`
//! is carried in the configuration without filtering anything.

pub mod background;
pub mod config;
pub mod consts;
pub mod errors;
pub mod pvalue;
pub mod scan;
pub mod tiling;

// re-exports
pub use background::{BackgroundDistribution, build_background};
pub use config::ScanConfig;
pub use errors::{PeakCallError, PeakCallResult};
pub use pvalue::p_value;
pub use scan::{PeakScanner, ScanResult, ScanSummary, run_background, run_scan};
pub use tiling::TilingPlan;
