//! Core models and readers for peakscan.
//!
//! This crate holds the input side of the peak caller: the depth track (a
//! bedGraph-like file of constant-depth blocks) and the chromosome size table
//! that bounds genome tiling. Both are loaded once and treated as immutable
//! for the rest of a run.
//!
//! ```no_run
//! use std::path::Path;
//! use peakscan_core::models::{ChromSizes, DepthTrack};
//!
//! let track = DepthTrack::from_path(Path::new("sample.bedGraph"), 1, None).unwrap();
//! let mut sizes = ChromSizes::try_from(Path::new("hg38.chrom.sizes")).unwrap();
//! sizes.retain_present(&track.chromosomes());
//! ```
pub mod errors;
pub mod models;
pub mod utils;

pub use errors::InputError;
