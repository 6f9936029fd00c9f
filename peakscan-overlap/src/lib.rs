//! Overlap queries between genome windows and depth-track blocks.
//!
//! The central structure is [`SortedBlockIndex`]: depth blocks grouped per
//! chromosome into parallel start/end/depth arrays, so that the blocks
//! touching a window are found with two binary searches instead of a scan of
//! the whole chromosome. The index reduces those blocks to a single
//! length-weighted average depth.
//!
//! ## Quick Start
//!
//! ```rust
//! use peakscan_core::models::DepthBlock;
//! use peakscan_overlap::{DepthQuery, SortedBlockIndex};
//!
//! let blocks = vec![
//!     DepthBlock { chr: "chr1".to_string(), start: 0, end: 100, depth: 5.0 },
//!     DepthBlock { chr: "chr1".to_string(), start: 100, end: 200, depth: 50.0 },
//! ];
//! let index = SortedBlockIndex::build(blocks);
//!
//! assert_eq!(index.average_depth("chr1", 0, 100), Some(5.0));
//! assert_eq!(index.average_depth("chr1", 50, 150), Some(27.5));
//! assert_eq!(index.average_depth("chr2", 0, 100), None);
//! ```
//!
//! All overlap arithmetic lives here; the caller crate only asks for
//! average depths through the [`DepthQuery`] trait.

/// Per-chromosome sorted block index.
///
/// See [`SortedBlockIndex`] for details.
pub mod block_index;

/// Pairwise overlap of two spans.
pub mod overlap;

/// Core traits for overlap operations.
pub mod traits;

// re-exports
pub use self::block_index::SortedBlockIndex;
pub use self::overlap::{Overlap, overlap, overlap_len};
pub use self::traits::{DepthQuery, Span};
