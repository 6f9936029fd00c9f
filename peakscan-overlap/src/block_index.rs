use std::collections::HashMap;

use peakscan_core::models::{DepthBlock, DepthTrack};

use crate::overlap::interval_overlap;
use crate::traits::DepthQuery;

/// The blocks of one chromosome as parallel, input-ordered arrays.
#[derive(Debug, Clone, Default)]
struct ChromBlocks {
    starts: Vec<u32>,
    ends: Vec<u32>,
    depths: Vec<f64>,
}

impl ChromBlocks {
    fn len(&self) -> usize {
        self.starts.len()
    }

    fn push(&mut self, block: &DepthBlock) {
        self.starts.push(block.start);
        self.ends.push(block.end);
        self.depths.push(block.depth);
    }
}

/// An index over depth blocks that answers window queries with binary search.
///
/// Blocks are grouped per chromosome. Within a chromosome they must already be
/// sorted by start and must not nest, which is the case for any bedGraph
/// written in coordinate order: then both the start and the end arrays are
/// sorted and the blocks touching a window form one contiguous slice. This
/// precondition is not checked; an unsorted track silently gives wrong
/// averages.
///
/// # Examples
///
/// ```
/// use peakscan_core::models::DepthBlock;
/// use peakscan_overlap::{DepthQuery, SortedBlockIndex};
///
/// let index = SortedBlockIndex::build(vec![
///     DepthBlock { chr: "chr1".to_string(), start: 0, end: 300, depth: 4.0 },
/// ]);
/// assert_eq!(index.average_depth("chr1", 0, 300), Some(4.0));
/// // half of the window has no block at all
/// assert_eq!(index.average_depth("chr1", 150, 450), Some(2.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SortedBlockIndex {
    chroms: HashMap<String, ChromBlocks>,
}

impl SortedBlockIndex {
    /// Group `blocks` by chromosome, keeping their order within each chromosome.
    pub fn build(blocks: Vec<DepthBlock>) -> Self {
        let mut chroms: HashMap<String, ChromBlocks> = HashMap::new();
        for block in blocks.iter() {
            match chroms.get_mut(&block.chr) {
                Some(chrom_blocks) => chrom_blocks.push(block),
                None => {
                    let mut chrom_blocks = ChromBlocks::default();
                    chrom_blocks.push(block);
                    chroms.insert(block.chr.clone(), chrom_blocks);
                }
            }
        }
        SortedBlockIndex { chroms }
    }

    /// Total number of indexed blocks.
    pub fn len(&self) -> usize {
        self.chroms.values().map(|c| c.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.chroms.is_empty()
    }

    ///
    /// The range of block positions on one chromosome that can touch
    /// `[start, end)`.
    ///
    /// The lower bound is the first block starting at or after `start`, moved
    /// back by one so a block that begins before the window and runs into it
    /// is included. The upper bound is one past the first block ending at or
    /// after `end`. Blocks inside the range may still miss the window (gaps in
    /// the track), so callers weigh each one by its real overlap.
    fn candidates(blocks: &ChromBlocks, start: u32, end: u32) -> std::ops::Range<usize> {
        let lo = lower_bound(start, &blocks.starts).saturating_sub(1);
        let hi = (lower_bound(end, &blocks.ends) + 1).min(blocks.len());
        lo..hi.max(lo)
    }
}

/// Position of the first element `>= key` in a sorted slice.
#[inline]
fn lower_bound<K: PartialOrd>(key: K, elems: &[K]) -> usize {
    elems.partition_point(|x| *x < key)
}

impl DepthQuery for SortedBlockIndex {
    ///
    /// Length weighted average depth over `[start, end)`:
    /// `sum(overlap_i * depth_i) / (end - start)`.
    ///
    /// Bases not covered by any block count as zero in the average, but a
    /// window that no block touches at all gives `None`.
    fn average_depth(&self, chr: &str, start: u32, end: u32) -> Option<f64> {
        let blocks = self.chroms.get(chr)?;
        if end <= start {
            return None;
        }

        let mut weighted = 0.0;
        let mut covered: u64 = 0;
        for i in Self::candidates(blocks, start, end) {
            let len = interval_overlap(blocks.starts[i], blocks.ends[i], start, end);
            if len > 0 {
                weighted += len as f64 * blocks.depths[i];
                covered += len as u64;
            }
        }

        if covered == 0 {
            return None;
        }
        Some(weighted / (end - start) as f64)
    }
}

impl From<DepthTrack> for SortedBlockIndex {
    fn from(track: DepthTrack) -> Self {
        SortedBlockIndex::build(track.blocks)
    }
}
