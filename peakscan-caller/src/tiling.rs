//! Genome tiling.
//!
//! Each chromosome's interior (its length minus `trim5` bases at the start and
//! `trim3` at the end) is cut into non-overlapping windows of a fixed width.
//! Windows are numbered genome wide with a 1-based *flat index*, chromosome by
//! chromosome in table order, so one integer identifies one window and the
//! mapping back to coordinates only needs the prefix sums of the per
//! chromosome window counts.

use std::ops::RangeInclusive;

use peakscan_core::models::{ChromSizes, Window};

use crate::errors::{PeakCallError, PeakCallResult};

/// Tiling of a single chromosome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromTiling {
    pub chr: String,
    /// First tiled base, i.e. `trim5`.
    pub start: u32,
    /// Number of windows; always positive inside a plan.
    pub count: u64,
}

/// Windows across the whole genome, addressable by flat index.
#[derive(Debug, Clone)]
pub struct TilingPlan {
    chroms: Vec<ChromTiling>,
    /// `cumulative[i]` = number of windows on chromosomes `0..=i`.
    cumulative: Vec<u64>,
    window_size: u32,
    skipped: Vec<String>,
}

/// `floor((length - trim5 - trim3) / window_size)`, or `None` when the trimmed
/// chromosome cannot hold a single window.
pub fn window_count(length: u32, trim5: u32, trim3: u32, window_size: u32) -> Option<u64> {
    let tileable = (length as u64).checked_sub(trim5 as u64 + trim3 as u64)?;
    match tileable / window_size as u64 {
        0 => None,
        count => Some(count),
    }
}

impl TilingPlan {
    ///
    /// Tile every chromosome in `sizes`.
    ///
    /// Chromosomes too short to hold one window after trimming are left out
    /// of the plan and listed in [`TilingPlan::skipped`].
    pub fn build(
        sizes: &ChromSizes,
        trim5: u32,
        trim3: u32,
        window_size: u32,
    ) -> PeakCallResult<Self> {
        if window_size == 0 {
            return Err(PeakCallError::Config(
                "window_size must be a positive integer".to_string(),
            ));
        }

        let mut chroms = Vec::with_capacity(sizes.len());
        let mut cumulative = Vec::with_capacity(sizes.len());
        let mut skipped = Vec::new();
        let mut total: u64 = 0;

        for (chr, length) in sizes.iter() {
            match window_count(length, trim5, trim3, window_size) {
                Some(count) => {
                    total += count;
                    chroms.push(ChromTiling {
                        chr: chr.to_string(),
                        start: trim5,
                        count,
                    });
                    cumulative.push(total);
                }
                None => {
                    log::warn!(
                        "Skipping {chr}: length {length} leaves no {window_size}bp window after trimming {trim5}+{trim3} bases"
                    );
                    skipped.push(chr.to_string());
                }
            }
        }

        Ok(TilingPlan {
            chroms,
            cumulative,
            window_size,
            skipped,
        })
    }

    pub fn window_size(&self) -> u32 {
        self.window_size
    }

    /// Total number of windows in the genome.
    pub fn total_windows(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    pub fn chroms(&self) -> &[ChromTiling] {
        &self.chroms
    }

    /// Chromosomes that were excluded for being too short.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// First and last flat index of a chromosome's windows.
    pub fn chrom_range(&self, chr: &str) -> Option<RangeInclusive<u64>> {
        let pos = self.chroms.iter().position(|c| c.chr == chr)?;
        Some(self.range_of(pos))
    }

    fn range_of(&self, pos: usize) -> RangeInclusive<u64> {
        let before = if pos == 0 {
            0
        } else {
            self.cumulative[pos - 1]
        };
        (before + 1)..=self.cumulative[pos]
    }

    /// Flat index ranges of every chromosome, in plan order.
    pub fn chrom_ranges(&self) -> impl Iterator<Item = (&str, RangeInclusive<u64>)> + '_ {
        self.chroms
            .iter()
            .enumerate()
            .map(|(pos, c)| (c.chr.as_str(), self.range_of(pos)))
    }

    ///
    /// Coordinates of the window with 1-based flat index `index`.
    ///
    /// The owning chromosome is the first one whose cumulative window count
    /// reaches `index`; within it the window ends at
    /// `(index - windows_before) * window_size + trim5`.
    pub fn window_at(&self, index: u64) -> PeakCallResult<Window> {
        let total = self.total_windows();
        if index == 0 || index > total {
            return Err(PeakCallError::IndexOutOfRange { index, total });
        }

        let pos = self.cumulative.partition_point(|&c| c < index);
        let chrom = &self.chroms[pos];
        let before = if pos == 0 {
            0
        } else {
            self.cumulative[pos - 1]
        };

        let end = (index - before) * self.window_size as u64 + chrom.start as u64;
        let start = end - self.window_size as u64;

        Ok(Window {
            chr: chrom.chr.clone(),
            start: start as u32,
            end: end as u32,
        })
    }

    /// Every window in flat index order.
    pub fn windows(&self) -> impl Iterator<Item = Window> + '_ {
        self.chroms.iter().flat_map(move |c| {
            (0..c.count).map(move |i| {
                let start = c.start as u64 + i * self.window_size as u64;
                Window {
                    chr: c.chr.clone(),
                    start: start as u32,
                    end: (start + self.window_size as u64) as u32,
                }
            })
        })
    }
}
