//! The scan pipeline: load inputs, tile the genome, estimate the background,
//! then walk every window and stream one result row per window.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use rayon::prelude::*;

use peakscan_core::models::{ChromSizes, DepthTrack, Window};
use peakscan_overlap::{DepthQuery, SortedBlockIndex};

use crate::background::{BackgroundDistribution, build_background_seeded};
use crate::config::ScanConfig;
use crate::consts::{MISSING_VALUE, PROGRESS_INTERVAL, PROGRESS_LEVEL};
use crate::errors::{PeakCallError, PeakCallResult};
use crate::pvalue::p_value;
use crate::tiling::TilingPlan;

/// One row of the scan table.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    pub window: Window,
    /// `None` when no depth block touches the window.
    pub avg_depth: Option<f64>,
    /// `None` whenever `avg_depth` is.
    pub p_value: Option<f64>,
}

fn fmt_optional(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING_VALUE.to_string(), |v| v.to_string())
}

impl ScanResult {
    /// `chrom, start, end, avgDepth, pValue`, tab separated, missing values as `NA`.
    pub fn as_string(&self) -> String {
        format!(
            "{}\t{}\t{}",
            self.window.as_string(),
            fmt_optional(self.avg_depth),
            fmt_optional(self.p_value)
        )
    }
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanSummary {
    pub windows_scanned: u64,
    pub windows_with_depth: u64,
    pub background_size: usize,
    pub background_cutoff: f64,
    pub seed: Option<u64>,
    /// Chromosomes in the size table but absent from the depth track.
    pub dropped_chromosomes: Vec<String>,
    /// Chromosomes too short to tile.
    pub skipped_chromosomes: Vec<String>,
}

/// Everything a scan needs, built once and then only read.
pub struct Inputs {
    pub sizes: ChromSizes,
    pub index: SortedBlockIndex,
    pub plan: TilingPlan,
    pub dropped_chromosomes: Vec<String>,
}

///
/// Read the depth track and chromosome sizes, keep the chromosomes they share,
/// and tile them.
pub fn load_inputs(
    config: &ScanConfig,
    depth_path: &Path,
    sizes_path: &Path,
) -> PeakCallResult<Inputs> {
    log::info!("Step  1: reading read depth data and chromosome sizes");

    let track = DepthTrack::from_path(depth_path, config.header_lines, config.max_rows)?;
    let mut sizes = ChromSizes::try_from(sizes_path)?;
    log::info!(
        "Read {} depth blocks and {} chromosome sizes",
        track.len(),
        sizes.len()
    );

    let dropped_chromosomes = sizes.retain_present(&track.chromosomes());
    if sizes.is_empty() {
        return Err(PeakCallError::NoCommonChromosomes);
    }
    if !dropped_chromosomes.is_empty() {
        log::debug!(
            "{} chromosomes have no depth data and are not scanned",
            dropped_chromosomes.len()
        );
    }

    let plan = TilingPlan::build(&sizes, config.trim5, config.trim3, config.window_size)?;
    if plan.total_windows() == 0 {
        return Err(PeakCallError::NoWindows {
            trim5: config.trim5,
            trim3: config.trim3,
            window_size: config.window_size,
        });
    }
    let index = SortedBlockIndex::from(track);

    Ok(Inputs {
        sizes,
        index,
        plan,
        dropped_chromosomes,
    })
}

///
/// Sample the background for `inputs` and write it to the background file.
pub fn estimate_background(
    config: &ScanConfig,
    inputs: &Inputs,
) -> PeakCallResult<BackgroundDistribution> {
    log::info!(
        "Step  2: calculate background distribution with {} sampled regions of length {}",
        config.sample_size,
        config.window_size
    );

    let background = build_background_seeded(
        &inputs.plan,
        &inputs.index,
        config.sample_size,
        config.peak_frac,
        config.seed,
    )?;

    let path = config.background_path();
    background.write_to_path(&path)?;
    log::info!(
        "Background of {} values (cutoff {}) written to {}",
        background.len(),
        background.cutoff(),
        path.display()
    );

    Ok(background)
}

/// Walks the genome window by window against a fixed background.
pub struct PeakScanner<'a, Q: DepthQuery> {
    plan: &'a TilingPlan,
    index: &'a Q,
    background: &'a BackgroundDistribution,
}

impl<'a, Q: DepthQuery> PeakScanner<'a, Q> {
    pub fn new(plan: &'a TilingPlan, index: &'a Q, background: &'a BackgroundDistribution) -> Self {
        PeakScanner {
            plan,
            index,
            background,
        }
    }

    /// Depth and p-value of the window with flat index `index`.
    pub fn result_at(&self, index: u64) -> PeakCallResult<ScanResult> {
        let window = self.plan.window_at(index)?;
        let avg_depth = self
            .index
            .average_depth(&window.chr, window.start, window.end);
        Ok(ScanResult {
            p_value: p_value(self.background, avg_depth),
            avg_depth,
            window,
        })
    }

    ///
    /// Write one row per window, in flat index order.
    ///
    /// With `threads > 1` each chromosome is evaluated on a rayon pool and
    /// written before the next one starts; row order is the same as a
    /// sequential scan.
    ///
    /// # Returns
    /// (windows written, windows with depth data)
    pub fn scan<W: Write>(&self, writer: &mut W, threads: usize) -> PeakCallResult<(u64, u64)> {
        let total = self.plan.total_windows();
        let bar = ProgressBar::new(total);
        let mut progress = Progress::new(bar.clone());

        let counts = if threads > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?;
            let mut counts = (0, 0);
            for (_, range) in self.plan.chrom_ranges() {
                let (first, last) = (*range.start() as usize, *range.end() as usize);
                let rows: Vec<ScanResult> = pool.install(|| {
                    (first..=last)
                        .into_par_iter()
                        .map(|i| self.result_at(i as u64))
                        .collect::<PeakCallResult<Vec<_>>>()
                })?;
                for row in rows.iter() {
                    self.emit(writer, row, &mut counts)?;
                    progress.tick();
                }
            }
            counts
        } else {
            let mut counts = (0, 0);
            for i in 1..=total {
                let row = self.result_at(i)?;
                self.emit(writer, &row, &mut counts)?;
                progress.tick();
            }
            counts
        };

        writer.flush()?;
        bar.finish_and_clear();
        Ok(counts)
    }

    fn emit<W: Write>(
        &self,
        writer: &mut W,
        row: &ScanResult,
        counts: &mut (u64, u64),
    ) -> io::Result<()> {
        writeln!(writer, "{}", row.as_string())?;
        counts.0 += 1;
        if row.avg_depth.is_some() {
            counts.1 += 1;
        }
        Ok(())
    }
}

/// Advances the progress bar and logs every [`PROGRESS_INTERVAL`] windows.
struct Progress {
    bar: ProgressBar,
    seen: u64,
}

impl Progress {
    fn new(bar: ProgressBar) -> Self {
        Progress { bar, seen: 0 }
    }

    /// Count one window; `true` when a progress line was logged for it.
    fn tick(&mut self) -> bool {
        self.seen += 1;
        if self.seen % PROGRESS_INTERVAL != 0 {
            return false;
        }
        self.bar.inc(PROGRESS_INTERVAL);
        log::log!(PROGRESS_LEVEL, "{:10} regions scanned", self.seen);
        true
    }
}

/// Open the scan table destination; stdout when no path is given.
pub fn open_output(path: Option<&PathBuf>) -> PeakCallResult<BufWriter<Box<dyn Write>>> {
    let inner: Box<dyn Write> = match path {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };
    Ok(BufWriter::new(inner))
}

///
/// Stop after the background: load, tile, sample and write the background
/// file.
pub fn run_background(
    config: &ScanConfig,
    depth_path: &Path,
    sizes_path: &Path,
) -> PeakCallResult<BackgroundDistribution> {
    config.validate()?;
    let inputs = load_inputs(config, depth_path, sizes_path)?;
    estimate_background(config, &inputs)
}

///
/// Run the whole pipeline and write the scan table to `config.out_file`.
///
/// # Arguments
/// - config: validated before any file is opened
/// - depth_path: bedGraph-like depth track, sorted by chromosome and start
/// - sizes_path: chromosome sizes table
pub fn run_scan(
    config: &ScanConfig,
    depth_path: &Path,
    sizes_path: &Path,
) -> PeakCallResult<ScanSummary> {
    config.validate()?;
    log::debug!("fdr_cutoff = {} (not applied to the output)", config.fdr_cutoff);

    let inputs = load_inputs(config, depth_path, sizes_path)?;
    let background = estimate_background(config, &inputs)?;

    log::info!(
        "Step  3: scan for significant regions with FDR={:.2}",
        config.fdr_cutoff
    );
    let mut writer = open_output(config.out_file.as_ref())?;
    let scanner = PeakScanner::new(&inputs.plan, &inputs.index, &background);
    let (windows_scanned, windows_with_depth) = scanner.scan(&mut writer, config.threads)?;

    log::info!("Step  4: sharpen and merge regions (not performed; output is per window)");

    Ok(ScanSummary {
        windows_scanned,
        windows_with_depth,
        background_size: background.len(),
        background_cutoff: background.cutoff(),
        seed: background.seed(),
        dropped_chromosomes: inputs.dropped_chromosomes,
        skipped_chromosomes: inputs.plan.skipped().to_vec(),
    })
}
