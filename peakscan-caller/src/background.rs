//! Empirical background estimation.
//!
//! A random set of genome windows is drawn, their average depths looked up,
//! and the extreme upper tail removed, since the windows there are likely to
//! sit on real signal. What remains is the null distribution that p-values are
//! computed against.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use peakscan_overlap::DepthQuery;

use crate::errors::{PeakCallError, PeakCallResult};
use crate::tiling::TilingPlan;

/// Sorted average depths of background windows, upper tail removed.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundDistribution {
    values: Vec<f64>,
    cutoff: f64,
    seed: Option<u64>,
}

/// Number of windows to draw: `floor(sample_size * (1 + peak_frac))`.
pub fn draw_count(sample_size: usize, peak_frac: f64) -> usize {
    (sample_size as f64 * (1.0 + peak_frac)) as usize
}

///
/// The `q` quantile of an ascending slice, interpolating linearly between the
/// two nearest order statistics.
///
/// # Returns
/// `None` for an empty slice
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

impl BackgroundDistribution {
    ///
    /// Build the distribution from raw sampled depths: sort ascending and drop
    /// every value above the `1 - peak_frac` quantile.
    pub fn from_samples(mut samples: Vec<f64>, peak_frac: f64) -> PeakCallResult<Self> {
        samples.sort_by(|a, b| a.total_cmp(b));

        let cutoff =
            quantile(&samples, 1.0 - peak_frac).ok_or(PeakCallError::EmptyBackground(0))?;
        let keep = samples.partition_point(|&v| v <= cutoff);
        samples.truncate(keep);

        Ok(BackgroundDistribution {
            values: samples,
            cutoff,
            seed: None,
        })
    }

    /// Record the seed the samples were drawn with.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Ascending background values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The tail cutoff; every kept value is `<=` this.
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Write the values one per line.
    pub fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for value in self.values.iter() {
            writeln!(writer, "{}", value)?;
        }
        Ok(())
    }

    pub fn write_to_path(&self, path: &Path) -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(&mut writer)?;
        writer.flush()
    }
}

///
/// Sample the background distribution.
///
/// Draws `floor(sample_size * (1 + peak_frac))` distinct windows (at most every
/// window in the plan) and looks up their average depths. Windows without any
/// depth data are dropped rather than counted as zero depth.
///
/// # Arguments
/// - plan: the genome tiling
/// - index: depth lookups
/// - sample_size: target size of the distribution
/// - peak_frac: fraction of the genome assumed to be signal
/// - rng: source of randomness
pub fn build_background<Q, R>(
    plan: &TilingPlan,
    index: &Q,
    sample_size: usize,
    peak_frac: f64,
    rng: &mut R,
) -> PeakCallResult<BackgroundDistribution>
where
    Q: DepthQuery,
    R: Rng + ?Sized,
{
    let total = plan.total_windows() as usize;
    let mut draws = draw_count(sample_size, peak_frac);
    if draws > total {
        log::warn!(
            "Requested {draws} background windows but the genome only has {total}; using all of them"
        );
        draws = total;
    }

    let mut depths = Vec::with_capacity(draws);
    for i in rand::seq::index::sample(rng, total, draws).into_iter() {
        let window = plan.window_at(i as u64 + 1)?;
        if let Some(depth) = index.average_depth(&window.chr, window.start, window.end) {
            depths.push(depth);
        }
    }

    if depths.is_empty() {
        return Err(PeakCallError::EmptyBackground(draws));
    }
    let missing = draws - depths.len();
    if missing > 0 {
        log::info!("{missing} of {draws} sampled windows have no depth data and were left out");
    }

    BackgroundDistribution::from_samples(depths, peak_frac)
}

///
/// [`build_background`] with a seeded [`StdRng`]. Without a seed one is drawn
/// from the OS and logged so the run can be repeated.
pub fn build_background_seeded<Q: DepthQuery>(
    plan: &TilingPlan,
    index: &Q,
    sample_size: usize,
    peak_frac: f64,
    seed: Option<u64>,
) -> PeakCallResult<BackgroundDistribution> {
    let seed = seed.unwrap_or_else(rand::random);
    log::info!("Background sampling seed: {seed}");

    let mut rng = StdRng::seed_from_u64(seed);
    let background = build_background(plan, index, sample_size, peak_frac, &mut rng)?;
    Ok(background.with_seed(seed))
}

#[cfg(test)]
mod tests {
    use super::*;

    use peakscan_core::models::{ChromSizes, DepthBlock};
    use peakscan_overlap::SortedBlockIndex;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    /// One chromosome of 100bp windows whose depth rises with position:
    /// window `i` (0-based) has depth `i`.
    #[fixture]
    fn ramp() -> (TilingPlan, SortedBlockIndex) {
        let n: u32 = 2_000;
        let sizes = ChromSizes::from(vec![("chr1".to_string(), n * 100)]);
        let plan = TilingPlan::build(&sizes, 0, 0, 100).unwrap();
        let blocks = (0..n)
            .map(|i| DepthBlock {
                chr: "chr1".to_string(),
                start: i * 100,
                end: (i + 1) * 100,
                depth: i as f64,
            })
            .collect();
        (plan, SortedBlockIndex::build(blocks))
    }

    #[rstest]
    #[case(1000, 0.1, 1100)]
    #[case(10_000, 0.05, 10_500)]
    #[case(7, 0.0, 7)]
    #[case(3, 1.0, 6)]
    fn test_draw_count(
        #[case] sample_size: usize,
        #[case] peak_frac: f64,
        #[case] expected: usize,
    ) {
        assert_eq!(draw_count(sample_size, peak_frac), expected);
    }

    #[rstest]
    fn test_quantile() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile(&values, 0.0), Some(1.0));
        assert_eq!(quantile(&values, 1.0), Some(5.0));
        assert_eq!(quantile(&values, 0.5), Some(3.0));
        assert_eq!(quantile(&values, 0.75), Some(4.0));
        assert_eq!((quantile(&values, 0.9).unwrap() - 4.6).abs() < 1e-12, true);
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[rstest]
    fn test_from_samples_trims_upper_tail() {
        let samples: Vec<f64> = (1..=10).rev().map(|v| v as f64).collect();
        let background = BackgroundDistribution::from_samples(samples, 0.2).unwrap();
        // 0.8 quantile of 1..=10 is 8.2
        assert_eq!(
            background.values(),
            &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]
        );
        assert_eq!(background.cutoff() > 8.0, true);
    }

    #[rstest]
    fn test_from_samples_keeps_all_without_peak_frac() {
        let background = BackgroundDistribution::from_samples(vec![3.0, 1.0, 2.0], 0.0).unwrap();
        assert_eq!(background.values(), &[1.0, 2.0, 3.0]);
    }

    #[rstest]
    fn test_from_samples_empty() {
        let result = BackgroundDistribution::from_samples(vec![], 0.05);
        assert_eq!(
            matches!(result, Err(PeakCallError::EmptyBackground(_))),
            true
        );
    }

    #[rstest]
    fn test_background_size_after_trimming(ramp: (TilingPlan, SortedBlockIndex)) {
        let (plan, index) = ramp;
        let mut rng = StdRng::seed_from_u64(11);
        let background = build_background(&plan, &index, 1000, 0.1, &mut rng).unwrap();

        // 1100 draws, values above the 0.9 quantile removed
        assert_eq!((980..=1000).contains(&background.len()), true);
        assert_eq!(background.values().windows(2).all(|w| w[0] <= w[1]), true);
        assert_eq!(
            background.values().iter().all(|&v| v <= background.cutoff()),
            true
        );
    }

    #[rstest]
    fn test_background_is_reproducible(ramp: (TilingPlan, SortedBlockIndex)) {
        let (plan, index) = ramp;
        let a = build_background_seeded(&plan, &index, 300, 0.05, Some(42)).unwrap();
        let b = build_background_seeded(&plan, &index, 300, 0.05, Some(42)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.seed(), Some(42));
    }

    #[rstest]
    fn test_draws_clamped_to_genome(ramp: (TilingPlan, SortedBlockIndex)) {
        let (plan, index) = ramp;
        let mut rng = StdRng::seed_from_u64(1);
        let background = build_background(&plan, &index, 5_000, 0.0, &mut rng).unwrap();
        assert_eq!(background.len(), 2_000);
    }

    #[rstest]
    fn test_uncovered_windows_are_dropped() {
        let sizes = ChromSizes::from(vec![("chr1".to_string(), 1_000)]);
        let plan = TilingPlan::build(&sizes, 0, 0, 100).unwrap();
        let index = SortedBlockIndex::build(vec![DepthBlock {
            chr: "chr1".to_string(),
            start: 0,
            end: 200,
            depth: 4.0,
        }]);
        let mut rng = StdRng::seed_from_u64(3);
        let background = build_background(&plan, &index, 10, 0.0, &mut rng).unwrap();
        assert_eq!(background.values(), &[4.0, 4.0]);
    }

    #[rstest]
    fn test_no_coverage_anywhere() {
        let sizes = ChromSizes::from(vec![("chr1".to_string(), 1_000)]);
        let plan = TilingPlan::build(&sizes, 0, 0, 100).unwrap();
        let index = SortedBlockIndex::build(vec![]);
        let mut rng = StdRng::seed_from_u64(3);
        let result = build_background(&plan, &index, 10, 0.0, &mut rng);
        assert_eq!(
            matches!(result, Err(PeakCallError::EmptyBackground(10))),
            true
        );
    }

    #[rstest]
    fn test_write() {
        let background = BackgroundDistribution::from_samples(vec![2.5, 1.0], 0.0).unwrap();
        let mut buf: Vec<u8> = Vec::new();
        background.write(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "1\n2.5\n");
    }
}
