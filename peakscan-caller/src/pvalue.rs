use crate::background::BackgroundDistribution;

/// Upper-tail fraction of an ascending sample at or above `depth`.
///
/// When `depth` exceeds every sample the result is `1/n` rather than zero: a
/// finite sample cannot support a p-value of zero. `None` for an empty sample.
pub fn empirical_p_value(sorted: &[f64], depth: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }

    let rank = sorted.partition_point(|&v| v < depth);
    if rank == n {
        return Some(1.0 / n as f64);
    }
    Some((n - rank) as f64 / n as f64)
}

/// P-value of an observed window depth against the background; a missing
/// depth stays missing.
///
/// ```
/// use peakscan_caller::background::BackgroundDistribution;
/// use peakscan_caller::pvalue::p_value;
///
/// let background = BackgroundDistribution::from_samples(vec![1.0, 2.0, 3.0, 4.0], 0.0).unwrap();
/// assert_eq!(p_value(&background, Some(3.0)), Some(0.5));
/// assert_eq!(p_value(&background, Some(10.0)), Some(0.25));
/// assert_eq!(p_value(&background, None), None);
/// ```
pub fn p_value(background: &BackgroundDistribution, depth: Option<f64>) -> Option<f64> {
    empirical_p_value(background.values(), depth?)
}
