use crate::traits::Span;

/// The intersection of two spans on the same chromosome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap<'a> {
    pub chr: &'a str,
    pub start: u32,
    pub end: u32,
}

impl Overlap<'_> {
    /// Always positive; [`overlap`] never builds an empty one.
    pub fn width(&self) -> u32 {
        self.end - self.start
    }
}

/// Number of bases shared by `[a_start, a_end)` and `[b_start, b_end)`, zero if disjoint.
#[inline]
pub(crate) fn interval_overlap(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> u32 {
    std::cmp::min(a_end, b_end).saturating_sub(std::cmp::max(a_start, b_start))
}

///
/// Intersect two spans.
///
/// Returns `None`, the empty overlap, when the spans sit on different
/// chromosomes or share no base (touching half-open ends do not overlap).
///
/// ```
/// use peakscan_core::models::{DepthBlock, Window};
/// use peakscan_overlap::overlap;
///
/// let block = DepthBlock { chr: "chr1".to_string(), start: 80, end: 160, depth: 3.0 };
/// let window = Window { chr: "chr1".to_string(), start: 100, end: 200 };
///
/// let hit = overlap(&block, &window).unwrap();
/// assert_eq!((hit.start, hit.end, hit.width()), (100, 160, 60));
/// ```
pub fn overlap<'a, A, B>(a: &'a A, b: &B) -> Option<Overlap<'a>>
where
    A: Span,
    B: Span,
{
    if a.chr() != b.chr() {
        return None;
    }

    let len = interval_overlap(a.start(), a.end(), b.start(), b.end());
    if len == 0 {
        return None;
    }

    let start = std::cmp::max(a.start(), b.start());
    Some(Overlap {
        chr: a.chr(),
        start,
        end: start + len,
    })
}

/// Overlap length of two spans; 0 for the empty overlap.
pub fn overlap_len<A: Span, B: Span>(a: &A, b: &B) -> u32 {
    overlap(a, b).map_or(0, |o| o.width())
}

#[cfg(test)]
mod tests {
    use super::*;

    use peakscan_core::models::{DepthBlock, Window};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn block(chr: &str, start: u32, end: u32) -> DepthBlock {
        DepthBlock {
            chr: chr.to_string(),
            start,
            end,
            depth: 1.0,
        }
    }

    fn window(chr: &str, start: u32, end: u32) -> Window {
        Window {
            chr: chr.to_string(),
            start,
            end,
        }
    }

    #[rstest]
    #[case(block("chr1", 0, 100), window("chr1", 50, 150), Some((50, 100)))]
    #[case(block("chr1", 0, 300), window("chr1", 100, 200), Some((100, 200)))]
    #[case(block("chr1", 120, 130), window("chr1", 100, 200), Some((120, 130)))]
    #[case(block("chr1", 0, 100), window("chr1", 100, 200), None)]
    #[case(block("chr1", 250, 300), window("chr1", 100, 200), None)]
    #[case(block("chr2", 0, 300), window("chr1", 100, 200), None)]
    fn test_overlap(
        #[case] a: DepthBlock,
        #[case] b: Window,
        #[case] expected: Option<(u32, u32)>,
    ) {
        let result = overlap(&a, &b).map(|o| (o.start, o.end));
        assert_eq!(result, expected);
    }

    #[rstest]
    fn test_overlap_is_symmetric() {
        let a = block("chr1", 10, 70);
        let b = block("chr1", 40, 90);
        assert_eq!(overlap(&a, &b), overlap(&b, &a));
        assert_eq!(overlap_len(&a, &b), 30);
    }

    #[rstest]
    fn test_empty_overlap_has_zero_length() {
        assert_eq!(overlap_len(&block("chr1", 0, 10), &window("chrX", 0, 10)), 0);
        assert_eq!(overlap_len(&block("chr1", 0, 10), &window("chr1", 20, 30)), 0);
    }
}
