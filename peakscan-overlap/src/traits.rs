use peakscan_core::models::{DepthBlock, Window};

/// Anything located on a chromosome as a half-open `[start, end)` range.
pub trait Span {
    fn chr(&self) -> &str;
    fn start(&self) -> u32;
    fn end(&self) -> u32;
}

impl Span for DepthBlock {
    fn chr(&self) -> &str {
        &self.chr
    }
    fn start(&self) -> u32 {
        self.start
    }
    fn end(&self) -> u32 {
        self.end
    }
}

impl Span for Window {
    fn chr(&self) -> &str {
        &self.chr
    }
    fn start(&self) -> u32 {
        self.start
    }
    fn end(&self) -> u32 {
        self.end
    }
}

/// Average signal over a genomic range.
///
/// `None` means there is no observation covering the range at all, which is
/// different from an observed depth of zero.
pub trait DepthQuery: Send + Sync {
    fn average_depth(&self, chr: &str, start: u32, end: u32) -> Option<f64>;

    fn average_depth_of(&self, span: &impl Span) -> Option<f64>
    where
        Self: Sized,
    {
        self.average_depth(span.chr(), span.start(), span.end())
    }
}
