use std::fmt::{self, Display};

///
/// Window struct, one fixed-width tile of a chromosome. Coordinates are
/// 0-based and half-open: `[start, end)`.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct Window {
    pub chr: String,
    pub start: u32,
    pub end: u32,
}

impl Window {
    ///
    /// Get the number of bases spanned by the window
    ///
    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    ///
    /// Get the tab separated `chr start end` string of the window
    ///
    pub fn as_string(&self) -> String {
        format!("{}\t{}\t{}", self.chr, self.start, self.end)
    }
}

impl Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}
