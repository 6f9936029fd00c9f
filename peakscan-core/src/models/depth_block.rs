///
/// One record of a depth track: a constant `depth` over `[start, end)`.
///
#[derive(PartialEq, Debug, Clone)]
pub struct DepthBlock {
    pub chr: String,
    pub start: u32,
    pub end: u32,
    pub depth: f64,
}
