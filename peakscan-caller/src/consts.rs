pub const DEFAULT_WINDOW_SIZE: u32 = 300;
pub const DEFAULT_SAMPLE_SIZE: usize = 10_000;
pub const DEFAULT_FDR_CUTOFF: f64 = 0.01;
pub const DEFAULT_PEAK_FRAC: f64 = 0.05;

/// Bases excluded at each chromosome end (telomeres, unassembled sequence).
pub const DEFAULT_TRIM: u32 = 10_000;

pub const DEFAULT_HEADER_LINES: usize = 1;
pub const DEFAULT_THREADS: usize = 1;

/// Scan progress is reported every this many windows.
pub const PROGRESS_INTERVAL: u64 = 10_000;
/// Progress lines must show at the default log level; the bar is hidden
/// when stderr is not a terminal.
pub const PROGRESS_LEVEL: log::Level = log::Level::Info;

/// Written in place of a missing depth or p-value.
pub const MISSING_VALUE: &str = "NA";
