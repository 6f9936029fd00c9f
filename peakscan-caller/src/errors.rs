use thiserror::Error;

use peakscan_core::InputError;

#[derive(Error, Debug)]
pub enum PeakCallError {
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("No common chromosomes found between the depth track and the chromosome sizes")]
    NoCommonChromosomes,
    #[error(
        "No chromosome is long enough to hold a {window_size}bp window after trimming {trim5}+{trim3} bases"
    )]
    NoWindows {
        trim5: u32,
        trim3: u32,
        window_size: u32,
    },
    #[error("Window index {index} is outside of [1, {total}]")]
    IndexOutOfRange { index: u64, total: u64 },
    #[error("None of the {0} sampled windows has depth data; cannot estimate a background")]
    EmptyBackground(usize),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type PeakCallResult<T> = std::result::Result<T, PeakCallError>;
