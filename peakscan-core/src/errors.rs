use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Can't read file {path:?}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing {path:?} at line {line}: {message}")]
    ParseError {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
