//! Error types shared by the reader, the network builder and the driver.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The input record file does not exist.
    #[error("input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// The stream ended before a full record could be read.
    #[error("incomplete record: read {read} of {expected} bytes")]
    IncompleteRecord { read: usize, expected: usize },

    /// An image could not be written to disk.
    #[error("failed to write image to {path}")]
    OutputWriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A buffer of `elements` values could not be allocated.
    #[error("failed to allocate {elements} elements")]
    AllocationFailure { elements: usize },

    #[error("invalid network topology: {0}")]
    InvalidTopology(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}
