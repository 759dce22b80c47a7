//! Error type shared by the locator, fetcher, reader and resampler.
//!
//! A rotation with no matching run is `Located::NotFound` /
//! `Acquired::NotFound`, not an error.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoundaryError>;

#[derive(Debug, Error)]
pub enum BoundaryError {
    /// Missing or invalid rotation index or preference token.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Network, HTTP or storage failure while downloading a boundary file.
    #[error("download of {url} failed: {reason}")]
    Download { url: String, reason: String },

    /// Boundary file expected in the cache but absent.
    #[error("boundary file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Malformed file, unexpected shape or empty axis.
    #[error("failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// The crate was built without a file-format backend.
    #[error("no HDF reader available: rebuild with the `netcdf` feature")]
    ReaderUnavailable,

    /// Config file unreadable or invalid.
    #[error("config: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BoundaryError {
    pub(crate) fn download(url: &str, reason: impl std::fmt::Display) -> Self {
        BoundaryError::Download {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn parse(path: &std::path::Path, reason: impl std::fmt::Display) -> Self {
        BoundaryError::Parse {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}
