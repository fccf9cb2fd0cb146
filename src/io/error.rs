//! Custom error types for the I/O module.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("File size of {found} bytes exceeds the maximum allowed size of {limit} bytes.")]
    FileTooLarge { limit: u64, found: u64 },

    #[error("I/O error on {}: {source}", path.display())]
    Other {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IoError {
    /// Classify a `std::io::Error` raised while touching `path`.
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => IoError::NotFound {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::PermissionDenied => IoError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => IoError::Other {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

/// Rejected mutation parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Offset {offset:#x} is out of bounds for an image of {len} bytes")]
    OutOfBounds { offset: usize, len: usize },

    #[error("Value {value} does not fit in a byte (0-255)")]
    InvalidValue { value: u64 },
}

pub type Result<T> = std::result::Result<T, IoError>;
