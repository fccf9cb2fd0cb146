//! Error types for the datlens analysis library.
//!
//! Each layer has its own error enum: [`IoError`] for loading and saving,
//! [`FormatError`] for structural decoding and [`RangeError`] for rejected
//! mutations. [`DatError`] wraps them for callers that handle everything in
//! one place.

use thiserror::Error;

pub use crate::formats::dat::FormatError;
pub use crate::io::error::{IoError, RangeError};

/// Main error type for datlens operations.
#[derive(Debug, Error)]
pub enum DatError {
    /// Opening, reading or writing the image failed
    #[error(transparent)]
    Io(#[from] IoError),

    /// The image is too short for the structure being decoded
    #[error("Invalid format: {0}")]
    Format(#[from] FormatError),

    /// A patch offset or value was rejected
    #[error("Invalid edit: {0}")]
    Range(#[from] RangeError),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<serde_json::Error> for DatError {
    fn from(err: serde_json::Error) -> Self {
        DatError::Config(err.to_string())
    }
}

/// Result type alias for datlens operations
pub type Result<T> = std::result::Result<T, DatError>;
