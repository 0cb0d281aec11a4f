//! Error types for the grid store.

use thiserror::Error;

/// Errors that can occur reading or writing a grid store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the store or one of its arrays.
    #[error("failed to open grid store: {0}")]
    OpenFailed(String),

    /// Failed to create or write an array.
    #[error("failed to write grid store: {0}")]
    WriteFailed(String),

    /// Failed to read array data.
    #[error("failed to read grid store: {0}")]
    ReadFailed(String),

    /// Missing or malformed dequantization attributes.
    #[error("invalid store metadata: {0}")]
    InvalidMetadata(String),

    /// Configuration error.
    #[error("store configuration error: {0}")]
    Config(String),

    /// The two fields of a pair disagree in shape.
    #[error("lat/lon fields disagree in shape: {lat:?} vs {lon:?}")]
    ShapeMismatch {
        lat: (usize, usize),
        lon: (usize, usize),
    },

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for grid store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
