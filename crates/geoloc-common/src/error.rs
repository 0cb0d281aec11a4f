//! Error types for navigation grid generation.

use thiserror::Error;

/// Result type alias using GeolocError.
pub type GeolocResult<T> = Result<T, GeolocError>;

/// Primary error type for grid generation and quantization.
#[derive(Debug, Error)]
pub enum GeolocError {
    /// The requested resolution label is not in the supported set.
    #[error("unsupported resolution: {0}")]
    UnsupportedResolution(String),

    /// A coordinate field has zero valid cells; min/max are undefined.
    /// Indicates a projection parameter bug, never a transient condition.
    #[error("grid contains no valid cells")]
    EmptyGrid,

    /// Batched transform inputs differ in length.
    #[error("coordinate sequences differ in length: x has {x}, y has {y}")]
    LengthMismatch { x: usize, y: usize },

    /// A grid was constructed with inconsistent shape and data length.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
}
