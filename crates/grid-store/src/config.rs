//! Configuration for the grid store.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// Tuning for how packed fields are chunked and compressed on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Chunk edge length for the Zarr arrays (square chunks).
    pub chunk_size: usize,

    /// Compression codec.
    pub compression: Compression,

    /// Compression level (1-9).
    pub compression_level: u8,

    /// Enable byte shuffle filter for better compression.
    pub shuffle: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            chunk_size: 512,
            compression: Compression::BloscZstd,
            compression_level: 1,
            shuffle: true,
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("GRIDSTORE_CHUNK_SIZE") {
            if let Ok(size) = val.parse() {
                config.chunk_size = size;
            }
        }

        if let Ok(val) = std::env::var("GRIDSTORE_COMPRESSION") {
            config.compression = Compression::from_str(&val);
        }

        if let Ok(val) = std::env::var("GRIDSTORE_COMPRESSION_LEVEL") {
            if let Ok(level) = val.parse() {
                config.compression_level = level;
            }
        }

        if let Ok(val) = std::env::var("GRIDSTORE_SHUFFLE") {
            config.shuffle = val.to_lowercase() == "true" || val == "1";
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(StoreError::Config("chunk_size must be > 0".to_string()));
        }

        if self.compression_level == 0 || self.compression_level > 9 {
            return Err(StoreError::Config(
                "compression_level must be 1-9".to_string(),
            ));
        }

        Ok(())
    }
}

/// Compression codec for the stored arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Compression {
    /// No compression.
    None,
    /// Blosc with LZ4.
    BloscLz4,
    /// Blosc with Zstd (recommended).
    BloscZstd,
}

impl Default for Compression {
    fn default() -> Self {
        Self::BloscZstd
    }
}

impl Compression {
    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "none" => Self::None,
            "blosc_lz4" | "lz4" => Self::BloscLz4,
            "blosc_zstd" | "zstd" => Self::BloscZstd,
            _ => Self::BloscZstd,
        }
    }

    /// Get the codec name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::BloscLz4 => "blosc_lz4",
            Self::BloscZstd => "blosc_zstd",
        }
    }
}

impl std::fmt::Display for Compression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.chunk_size, 512);
        assert_eq!(config.compression, Compression::BloscZstd);
        assert_eq!(config.compression_level, 1);
        assert!(config.shuffle);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = StoreConfig::default();
        config.chunk_size = 0;
        assert!(config.validate().is_err());

        config = StoreConfig::default();
        config.compression_level = 0;
        assert!(config.validate().is_err());

        config.compression_level = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_compression_from_str() {
        assert_eq!(Compression::from_str("none"), Compression::None);
        assert_eq!(Compression::from_str("blosc_lz4"), Compression::BloscLz4);
        assert_eq!(Compression::from_str("BLOSC_ZSTD"), Compression::BloscZstd);
        assert_eq!(Compression::from_str("zstd"), Compression::BloscZstd);
        assert_eq!(Compression::from_str("invalid"), Compression::BloscZstd);
    }
}
