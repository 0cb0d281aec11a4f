//! Zarr V3 writer for packed navigation grid pairs.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;
use zarrs::array::codec::bytes_to_bytes::blosc::{
    BloscCodec, BloscCompressionLevel, BloscCompressor, BloscShuffleMode,
};
use zarrs::array::{Array, ArrayBuilder, DataType, FillValue};
use zarrs::array_subset::ArraySubset;
use zarrs::storage::{ReadableStorageTraits, WritableStorageTraits};
use zarrs_filesystem::FilesystemStore;

use navgrid::{PackedGrid, PACKED_FILL};

use crate::config::{Compression, StoreConfig};
use crate::error::{Result, StoreError};

/// Result of writing a packed grid pair.
#[derive(Debug)]
pub struct StoreWriteResult {
    /// Uncompressed bytes handed to the store.
    pub bytes_written: u64,
}

/// Writer for persisting a packed lat/lon pair as two int16 Zarr arrays.
pub struct GridStoreWriter {
    config: StoreConfig,
}

impl GridStoreWriter {
    /// Create a new writer with the given configuration.
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Write a packed pair to a filesystem directory, creating it if needed.
    pub fn write_to_path(
        &self,
        path: &Path,
        lat: &PackedGrid,
        lon: &PackedGrid,
    ) -> Result<StoreWriteResult> {
        std::fs::create_dir_all(path)?;
        let store = Arc::new(
            FilesystemStore::new(path).map_err(|e| StoreError::OpenFailed(e.to_string()))?,
        );
        self.write(store, lat, lon)
    }

    /// Write a packed pair to any writable storage backend.
    ///
    /// The two fields must agree in shape; the arrays land at `/lat` and
    /// `/lon` with their dequantization attributes.
    pub fn write<S: ReadableStorageTraits + WritableStorageTraits + 'static>(
        &self,
        storage: Arc<S>,
        lat: &PackedGrid,
        lon: &PackedGrid,
    ) -> Result<StoreWriteResult> {
        if lat.lines != lon.lines || lat.columns != lon.columns {
            return Err(StoreError::ShapeMismatch {
                lat: (lat.lines, lat.columns),
                lon: (lon.lines, lon.columns),
            });
        }

        let mut bytes_written = self.write_field(storage.clone(), "/lat", lat)?;
        bytes_written += self.write_field(storage, "/lon", lon)?;

        Ok(StoreWriteResult { bytes_written })
    }

    /// Write one packed field as an int16 array.
    fn write_field<S: ReadableStorageTraits + WritableStorageTraits + 'static>(
        &self,
        storage: Arc<S>,
        path: &str,
        field: &PackedGrid,
    ) -> Result<u64> {
        let array = self.build_array(storage, path, field)?;

        array
            .store_metadata()
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        let subset = ArraySubset::new_with_start_shape(
            vec![0, 0],
            vec![field.lines as u64, field.columns as u64],
        )
        .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        array
            .store_array_subset_elements(&subset, &field.values)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        let bytes = (field.values.len() * std::mem::size_of::<i16>()) as u64;
        debug!(path, lines = field.lines, columns = field.columns, bytes, "stored packed field");
        Ok(bytes)
    }

    /// Build an int16 array with the configured chunking and compression.
    fn build_array<S: ReadableStorageTraits + WritableStorageTraits + 'static>(
        &self,
        storage: Arc<S>,
        path: &str,
        field: &PackedGrid,
    ) -> Result<Array<S>> {
        let mut attrs = serde_json::Map::new();
        attrs.insert("scale_factor".to_string(), serde_json::json!(field.scale));
        attrs.insert("add_offset".to_string(), serde_json::json!(field.offset));
        attrs.insert("fill_value".to_string(), serde_json::json!(PACKED_FILL));

        let chunk_size = self.config.chunk_size;
        let chunk_grid: zarrs::array::ChunkGrid = vec![chunk_size as u64, chunk_size as u64]
            .try_into()
            .map_err(|e| StoreError::Config(format!("{:?}", e)))?;

        let mut binding = ArrayBuilder::new(
            vec![field.lines as u64, field.columns as u64], // shape [rows, cols]
            DataType::Int16,
            chunk_grid,
            FillValue::from(PACKED_FILL),
        );
        let mut builder = binding.attributes(attrs);

        if self.config.compression != Compression::None {
            let codec = self.compression_codec()?;
            builder = builder.bytes_to_bytes_codecs(vec![codec]);
        }

        builder
            .build(storage, path)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))
    }

    /// Create the compression codec based on configuration.
    fn compression_codec(&self) -> Result<Arc<dyn zarrs::array::codec::BytesToBytesCodecTraits>> {
        let level = BloscCompressionLevel::try_from(self.config.compression_level)
            .map_err(|_| StoreError::Config("invalid compression level".to_string()))?;

        let shuffle = if self.config.shuffle {
            BloscShuffleMode::Shuffle
        } else {
            BloscShuffleMode::NoShuffle
        };

        // typesize is required when shuffle is enabled
        let typesize = if self.config.shuffle {
            Some(2) // i16 = 2 bytes
        } else {
            None
        };

        let compressor = match self.config.compression {
            Compression::None => {
                return Err(StoreError::Config("no compression configured".to_string()))
            }
            Compression::BloscLz4 => BloscCompressor::LZ4,
            Compression::BloscZstd => BloscCompressor::Zstd,
        };

        let codec = BloscCodec::new(compressor, level, None, shuffle, typesize)
            .map_err(|e| StoreError::Config(e.to_string()))?;

        Ok(Arc::new(codec))
    }
}
