//! Reads packed navigation grid pairs back out of a store.

use std::path::Path;
use std::sync::Arc;

use zarrs::array::Array;
use zarrs::array_subset::ArraySubset;
use zarrs::storage::ReadableStorageTraits;
use zarrs_filesystem::FilesystemStore;

use geoloc_common::CoordinateGrid;
use navgrid::dequantize;

use crate::error::{Result, StoreError};

/// One packed field as stored, with its dequantization attributes.
#[derive(Debug, Clone)]
pub struct StoredField {
    pub lines: usize,
    pub columns: usize,
    /// Row-major packed values.
    pub values: Vec<i16>,
    pub scale: f64,
    pub offset: f64,
    /// Sentinel written for masked cells.
    pub fill: i16,
}

impl StoredField {
    /// Reconstruct the floating field: `stored * scale_factor + add_offset`,
    /// with the fill sentinel mapped back to invalid cells.
    pub fn dequantize(&self) -> Result<CoordinateGrid> {
        let values = self
            .values
            .iter()
            .map(|&p| {
                if p == self.fill {
                    f64::NAN
                } else {
                    dequantize(p, self.scale, self.offset)
                }
            })
            .collect();

        CoordinateGrid::from_values(self.lines, self.columns, values)
            .map_err(|e| StoreError::InvalidMetadata(e.to_string()))
    }
}

/// Reader over a grid store holding `lat` and `lon` packed fields.
pub struct GridStoreReader<S: ReadableStorageTraits> {
    storage: Arc<S>,
}

impl GridStoreReader<FilesystemStore> {
    /// Open a filesystem-backed store.
    pub fn open_path(path: &Path) -> Result<Self> {
        let store =
            FilesystemStore::new(path).map_err(|e| StoreError::OpenFailed(e.to_string()))?;
        Ok(Self::new(Arc::new(store)))
    }
}

impl<S: ReadableStorageTraits + 'static> GridStoreReader<S> {
    /// Wrap an already-open storage backend.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Read one named packed field (`lat` or `lon`) with its attributes.
    pub fn read_field(&self, name: &str) -> Result<StoredField> {
        let array = Array::open(self.storage.clone(), &format!("/{}", name))
            .map_err(|e| StoreError::OpenFailed(e.to_string()))?;

        let shape = array.shape();
        if shape.len() != 2 {
            return Err(StoreError::InvalidMetadata(format!(
                "field '{}' has {} dimensions, expected 2",
                name,
                shape.len()
            )));
        }
        let (lines, columns) = (shape[0] as usize, shape[1] as usize);

        let attrs = array.attributes();
        let scale = attrs
            .get("scale_factor")
            .and_then(|v| v.as_f64())
            .ok_or_else(|| {
                StoreError::InvalidMetadata(format!("field '{}' missing scale_factor", name))
            })?;
        let offset = attrs
            .get("add_offset")
            .and_then(|v| v.as_f64())
            .ok_or_else(|| {
                StoreError::InvalidMetadata(format!("field '{}' missing add_offset", name))
            })?;
        let fill = attrs
            .get("fill_value")
            .and_then(|v| v.as_i64())
            .ok_or_else(|| {
                StoreError::InvalidMetadata(format!("field '{}' missing fill_value", name))
            })? as i16;

        let subset =
            ArraySubset::new_with_start_shape(vec![0, 0], vec![lines as u64, columns as u64])
                .map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        let values: Vec<i16> = array
            .retrieve_array_subset_elements(&subset)
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        Ok(StoredField {
            lines,
            columns,
            values,
            scale,
            offset,
            fill,
        })
    }

    /// Read and dequantize both fields, returning (latitude, longitude).
    pub fn read_latlon(&self) -> Result<(CoordinateGrid, CoordinateGrid)> {
        let lat = self.read_field("lat")?.dequantize()?;
        let lon = self.read_field("lon")?.dequantize()?;

        if (lat.lines(), lat.columns()) != (lon.lines(), lon.columns()) {
            return Err(StoreError::ShapeMismatch {
                lat: (lat.lines(), lat.columns()),
                lon: (lon.lines(), lon.columns()),
            });
        }

        Ok((lat, lon))
    }
}
