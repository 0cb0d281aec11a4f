//! Coordinate grid value types.
//!
//! A [`CoordinateGrid`] holds one geographic coordinate field (latitude or
//! longitude) for every pixel of a sensor grid, stored row-major. Cells that
//! fall outside the visible Earth disk carry `f64::NAN` as the invalid
//! sentinel rather than any numeric value.

use crate::error::{GeolocError, GeolocResult};

/// A 2-D field of f64 coordinate values with NaN marking invalid cells.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateGrid {
    lines: usize,
    columns: usize,
    /// Row-major: `values[line * columns + column]`.
    values: Vec<f64>,
}

impl CoordinateGrid {
    /// Build a grid from row-major values, checking the shape.
    pub fn from_values(lines: usize, columns: usize, values: Vec<f64>) -> GeolocResult<Self> {
        if values.len() != lines * columns {
            return Err(GeolocError::InvalidGrid(format!(
                "expected {}x{} = {} values, got {}",
                lines,
                columns,
                lines * columns,
                values.len()
            )));
        }
        Ok(Self {
            lines,
            columns,
            values,
        })
    }

    /// Number of lines (rows).
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total cell count.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the grid has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at (line, column). Panics on out-of-range indices.
    pub fn get(&self, line: usize, column: usize) -> f64 {
        assert!(line < self.lines && column < self.columns);
        self.values[line * self.columns + column]
    }

    /// Whether the cell at (line, column) holds a valid coordinate.
    pub fn is_valid(&self, line: usize, column: usize) -> bool {
        self.get(line, column).is_finite()
    }

    /// The raw row-major values, invalid cells included.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterator over valid (finite) cell values only.
    pub fn valid_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied().filter(|v| v.is_finite())
    }

    /// Number of valid cells.
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_finite()).count()
    }
}

/// The latitude/longitude grid pair produced by one generation run.
#[derive(Debug, Clone)]
pub struct LatLonGrid {
    pub lat: CoordinateGrid,
    pub lon: CoordinateGrid,
}

impl LatLonGrid {
    /// Grid shape as (lines, columns); both fields always agree.
    pub fn shape(&self) -> (usize, usize) {
        (self.lat.lines(), self.lat.columns())
    }
}
