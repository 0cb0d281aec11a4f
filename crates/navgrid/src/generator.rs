//! Builds the per-pixel latitude/longitude grids.

use tracing::debug;

use geoloc_common::{CoordinateGrid, GeolocResult, LatLonGrid};
use projection::PlaneToGeographic;

use crate::geometry::GeometryTable;

/// Generates full-disk coordinate grids from scan geometry and the
/// geostationary transform.
///
/// Pure and deterministic: the same resolution always yields bit-identical
/// grids. No I/O happens here.
#[derive(Debug, Clone)]
pub struct GridGenerator {
    table: GeometryTable,
    transform: PlaneToGeographic,
}

impl GridGenerator {
    pub fn new(table: GeometryTable, transform: PlaneToGeographic) -> Self {
        Self { table, transform }
    }

    /// Generator for the GOES-East full-disk geometry over WGS84.
    pub fn goes_east() -> Self {
        Self::new(GeometryTable::full_disk(), PlaneToGeographic::goes_east_wgs84())
    }

    /// The geometry table this generator reads from.
    pub fn table(&self) -> &GeometryTable {
        &self.table
    }

    /// Build the latitude and longitude grids for a resolution label.
    ///
    /// Cells outside the visible Earth disk are NaN in both fields; a cell is
    /// never valid in one field and invalid in the other.
    pub fn build_grid(&self, resolution: &str) -> GeolocResult<LatLonGrid> {
        let profile = self.table.lookup(resolution)?;
        let h = self.transform.projection().perspective_height;

        debug!(
            resolution,
            lines = profile.lines,
            columns = profile.columns,
            "building navigation grid"
        );

        // Index -> scan angle -> plane meters, per axis. The line angle sign
        // is inverted: scanning runs top-to-bottom while the projection
        // y-axis increases upward.
        let x_plane: Vec<f64> = (0..profile.columns)
            .map(|i| ((i as f64 * profile.scan_scale) - profile.scan_offset) * h)
            .collect();
        let y_plane: Vec<f64> = (0..profile.lines)
            .map(|j| ((j as f64 * -profile.scan_scale) + profile.scan_offset) * h)
            .collect();

        // Cartesian product, lines outer / columns inner, matching the
        // row-major layout of the output grids.
        let cells = profile.lines * profile.columns;
        let mut x_flat = Vec::with_capacity(cells);
        let mut y_flat = Vec::with_capacity(cells);
        for &y in &y_plane {
            for &x in &x_plane {
                x_flat.push(x);
                y_flat.push(y);
            }
        }

        let (mut lon, mut lat) = self.transform.transform_forward(&x_flat, &y_flat)?;

        // Mask both fields wherever either came back non-finite, keeping the
        // validity masks aligned cell-for-cell.
        let mut masked = 0usize;
        for i in 0..cells {
            if !(lat[i].is_finite() && lon[i].is_finite()) {
                lat[i] = f64::NAN;
                lon[i] = f64::NAN;
                masked += 1;
            }
        }

        debug!(
            resolution,
            valid = cells - masked,
            masked,
            "navigation grid transform complete"
        );

        Ok(LatLonGrid {
            lat: CoordinateGrid::from_values(profile.lines, profile.columns, lat)?,
            lon: CoordinateGrid::from_values(profile.lines, profile.columns, lon)?,
        })
    }
}
