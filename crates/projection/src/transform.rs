//! Forward transform from the sensor plane to geographic coordinates.

use rayon::prelude::*;

use geoloc_common::{GeolocError, GeolocResult};

use crate::geographic::GeographicCrs;
use crate::geostationary::GeosProjection;

/// Transform from geostationary plane coordinates (meters) to geographic
/// longitude/latitude (degrees).
///
/// Read-only after construction; safe to share across worker threads.
#[derive(Debug, Clone)]
pub struct PlaneToGeographic {
    projection: GeosProjection,
    target: GeographicCrs,
}

impl PlaneToGeographic {
    pub fn new(projection: GeosProjection, target: GeographicCrs) -> Self {
        Self { projection, target }
    }

    /// GOES-East plane coordinates to WGS84 lat/lon.
    pub fn goes_east_wgs84() -> Self {
        Self::new(GeosProjection::goes_east(), GeographicCrs::wgs84())
    }

    /// The underlying projection definition.
    pub fn projection(&self) -> &GeosProjection {
        &self.projection
    }

    /// The geographic reference the output is expressed in.
    pub fn target(&self) -> &GeographicCrs {
        &self.target
    }

    /// Transform a single plane point, yielding `(NaN, NaN)` for points with
    /// no visible intersection with the Earth disk.
    #[inline]
    pub fn transform_point(&self, x_m: f64, y_m: f64) -> (f64, f64) {
        self.projection
            .plane_to_geo(x_m, y_m)
            .unwrap_or((f64::NAN, f64::NAN))
    }

    /// Transform a batch of plane points.
    ///
    /// Returns `(longitudes, latitudes)` with the same length and order as the
    /// inputs. Off-disk points come back as NaN in both outputs. The per-point
    /// map is stateless, so the batch is fanned out across the rayon pool;
    /// output ordering is exactly the input ordering.
    pub fn transform_forward(&self, x_m: &[f64], y_m: &[f64]) -> GeolocResult<(Vec<f64>, Vec<f64>)> {
        if x_m.len() != y_m.len() {
            return Err(GeolocError::LengthMismatch {
                x: x_m.len(),
                y: y_m.len(),
            });
        }

        let (lon, lat) = x_m
            .par_iter()
            .zip(y_m.par_iter())
            .map(|(&x, &y)| self.transform_point(x, y))
            .unzip();

        Ok((lon, lat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batched_matches_pointwise() {
        let transform = PlaneToGeographic::goes_east_wgs84();
        let h = transform.projection().perspective_height;

        let x: Vec<f64> = vec![0.0, 0.05 * h, -0.1 * h, 0.12 * h, 0.5 * h];
        let y: Vec<f64> = vec![0.0, -0.03 * h, 0.02 * h, 0.1 * h, 0.5 * h];

        let (lon, lat) = transform.transform_forward(&x, &y).unwrap();
        assert_eq!(lon.len(), x.len());
        assert_eq!(lat.len(), x.len());

        for i in 0..x.len() {
            let (plon, plat) = transform.transform_point(x[i], y[i]);
            // NaN != NaN, so compare bit patterns
            assert_eq!(lon[i].to_bits(), plon.to_bits(), "lon order broken at {}", i);
            assert_eq!(lat[i].to_bits(), plat.to_bits(), "lat order broken at {}", i);
        }
    }

    #[test]
    fn test_off_disk_points_are_nan_in_both_outputs() {
        let transform = PlaneToGeographic::goes_east_wgs84();
        let h = transform.projection().perspective_height;

        let (lon, lat) = transform
            .transform_forward(&[0.0, 0.5 * h], &[0.0, 0.5 * h])
            .unwrap();
        assert!(lon[0].is_finite() && lat[0].is_finite());
        assert!(lon[1].is_nan() && lat[1].is_nan());
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let transform = PlaneToGeographic::goes_east_wgs84();
        let err = transform.transform_forward(&[0.0, 1.0], &[0.0]);
        assert!(matches!(err, Err(GeolocError::LengthMismatch { x: 2, y: 1 })));
    }

    #[test]
    fn test_empty_batch() {
        let transform = PlaneToGeographic::goes_east_wgs84();
        let (lon, lat) = transform.transform_forward(&[], &[]).unwrap();
        assert!(lon.is_empty() && lat.is_empty());
    }
}
