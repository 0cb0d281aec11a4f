//! Geostationary satellite projection.
//!
//! Models the view from a satellite fixed above the equator. Positions on the
//! sensor plane are expressed in meters from the sub-satellite point and map
//! to scan angles by dividing by the satellite's perspective height.
//!
//! Reference: GOES-R Product Definition and Users' Guide (PUG) Volume 4

/// Geostationary projection definition.
///
/// Immutable once constructed; shared by reference for the whole run.
#[derive(Debug, Clone)]
pub struct GeosProjection {
    /// Satellite height above the reference ellipsoid surface (meters).
    pub perspective_height: f64,
    /// Semi-major axis of the reference ellipsoid (meters).
    pub semi_major_axis: f64,
    /// Semi-minor axis of the reference ellipsoid (meters).
    pub semi_minor_axis: f64,
    /// Flattening of the reference ellipsoid.
    pub flattening: f64,
    /// Latitude of the sub-satellite point (degrees); 0 for geostationary orbits.
    pub reference_latitude: f64,
    /// Longitude of the sub-satellite point (degrees).
    pub reference_longitude: f64,
    /// Sweep angle axis: true for "x" (GOES-R), false for "y" (Meteosat/Himawari).
    pub sweep_x: bool,

    /// Satellite distance from Earth center (meters): perspective_height + semi_major_axis.
    h: f64,
    /// Sub-satellite longitude in radians.
    lambda_0: f64,
    /// (semi_major / semi_minor)^2, precomputed for the inverse.
    ratio_sq: f64,
}

impl GeosProjection {
    /// Create a projection from explicit geostationary parameters.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        perspective_height: f64,
        semi_major_axis: f64,
        semi_minor_axis: f64,
        flattening: f64,
        reference_latitude: f64,
        reference_longitude: f64,
        sweep_x: bool,
    ) -> Self {
        Self {
            perspective_height,
            semi_major_axis,
            semi_minor_axis,
            flattening,
            reference_latitude,
            reference_longitude,
            sweep_x,
            h: perspective_height + semi_major_axis,
            lambda_0: reference_longitude.to_radians(),
            ratio_sq: (semi_major_axis / semi_minor_axis).powi(2),
        }
    }

    /// The GOES-East viewing geometry at 75°W over the GRS80-compatible ellipsoid.
    pub fn goes_east() -> Self {
        Self::new(
            35786023.0,            // perspective_height
            6378137.0,             // semi_major_axis
            6356752.31414,         // semi_minor_axis
            0.00335281068119356027, // flattening
            0.0,                   // reference_latitude
            -75.0,                 // reference_longitude
            true,                  // x-axis sweep
        )
    }

    /// Convert sensor-plane coordinates (meters from the sub-satellite point)
    /// to geographic coordinates (lon, lat in degrees).
    ///
    /// Returns None when the point does not intersect the visible Earth disk.
    #[inline]
    pub fn plane_to_geo(&self, x_m: f64, y_m: f64) -> Option<(f64, f64)> {
        self.scan_to_geo(x_m / self.perspective_height, y_m / self.perspective_height)
    }

    /// Convert scan angles (radians) to geographic coordinates (lon, lat degrees).
    ///
    /// Based on GOES-R PUG Volume 4, Section 4.2.8, generalized to both sweep
    /// conventions through the viewing direction vector.
    /// Returns None if the scan angle points to space (off Earth).
    pub fn scan_to_geo(&self, x_rad: f64, y_rad: f64) -> Option<(f64, f64)> {
        if !x_rad.is_finite() || !y_rad.is_finite() {
            return None;
        }

        let sin_x = x_rad.sin();
        let cos_x = x_rad.cos();
        let sin_y = y_rad.sin();
        let cos_y = y_rad.cos();

        // Unit direction from the satellite toward the scanned point.
        // The sweep axis decides which angle is the outer gimbal.
        let (vx, vy, vz) = if self.sweep_x {
            (cos_x * cos_y, -sin_x, cos_x * sin_y)
        } else {
            (cos_x * cos_y, -sin_x * cos_y, sin_y)
        };

        // Looking away from the Earth half-space: never visible.
        if vx <= 0.0 {
            return None;
        }

        // Quadratic coefficients for the distance to the ellipsoid surface
        let a = vx * vx + vy * vy + self.ratio_sq * vz * vz;
        let b = -2.0 * self.h * vx;
        let c = self.h * self.h - self.semi_major_axis * self.semi_major_axis;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None; // Scan angle points to space
        }

        // Near intersection: the visible side of the ellipsoid.
        let rs = (-b - discriminant.sqrt()) / (2.0 * a);
        let sx = rs * vx;
        let sy = rs * vy;
        let sz = rs * vz;

        // Convert to geodetic coordinates
        let lat = (self.ratio_sq * sz / (self.h - sx).hypot(sy)).atan();
        let lon = self.lambda_0 - sy.atan2(self.h - sx);

        Some((lon.to_degrees(), lat.to_degrees()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nadir_maps_to_sub_satellite_point() {
        let proj = GeosProjection::goes_east();

        let (lon, lat) = proj.scan_to_geo(0.0, 0.0).expect("nadir must be visible");
        assert!(
            (lon - (-75.0)).abs() < 1e-9,
            "nadir longitude should be -75, got {}",
            lon
        );
        assert!(lat.abs() < 1e-9, "nadir latitude should be 0, got {}", lat);

        // Plane meters and scan angles agree at the origin
        let (lon_m, lat_m) = proj.plane_to_geo(0.0, 0.0).unwrap();
        assert_eq!((lon_m, lat_m), (lon, lat));
    }

    #[test]
    fn test_visible_points_in_geographic_ranges() {
        let proj = GeosProjection::goes_east();

        for &(x, y) in &[(0.05, 0.05), (-0.1, 0.02), (0.0, -0.14), (0.12, -0.08)] {
            let (lon, lat) = proj
                .scan_to_geo(x, y)
                .unwrap_or_else(|| panic!("({}, {}) should be on the disk", x, y));
            assert!((-180.0..=180.0).contains(&lon), "bad longitude {}", lon);
            assert!((-90.0..=90.0).contains(&lat), "bad latitude {}", lat);
        }
    }

    #[test]
    fn test_off_disk_returns_none() {
        let proj = GeosProjection::goes_east();

        // Beyond the Earth's limb (~0.1518 rad from nadir)
        assert!(proj.scan_to_geo(0.1519, 0.0).is_none());
        assert!(proj.scan_to_geo(0.0, 0.1519).is_none());
        assert!(proj.scan_to_geo(0.5, 0.5).is_none());
        // Pointing away from the Earth entirely
        assert!(proj.scan_to_geo(std::f64::consts::PI, 0.0).is_none());
        // Non-finite inputs are invalid, not a crash
        assert!(proj.scan_to_geo(f64::NAN, 0.0).is_none());
        assert!(proj.scan_to_geo(0.0, f64::INFINITY).is_none());
    }

    #[test]
    fn test_northern_scan_gives_northern_latitude() {
        let proj = GeosProjection::goes_east();

        let (_, lat_north) = proj.scan_to_geo(0.0, 0.05).unwrap();
        let (_, lat_south) = proj.scan_to_geo(0.0, -0.05).unwrap();
        assert!(lat_north > 0.0 && lat_south < 0.0);
        assert!((lat_north + lat_south).abs() < 1e-9, "symmetric about the equator");

        let (lon_east, _) = proj.scan_to_geo(0.05, 0.0).unwrap();
        assert!(lon_east > -75.0, "positive x scans east of nadir");
    }

    #[test]
    fn test_sweep_conventions_agree_on_axes() {
        let x_sweep = GeosProjection::goes_east();
        let y_sweep = GeosProjection::new(
            35786023.0,
            6378137.0,
            6356752.31414,
            0.00335281068119356027,
            0.0,
            -75.0,
            false,
        );

        // With one angle zero the gimbal order does not matter
        for &(x, y) in &[(0.1, 0.0), (0.0, 0.1), (-0.07, 0.0)] {
            let a = x_sweep.scan_to_geo(x, y).unwrap();
            let b = y_sweep.scan_to_geo(x, y).unwrap();
            assert!((a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9);
        }

        // Off-axis the conventions diverge
        let a = x_sweep.scan_to_geo(0.1, 0.1).unwrap();
        let b = y_sweep.scan_to_geo(0.1, 0.1).unwrap();
        assert!((a.0 - b.0).abs() > 1e-6 || (a.1 - b.1).abs() > 1e-6);
    }

    #[test]
    fn test_plane_scaling_matches_perspective_height() {
        let proj = GeosProjection::goes_east();

        let from_plane = proj.plane_to_geo(0.05 * 35786023.0, 0.02 * 35786023.0).unwrap();
        let from_scan = proj.scan_to_geo(0.05, 0.02).unwrap();
        assert!((from_plane.0 - from_scan.0).abs() < 1e-9);
        assert!((from_plane.1 - from_scan.1).abs() < 1e-9);
    }
}
