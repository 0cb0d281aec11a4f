//! Geographic coordinate reference description.

/// The geographic (lat/lon) reference a transform targets.
///
/// Purely descriptive: the geostationary inverse produces geodetic coordinates
/// on whatever ellipsoid its radii describe, so a transform is only coherent
/// when the projection ellipsoid matches this reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeographicCrs {
    /// Ellipsoid name, e.g. "WGS84".
    pub ellipsoid: &'static str,
    /// Datum name, e.g. "WGS84".
    pub datum: &'static str,
}

impl GeographicCrs {
    /// The WGS84 ellipsoid and datum.
    pub fn wgs84() -> Self {
        Self {
            ellipsoid: "WGS84",
            datum: "WGS84",
        }
    }
}
