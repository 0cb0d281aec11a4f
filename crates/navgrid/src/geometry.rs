//! Fixed full-disk scan geometry per output resolution.
//!
//! The scale and offset values are calibration constants of the instrument,
//! published with the sensor definition. They are hard-coded exactly as
//! published: grids derived from them are only reproducible bit-for-bit if
//! the constants are never re-derived or rounded.

use geoloc_common::{GeolocError, GeolocResult};

/// Scan geometry for one output resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolutionProfile {
    /// Resolution label in kilometers per pixel, e.g. "2.0".
    pub label: &'static str,
    /// Number of grid lines (rows).
    pub lines: usize,
    /// Number of grid columns.
    pub columns: usize,
    /// Scan angle step per pixel (radians).
    pub scan_scale: f64,
    /// Scan angle of the grid origin from nadir (radians).
    pub scan_offset: f64,
}

/// Full-disk geometry for every supported resolution.
const FULL_DISK: &[ResolutionProfile] = &[
    ResolutionProfile {
        label: "0.5",
        lines: 21696,
        columns: 21696,
        scan_scale: 0.000014,
        scan_offset: 0.151865,
    },
    ResolutionProfile {
        label: "1.0",
        lines: 10848,
        columns: 10848,
        scan_scale: 0.000028,
        scan_offset: 0.151858,
    },
    ResolutionProfile {
        label: "2.0",
        lines: 5424,
        columns: 5424,
        scan_scale: 0.000056,
        scan_offset: 0.151844,
    },
    ResolutionProfile {
        label: "4.0",
        lines: 2712,
        columns: 2712,
        scan_scale: 0.000112,
        scan_offset: 0.151816,
    },
    ResolutionProfile {
        label: "10.0",
        lines: 1086,
        columns: 1086,
        scan_scale: 0.000280,
        scan_offset: 0.151900,
    },
];

/// Read-only lookup of scan geometry by resolution label.
///
/// Constructed once at startup and passed explicitly to the grid generator;
/// not extensible at runtime.
#[derive(Debug, Clone)]
pub struct GeometryTable {
    profiles: &'static [ResolutionProfile],
}

impl GeometryTable {
    /// The full-disk geometry table.
    pub fn full_disk() -> Self {
        Self {
            profiles: FULL_DISK,
        }
    }

    /// Look up the profile for a resolution label.
    pub fn lookup(&self, label: &str) -> GeolocResult<&ResolutionProfile> {
        self.profiles
            .iter()
            .find(|p| p.label == label)
            .ok_or_else(|| GeolocError::UnsupportedResolution(label.to_string()))
    }

    /// Supported resolution labels, coarsest last.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.profiles.iter().map(|p| p.label)
    }
}
