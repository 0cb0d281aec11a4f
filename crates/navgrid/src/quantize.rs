//! Scale/offset packing of coordinate fields into signed 16-bit integers.
//!
//! A floating field is stretched across the packed range with
//! `scale = (max - min) / (2^bits - 1)` and recentered with
//! `offset = min + 2^(bits-1) * scale`, so that
//! `packed = floor((value - offset) / scale)` spans the full signed range and
//! `value ≈ packed * scale + offset` reconstructs it. Flooring (not rounding)
//! biases reconstruction by up to one `scale` unit toward lower values; the
//! per-cell error is always below `scale`.

use geoloc_common::{CoordinateGrid, GeolocError, GeolocResult};

/// Bit width of the packed representation.
pub const PACK_BITS: u32 = 16;

/// Packed value written for invalid (masked) cells, the conventional fill for
/// 16-bit fields in the downstream format. A valid cell packing into the
/// bucket one step above the field minimum collides with it; no in-range
/// integer avoids that, since the packing spans the full signed range.
pub const PACKED_FILL: i16 = -32767;

/// The linear map between a floating field and its packed form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleOffset {
    pub scale: f64,
    pub offset: f64,
}

/// A coordinate field packed to signed 16-bit integers.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedGrid {
    pub lines: usize,
    pub columns: usize,
    /// Row-major packed values; invalid cells hold [`PACKED_FILL`].
    pub values: Vec<i16>,
    pub scale: f64,
    pub offset: f64,
}

impl PackedGrid {
    /// Packed value at (line, column).
    pub fn get(&self, line: usize, column: usize) -> i16 {
        assert!(line < self.lines && column < self.columns);
        self.values[line * self.columns + column]
    }

    /// Reconstruct the floating field, mapping the fill sentinel back to NaN.
    pub fn unpack(&self) -> CoordinateGrid {
        let values = self
            .values
            .iter()
            .map(|&p| {
                if p == PACKED_FILL {
                    f64::NAN
                } else {
                    dequantize(p, self.scale, self.offset)
                }
            })
            .collect();
        // Shape is preserved by construction
        CoordinateGrid::from_values(self.lines, self.columns, values)
            .expect("packed grid shape is consistent")
    }
}

/// Compute the scale/offset pair that stretches the field's valid range
/// across `2^bits - 1` packing buckets.
///
/// Invalid cells are excluded from the min/max. Fails with
/// [`GeolocError::EmptyGrid`] when no cell is valid. A degenerate range
/// (max == min) gets scale 1.0 so packing never divides by zero and the
/// field packs to a constant integer.
pub fn compute_scale_offset(grid: &CoordinateGrid, bits: u32) -> GeolocResult<ScaleOffset> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut any_valid = false;
    for v in grid.valid_values() {
        any_valid = true;
        min = min.min(v);
        max = max.max(v);
    }
    if !any_valid {
        return Err(GeolocError::EmptyGrid);
    }

    let buckets = 2f64.powi(bits as i32) - 1.0;
    let mut scale = (max - min) / buckets;
    if scale == 0.0 {
        scale = 1.0;
    }
    let offset = min + 2f64.powi(bits as i32 - 1) * scale;

    Ok(ScaleOffset { scale, offset })
}

/// Pack a field with floor semantics: `floor((value - offset) / scale)`,
/// narrowed to i16. Floating rounding can graze the type bounds by one step,
/// so the result is clamped. Invalid cells become [`PACKED_FILL`].
pub fn pack(grid: &CoordinateGrid, scale_offset: ScaleOffset) -> PackedGrid {
    let ScaleOffset { scale, offset } = scale_offset;
    let values = grid
        .values()
        .iter()
        .map(|&v| {
            if v.is_finite() {
                let q = ((v - offset) / scale).floor();
                q.clamp(i16::MIN as f64, i16::MAX as f64) as i16
            } else {
                PACKED_FILL
            }
        })
        .collect();

    PackedGrid {
        lines: grid.lines(),
        columns: grid.columns(),
        values,
        scale,
        offset,
    }
}

/// Reconstruct one packed value: `packed * scale + offset`.
#[inline]
pub fn dequantize(packed: i16, scale: f64, offset: f64) -> f64 {
    packed as f64 * scale + offset
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_grid(lines: usize, columns: usize, lo: f64, hi: f64) -> CoordinateGrid {
        let n = lines * columns;
        let values = (0..n)
            .map(|i| lo + (hi - lo) * i as f64 / (n - 1) as f64)
            .collect();
        CoordinateGrid::from_values(lines, columns, values).unwrap()
    }

    #[test]
    fn test_roundtrip_error_is_bounded_by_scale() {
        let grid = gradient_grid(32, 32, -81.3, 81.3);
        let so = compute_scale_offset(&grid, PACK_BITS).unwrap();
        let packed = pack(&grid, so);
        let restored = packed.unpack();

        for i in 0..grid.len() {
            let original = grid.values()[i];
            let value = restored.values()[i];
            let err = original - value;
            // Floor semantics: reconstruction never overshoots
            assert!(
                err >= -1e-9 && err <= so.scale + 1e-9,
                "cell {}: original {} restored {} (scale {})",
                i,
                original,
                value,
                so.scale
            );
        }
    }

    #[test]
    fn test_packed_values_span_the_signed_range() {
        let grid = gradient_grid(64, 64, -1.0, 1.0);
        let so = compute_scale_offset(&grid, PACK_BITS).unwrap();
        let packed = pack(&grid, so);

        let min = *packed.values.iter().min().unwrap();
        let max = *packed.values.iter().max().unwrap();
        assert!(min <= -32767, "field minimum should pack near -32768, got {}", min);
        assert!(max >= 32766, "field maximum should pack near 32767, got {}", max);
    }

    #[test]
    fn test_invalid_cells_are_excluded_from_range_and_filled() {
        // A tight valid range plus wild invalid cells that must not widen it
        let values = vec![10.0, 10.5, f64::NAN, 11.0, f64::INFINITY, 10.2];
        let grid = CoordinateGrid::from_values(2, 3, values).unwrap();

        let so = compute_scale_offset(&grid, PACK_BITS).unwrap();
        assert!((so.scale - 1.0 / 65535.0).abs() < 1e-12, "scale from valid range only");

        let packed = pack(&grid, so);
        assert_eq!(packed.get(0, 2), PACKED_FILL);
        assert_eq!(packed.get(1, 1), PACKED_FILL);

        let restored = packed.unpack();
        assert!(restored.values()[2].is_nan());
        assert!(restored.values()[4].is_nan());
        assert!((restored.get(0, 0) - 10.0).abs() <= so.scale);
    }

    #[test]
    fn test_degenerate_range_packs_to_a_constant() {
        let grid = CoordinateGrid::from_values(2, 2, vec![42.0; 4]).unwrap();
        let so = compute_scale_offset(&grid, PACK_BITS).unwrap();
        assert_eq!(so.scale, 1.0, "degenerate range must not produce scale 0");

        let packed = pack(&grid, so);
        let first = packed.values[0];
        assert!(packed.values.iter().all(|&v| v == first));
    }

    #[test]
    fn test_empty_grid_is_an_error() {
        let grid = CoordinateGrid::from_values(2, 2, vec![f64::NAN; 4]).unwrap();
        let err = compute_scale_offset(&grid, PACK_BITS);
        assert!(matches!(err, Err(GeolocError::EmptyGrid)));
    }

    #[test]
    fn test_floor_not_round_nearest() {
        // offset chosen so (value - offset) / scale = 0.9: nearest would give
        // 1, floor must give 0
        let so = ScaleOffset {
            scale: 1.0,
            offset: 0.0,
        };
        let grid = CoordinateGrid::from_values(1, 2, vec![0.9, -0.1]).unwrap();
        let packed = pack(&grid, so);
        assert_eq!(packed.values[0], 0);
        assert_eq!(packed.values[1], -1, "floor rounds toward negative infinity");
    }

    #[test]
    fn test_dequantize_formula() {
        assert_eq!(dequantize(0, 0.5, 10.0), 10.0);
        assert_eq!(dequantize(4, 0.5, 10.0), 12.0);
        assert_eq!(dequantize(-4, 0.5, 10.0), 8.0);
    }
}
