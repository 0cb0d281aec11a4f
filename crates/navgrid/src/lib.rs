//! Full-disk navigation grid generation.
//!
//! Combines the fixed sensor scan geometry with the geostationary projection
//! transform to produce per-pixel latitude/longitude grids, and packs them
//! into a compact 16-bit representation for persistence.

pub mod generator;
pub mod geometry;
pub mod quantize;

pub use generator::GridGenerator;
pub use geometry::{GeometryTable, ResolutionProfile};
pub use quantize::{
    compute_scale_offset, dequantize, pack, PackedGrid, ScaleOffset, PACKED_FILL, PACK_BITS,
};
