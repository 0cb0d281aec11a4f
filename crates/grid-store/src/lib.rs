//! Persistence for packed navigation grids.
//!
//! A grid store is a Zarr V3 hierarchy holding two compressed int16 arrays,
//! `lat` and `lon`, each carrying `scale_factor` and `add_offset` attributes
//! for dequantization (`value = stored * scale_factor + add_offset`) and a
//! `fill_value` attribute documenting the mask sentinel.

pub mod config;
pub mod error;
pub mod reader;
pub mod writer;

pub use config::{Compression, StoreConfig};
pub use error::{Result, StoreError};
pub use reader::{GridStoreReader, StoredField};
pub use writer::{GridStoreWriter, StoreWriteResult};
