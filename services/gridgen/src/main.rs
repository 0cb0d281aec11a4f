//! Full-disk navigation grid generator.
//!
//! Computes the per-pixel latitude/longitude grids for a chosen output
//! resolution and optionally persists them, quantized to int16, in a
//! compressed grid store for downstream georeferencing consumers.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use grid_store::{Compression, GridStoreWriter, StoreConfig};
use navgrid::{compute_scale_offset, pack, GridGenerator, PACK_BITS};

#[derive(Parser, Debug)]
#[command(name = "gridgen")]
#[command(about = "Full-disk lat/lon navigation grid generator")]
struct Args {
    /// Output resolution in km per pixel (0.5, 1.0, 2.0, 4.0, 10.0)
    #[arg(short, long, default_value = "2.0")]
    resolution: String,

    /// Destination directory for the packed grid store; omit to compute
    /// in memory without persisting
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Chunk edge length for the stored arrays
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Compression codec (none, blosc_lz4, blosc_zstd)
    #[arg(long)]
    compression: Option<String>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let generator = GridGenerator::goes_east();

    if generator.table().lookup(&args.resolution).is_err() {
        let supported: Vec<_> = generator.table().labels().collect();
        anyhow::bail!(
            "unsupported resolution '{}'; supported: {}",
            args.resolution,
            supported.join(", ")
        );
    }

    info!(resolution = %args.resolution, "building navigation grid");
    let start = Instant::now();
    let grid = generator.build_grid(&args.resolution)?;

    let (lines, columns) = grid.shape();
    info!(
        lines,
        columns,
        valid_cells = grid.lat.valid_count(),
        elapsed_s = start.elapsed().as_secs_f64(),
        "navigation grid ready"
    );

    let center = lines / 2;
    if grid.lat.is_valid(center, center) {
        info!(
            lat = grid.lat.get(center, center),
            lon = grid.lon.get(center, center),
            "center cell coordinates"
        );
    }

    let Some(output) = args.output else {
        info!("no output path given; grids were not persisted");
        return Ok(());
    };

    let mut config = StoreConfig::from_env();
    if let Some(chunk_size) = args.chunk_size {
        config.chunk_size = chunk_size;
    }
    if let Some(compression) = &args.compression {
        config.compression = Compression::from_str(compression);
    }
    config.validate()?;

    let lat_scale_offset =
        compute_scale_offset(&grid.lat, PACK_BITS).context("quantizing latitude")?;
    let lon_scale_offset =
        compute_scale_offset(&grid.lon, PACK_BITS).context("quantizing longitude")?;
    info!(
        scale = lat_scale_offset.scale,
        offset = lat_scale_offset.offset,
        "latitude packing parameters"
    );
    info!(
        scale = lon_scale_offset.scale,
        offset = lon_scale_offset.offset,
        "longitude packing parameters"
    );

    let lat_packed = pack(&grid.lat, lat_scale_offset);
    let lon_packed = pack(&grid.lon, lon_scale_offset);

    let compression = config.compression;
    let writer = GridStoreWriter::new(config);
    let result = writer
        .write_to_path(&output, &lat_packed, &lon_packed)
        .with_context(|| format!("writing grid store to {}", output.display()))?;

    info!(
        path = %output.display(),
        bytes = result.bytes_written,
        %compression,
        "packed grids written"
    );

    Ok(())
}
