//! Shared helpers for the example binaries: logging setup and PNG output.
use std::path::Path;

use anyhow::{ensure, Context};
use color_map::prelude::ColorRaster;
use image::{ImageBuffer, Rgba, RgbaImage};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber honoring `RUST_LOG` (default `info`). Safe to call twice.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Writes a raster as an RGBA PNG.
pub fn save_raster_png(raster: &ColorRaster, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    let image: RgbaImage =
        ImageBuffer::from_raw(raster.width, raster.height, raster.as_bytes().to_vec())
            .context("raster size does not match its pixel buffer")?;
    image
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}

/// Places rasters of equal height side by side, separated by `gap` transparent pixels.
pub fn stack_horizontally(rasters: &[ColorRaster], gap: u32) -> anyhow::Result<ColorRaster> {
    ensure!(!rasters.is_empty(), "nothing to stack");
    let height = rasters[0].height;
    ensure!(
        rasters.iter().all(|r| r.height == height),
        "rasters must share a height"
    );

    let width = rasters.iter().map(|r| r.width).sum::<u32>() + gap * (rasters.len() as u32 - 1);
    let mut out: RgbaImage = ImageBuffer::from_pixel(width, height, Rgba([0, 0, 0, 0]));
    let mut x0 = 0;
    for raster in rasters {
        for y in 0..raster.height {
            for x in 0..raster.width {
                if let Some(c) = raster.pixel(x, y) {
                    out.put_pixel(x0 + x, y, Rgba(c.to_array()));
                }
            }
        }
        x0 += raster.width + gap;
    }

    let pixels = out
        .pixels()
        .map(|p| color_map::prelude::Color8::from(p.0))
        .collect();
    Ok(ColorRaster {
        width,
        height,
        pixels,
    })
}
