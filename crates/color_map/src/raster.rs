//! CPU materialization of a [`ColorMap`] into an RGBA8 pixel buffer.
//!
//! Pixel `(x, y)` samples the map at `(x / (width - 1), y / (height - 1))`, so the
//! corner pixels land exactly on the corners of the unit square. An axis that is one
//! pixel wide samples coordinate `0`.
use glam::Vec2;
use tracing::warn;

use crate::error::{Error, Result};
use crate::map::{Color8, ColorMap};

/// Configuration for filling a [`ColorRaster`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct RasterConfig {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Mark key positions with their own color and a black ring.
    pub draw_keys: bool,
    /// Distance below which a pixel shows the nearest key's color.
    pub key_radius: f32,
    /// Distance below which a pixel is part of the black ring.
    pub key_outline: f32,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            draw_keys: false,
            key_radius: 0.01,
            key_outline: 0.015,
        }
    }
}

impl RasterConfig {
    /// Creates a new [`RasterConfig`] with the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Enables or disables the key overlay.
    pub fn with_key_overlay(mut self, draw_keys: bool) -> Self {
        self.draw_keys = draw_keys;
        self
    }

    /// Sets the key dot radius and ring radius, in unit-square distance.
    pub fn with_key_radius(mut self, key_radius: f32, key_outline: f32) -> Self {
        self.key_radius = key_radius;
        self.key_outline = key_outline;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig("width and height must be > 0".into()));
        }
        if !(self.key_radius.is_finite() && self.key_radius >= 0.0) {
            return Err(Error::InvalidConfig(
                "key_radius must be finite and >= 0".into(),
            ));
        }
        if !(self.key_outline.is_finite() && self.key_outline >= self.key_radius) {
            return Err(Error::InvalidConfig(
                "key_outline must be finite and >= key_radius".into(),
            ));
        }
        Ok(())
    }
}

/// A row-major RGBA8 image; the fourth channel is alpha.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorRaster {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color8>,
}

impl ColorRaster {
    /// Creates a transparent black raster.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color8::default(); width as usize * height as usize],
        }
    }

    /// Get the pixel at `(x, y)`, or `None` if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Unit-square position sampled by pixel `(x, y)`.
    pub fn sample_position(&self, x: u32, y: u32) -> Vec2 {
        Vec2::new(axis_coord(x, self.width), axis_coord(y, self.height))
    }

    /// Pixels as tightly packed RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels
            .resize(width as usize * height as usize, Color8::default());
    }
}

#[inline]
fn axis_coord(i: u32, len: u32) -> f32 {
    if len <= 1 {
        0.0
    } else {
        i as f32 / (len - 1) as f32
    }
}

/// Fills a new raster from `map`.
pub fn fill_raster(map: &ColorMap, config: &RasterConfig) -> Result<ColorRaster> {
    let mut raster = ColorRaster::new(0, 0);
    fill_raster_into(map, config, &mut raster)?;
    Ok(raster)
}

/// Fills `raster` from `map`, resizing it to the configured size.
pub fn fill_raster_into(
    map: &ColorMap,
    config: &RasterConfig,
    raster: &mut ColorRaster,
) -> Result<()> {
    config.validate()?;
    if map.is_empty() {
        warn!("Color map is empty; raster is filled with the sentinel color.");
    }

    raster.resize(config.width, config.height);
    let draw_keys = config.draw_keys && !map.is_empty();

    for y in 0..config.height {
        for x in 0..config.width {
            let p = raster.sample_position(x, y);
            let mut color = map.color8_at(p);
            if draw_keys {
                let nearest = &map[map.nearest(p)?];
                let dist = nearest.position().distance(p);
                if dist < config.key_radius {
                    color = nearest.color();
                } else if dist < config.key_outline {
                    color = Color8::BLACK;
                }
            }
            raster.pixels[y as usize * config.width as usize + x as usize] = color;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_key_map() -> ColorMap {
        let mut map = ColorMap::new();
        map.add(Vec2::new(0.0, 0.0), Color8::rgb(255, 0, 0)).unwrap();
        map.add(Vec2::new(1.0, 1.0), Color8::new(0, 0, 255, 200))
            .unwrap();
        map
    }

    #[test]
    fn validate_rejects_bad_configs() {
        assert!(RasterConfig::new(0, 4).validate().is_err());
        assert!(RasterConfig::new(4, 0).validate().is_err());
        assert!(RasterConfig::new(4, 4)
            .with_key_radius(0.02, 0.01)
            .validate()
            .is_err());
        assert!(RasterConfig::new(4, 4)
            .with_key_radius(f32::NAN, 0.01)
            .validate()
            .is_err());
        assert!(RasterConfig::default().validate().is_ok());
    }

    #[test]
    fn fill_raster_propagates_invalid_config() {
        assert!(matches!(
            fill_raster(&two_key_map(), &RasterConfig::new(0, 0)),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn empty_map_fills_with_sentinel() {
        let raster = fill_raster(&ColorMap::new(), &RasterConfig::new(3, 2)).unwrap();
        assert_eq!(raster.pixels.len(), 6);
        assert!(raster
            .pixels
            .iter()
            .all(|c| *c == Color8::new(255, 0, 255, 255)));
    }

    #[test]
    fn corners_sample_the_unit_square_corners() {
        let raster = fill_raster(&two_key_map(), &RasterConfig::new(8, 8)).unwrap();
        assert_eq!(raster.sample_position(7, 7), Vec2::ONE);
        assert_eq!(raster.pixel(0, 0), Some(Color8::rgb(255, 0, 0)));
        assert_eq!(raster.pixel(7, 7), Some(Color8::rgb(0, 0, 255)));
        assert_eq!(raster.pixel(8, 0), None);
    }

    #[test]
    fn single_pixel_axis_samples_origin() {
        let raster = fill_raster(&two_key_map(), &RasterConfig::new(1, 1)).unwrap();
        assert_eq!(raster.sample_position(0, 0), Vec2::ZERO);
        assert_eq!(raster.pixel(0, 0), Some(Color8::rgb(255, 0, 0)));
    }

    #[test]
    fn key_overlay_draws_key_color_and_ring() {
        let config = RasterConfig::new(101, 101)
            .with_key_overlay(true)
            .with_key_radius(0.005, 0.025);
        let raster = fill_raster(&two_key_map(), &config).unwrap();
        // On the key: the key's own color including its weight.
        assert_eq!(raster.pixel(100, 100), Some(Color8::new(0, 0, 255, 200)));
        // 0.01 away from the key: inside the ring.
        assert_eq!(raster.pixel(99, 100), Some(Color8::BLACK));
        // Far from both keys: plain interpolation.
        let mid = raster.pixel(50, 50).unwrap();
        assert_eq!(mid.weight, 255);
        assert!(mid.r > 0 && mid.b > 0);
    }

    #[test]
    fn fill_into_reuses_and_resizes() {
        let map = two_key_map();
        let mut raster = ColorRaster::new(2, 2);
        fill_raster_into(&map, &RasterConfig::new(4, 3), &mut raster).unwrap();
        assert_eq!((raster.width, raster.height), (4, 3));
        assert_eq!(raster.as_bytes().len(), 4 * 3 * 4);
        assert_eq!(raster, fill_raster(&map, &RasterConfig::new(4, 3)).unwrap());
    }
}
