//! Geographic-to-pixel conversion at integer zoom levels.
//!
//! The pixel plane follows the slippy-map convention: at level `z` the world
//! spans `tile_size * 2^z` pixels per axis, (0, 0) at the north-west corner,
//! x growing east and y growing south.

use crate::core::config::MapConfig;
use crate::core::geo::{GeoPoint, PixelPoint};
use crate::tiles::path::{FileTileSource, TilePath, TileSource};
use std::f64::consts::PI;
use std::fmt;

/// Converts GPS coordinates into the tile pixel plane and names tile assets.
///
/// Owns the current zoom level; all conversions are deterministic functions
/// of `(input, level)`.
pub struct MapConverter {
    level: u8,
    level_min: u8,
    level_max: u8,
    tile_size: u32,
    source: Box<dyn TileSource>,
}

impl MapConverter {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            level: config.clamped_default_level(),
            level_min: config.level_min,
            level_max: config.level_max,
            tile_size: config.tile_size_px,
            source: Box::new(FileTileSource::new(
                config.tile_root.clone(),
                config.tile_ext.clone(),
            )),
        }
    }

    /// Replaces the tile naming scheme, keeping level state intact
    pub fn with_source(mut self, source: Box<dyn TileSource>) -> Self {
        self.source = source;
        self
    }

    /// Sets the zoom level, clamping out-of-range requests into
    /// `[level_min, level_max]`. Never fails.
    pub fn set_level(&mut self, level: u8) {
        let clamped = level.clamp(self.level_min, self.level_max);
        if clamped != level {
            log::debug!("zoom level {} clamped to {}", level, clamped);
        }
        self.level = clamped;
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn level_min(&self) -> u8 {
        self.level_min
    }

    pub fn level_max(&self) -> u8 {
        self.level_max
    }

    /// Pixel-plane edge length at the current level
    pub fn map_size_px(&self) -> i64 {
        (self.tile_size as i64) << self.level
    }

    /// Projects a GPS coordinate into the pixel plane at the current level.
    ///
    /// Standard Web Mercator: longitude maps linearly to x, latitude through
    /// the Gudermannian to y. Latitude is clamped and longitude wrapped, so
    /// the result is total over all finite inputs.
    pub fn convert_coordinate(&self, point: &GeoPoint) -> PixelPoint {
        let size = self.map_size_px() as f64;
        let lng = GeoPoint::wrap_lng(point.lng);
        let lat_rad = GeoPoint::clamp_lat(point.lat).to_radians();

        let x = (lng + 180.0) / 360.0 * size;
        let y = (1.0 - lat_rad.tan().asinh() / PI) / 2.0 * size;

        PixelPoint::new(x as i32, y as i32)
    }

    /// Names the tile asset for the grid cell `(col, row)` at the current
    /// level. Distinct cells always yield distinct paths.
    pub fn tile_path(&self, col: i32, row: i32) -> TilePath {
        self.source.path(self.level, col, row)
    }
}

impl fmt::Debug for MapConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapConverter")
            .field("level", &self.level)
            .field("level_min", &self.level_min)
            .field("level_max", &self.level_max)
            .field("tile_size", &self.tile_size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn converter_at(level: u8) -> MapConverter {
        let mut conv = MapConverter::new(&MapConfig::default());
        conv.set_level(level);
        conv
    }

    #[test]
    fn test_level_clamped() {
        let mut conv = MapConverter::new(&MapConfig::default());
        conv.set_level(0);
        assert_eq!(conv.level(), conv.level_min());
        conv.set_level(200);
        assert_eq!(conv.level(), conv.level_max());
        conv.set_level(12);
        assert_eq!(conv.level(), 12);
    }

    #[test]
    fn test_projection_deterministic() {
        let conv = converter_at(15);
        let point = GeoPoint::new(116.3913, 39.9075);
        assert_eq!(conv.convert_coordinate(&point), conv.convert_coordinate(&point));
    }

    #[test]
    fn test_projection_monotonic_in_lng() {
        let conv = converter_at(12);
        let mut last_x = i32::MIN;
        for i in 0..100 {
            let lng = -170.0 + i as f64 * 3.4;
            let pixel = conv.convert_coordinate(&GeoPoint::new(lng, 40.0));
            assert!(pixel.x >= last_x, "x regressed at lng {}", lng);
            last_x = pixel.x;
        }
    }

    #[test]
    fn test_projection_monotonic_in_lat() {
        // y grows southward, so increasing latitude must not increase y
        let conv = converter_at(12);
        let mut last_y = i32::MAX;
        for i in 0..100 {
            let lat = -80.0 + i as f64 * 1.6;
            let pixel = conv.convert_coordinate(&GeoPoint::new(10.0, lat));
            assert!(pixel.y <= last_y, "y regressed at lat {}", lat);
            last_y = pixel.y;
        }
    }

    #[test]
    fn test_plane_doubles_per_level() {
        let low = converter_at(10);
        let high = converter_at(11);
        assert_eq!(high.map_size_px(), low.map_size_px() * 2);

        // A fixed coordinate lands at twice the pixel offset one level up
        let point = GeoPoint::new(121.4737, 31.2304);
        let p_low = low.convert_coordinate(&point);
        let p_high = high.convert_coordinate(&point);
        assert!((p_high.x - p_low.x * 2).abs() <= 1);
        assert!((p_high.y - p_low.y * 2).abs() <= 1);
    }

    #[test]
    fn test_equator_meridian_center() {
        let conv = converter_at(10);
        let center = conv.convert_coordinate(&GeoPoint::new(0.0, 0.0));
        let half = (conv.map_size_px() / 2) as i32;
        assert_eq!(center, PixelPoint::new(half, half));
    }

    #[test]
    fn test_tile_path_uses_current_level() {
        let conv = converter_at(14);
        assert_eq!(conv.tile_path(7, 9).to_string(), "/MAP/14/7_9.png");
    }
}
