//! Static configuration for the map core.
//!
//! Everything here is fixed at startup by the hosting application: tile
//! geometry, viewport size, zoom range, and the track decimation threshold.
//! None of it is computed at runtime.

use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Edge length of one square tile in pixels
    pub tile_size_px: u32,
    /// Viewport width in pixels
    pub view_width_px: u32,
    /// Viewport height in pixels
    pub view_height_px: u32,
    /// Minimum pixel distance between two recorded track points
    pub track_threshold_px: f64,
    /// Zoom level applied before the user touches the slider
    pub level_default: u8,
    /// Lowest zoom level present in the tile dataset
    pub level_min: u8,
    /// Highest zoom level present in the tile dataset
    pub level_max: u8,
    /// Directory the tile pyramid lives under
    pub tile_root: String,
    /// File extension of the tile images
    pub tile_ext: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_size_px: 256,
            view_width_px: 480,
            view_height_px: 320,
            track_threshold_px: 2.0,
            level_default: 15,
            level_min: 6,
            level_max: 18,
            tile_root: "/MAP".to_string(),
            tile_ext: "png".to_string(),
        }
    }
}

impl MapConfig {
    /// Checks the configuration preconditions.
    ///
    /// Degenerate geometry (zero tile size, viewport smaller than one tile,
    /// inverted zoom range) is rejected here so per-point operations can
    /// stay total at runtime.
    pub fn validate(&self) -> Result<()> {
        if self.tile_size_px == 0 {
            return Err(MapError::InvalidConfig("tile size must be non-zero".into()));
        }
        if self.view_width_px == 0 || self.view_height_px == 0 {
            return Err(MapError::InvalidConfig("viewport must be non-empty".into()));
        }
        if self.view_width_px < self.tile_size_px || self.view_height_px < self.tile_size_px {
            return Err(MapError::InvalidConfig(format!(
                "viewport {}x{} is smaller than one {} px tile",
                self.view_width_px, self.view_height_px, self.tile_size_px
            )));
        }
        if self.level_min > self.level_max {
            return Err(MapError::InvalidConfig(format!(
                "zoom range [{}, {}] is inverted",
                self.level_min, self.level_max
            )));
        }
        // The pixel plane must fit in i32 coordinates at the deepest level
        // (tile_size * 2^level_max); 256 px tiles top out at level 22.
        let plane_fits = (self.tile_size_px as i64)
            .checked_shl(self.level_max as u32)
            .is_some_and(|size| size <= i32::MAX as i64);
        if !plane_fits {
            return Err(MapError::InvalidConfig(format!(
                "level {} overflows the pixel plane for {} px tiles",
                self.level_max, self.tile_size_px
            )));
        }
        if self.track_threshold_px < 0.0 {
            return Err(MapError::InvalidConfig(
                "track threshold must be non-negative".into(),
            ));
        }
        Ok(())
    }

    /// Default zoom level clamped into the configured range
    pub fn clamped_default_level(&self) -> u8 {
        self.level_default.clamp(self.level_min, self.level_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(MapConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_tile_size_rejected() {
        let config = MapConfig {
            tile_size_px: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_viewport_spans_a_tile() {
        // The default must satisfy its own precondition: at least one tile
        // per axis.
        let config = MapConfig::default();
        assert!(config.view_width_px >= config.tile_size_px);
        assert!(config.view_height_px >= config.tile_size_px);
    }

    #[test]
    fn test_deep_level_max_rejected() {
        // 256 px tiles overflow i32 pixel coordinates past level 22
        let config = MapConfig {
            level_max: 23,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = MapConfig {
            level_max: 22,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_small_viewport_rejected() {
        let config = MapConfig {
            view_width_px: 128,
            view_height_px: 128,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_zoom_range_rejected() {
        let config = MapConfig {
            level_min: 12,
            level_max: 8,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = MapConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: MapConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
