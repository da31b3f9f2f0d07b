//! Per-tick orchestration of the map core.
//!
//! A periodic timer in the hosting application obtains a GPS fix and calls
//! [`MapEngine::update`]. Within one tick the order is fixed: focus update,
//! container recompute, conditional tile reload with track replay, then the
//! point-filter push. Track segment validity depends on the clip rectangle
//! recomputed earlier in the same tick, so this order must not change.

use crate::core::bounds::PixelRect;
use crate::core::config::MapConfig;
use crate::core::converter::MapConverter;
use crate::core::geo::{GeoPoint, PixelPoint};
use crate::tiles::container::TileContainer;
use crate::tiles::path::TilePath;
use crate::track::line_filter::{LineEvent, TrackLineFilter};
use crate::track::point_filter::TrackPointFilter;
use crate::Result;
use std::time::Duration;

/// One fix from the positioning collaborator.
///
/// The core performs geometric conversion only; fix validity and accuracy
/// are the collaborator's concern. Speed, trip distance, and trip time pass
/// through untouched for the info panel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GpsFix {
    pub longitude: f64,
    pub latitude: f64,
    /// Heading in degrees, clockwise from north
    pub course: f32,
    pub speed_kph: f32,
    /// Trip distance in meters
    pub single_distance: f64,
    pub single_time: Duration,
}

impl GpsFix {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.longitude, self.latitude)
    }
}

/// One tile the renderer must (re)load after a container change
#[derive(Debug, Clone, PartialEq)]
pub struct TileRequest {
    /// Raster-order slot in the tile canvas
    pub index: usize,
    /// Asset to load; missing files are the loader's placeholder case
    pub path: TilePath,
    /// Offset of the tile image within the tile canvas
    pub offset: PixelPoint,
}

/// Everything the renderer needs after one tick
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickUpdate {
    /// Focus position in the map pixel plane
    pub focus: PixelPoint,
    /// Position arrow offset within the tile canvas
    pub focus_offset: PixelPoint,
    /// Viewport top-left offset within the tile canvas; the renderer
    /// shifts the canvas by its negation
    pub container_offset: PixelPoint,
    /// Heading for the position arrow, degrees clockwise from north
    pub heading: f32,
    /// Tiles to (re)load; empty when the covering grid did not move
    pub tiles: Vec<TileRequest>,
    /// Polyline draw events emitted this tick
    pub line_events: Vec<LineEvent>,
}

impl TickUpdate {
    /// Whether this tick requires reloading tile assets
    pub fn needs_reload(&self) -> bool {
        !self.tiles.is_empty()
    }
}

/// Facade owning the converter, the tile container, and both track filters.
///
/// The zoom level lives here as explicit state; hosting pages persist it
/// across visits by reading [`level`](Self::level) on teardown and passing
/// it back through [`set_level`](Self::set_level).
#[derive(Debug)]
pub struct MapEngine {
    converter: MapConverter,
    container: TileContainer,
    point_filter: TrackPointFilter,
    line_filter: TrackLineFilter,
    /// Accepted fixes, kept geographic so replay survives zoom changes
    track: Vec<GeoPoint>,
    tracking: bool,
}

impl MapEngine {
    pub fn new(config: MapConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            converter: MapConverter::new(&config),
            container: TileContainer::new(
                config.tile_size_px,
                config.view_width_px,
                config.view_height_px,
            ),
            point_filter: TrackPointFilter::new(config.track_threshold_px),
            line_filter: TrackLineFilter::new(),
            track: Vec::new(),
            tracking: true,
        })
    }

    /// Applies a zoom selection from the UI slider, clamped into the
    /// configured range.
    ///
    /// A level change invalidates the whole container: pixel coordinates at
    /// the new level share nothing with the old ones, so the next tick
    /// reloads every tile and rebuilds the track from geographic history.
    pub fn set_level(&mut self, level: u8) {
        let previous = self.converter.level();
        self.converter.set_level(level);
        if self.converter.level() != previous {
            log::debug!("zoom {} -> {}", previous, self.converter.level());
            self.container.invalidate();
            self.point_filter.reset();
        }
    }

    pub fn level(&self) -> u8 {
        self.converter.level()
    }

    pub fn level_min(&self) -> u8 {
        self.converter.level_min()
    }

    pub fn level_max(&self) -> u8 {
        self.converter.level_max()
    }

    /// Enables or disables track recording. While disabled, point pushes
    /// are no-ops and no history accumulates.
    pub fn set_tracking(&mut self, tracking: bool) {
        self.tracking = tracking;
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Number of recorded track points
    pub fn track_len(&self) -> usize {
        self.track.len()
    }

    /// Number of tiles in the covering grid
    pub fn tile_count(&self) -> usize {
        self.container.tile_count()
    }

    /// Offset of a pixel-plane point within the tile canvas, for placing
    /// line-event points
    pub fn offset_of(&self, point: &PixelPoint) -> PixelPoint {
        self.container.offset_of(point)
    }

    /// Current covering rectangle without recomputation
    pub fn clip_rect(&self) -> Option<PixelRect> {
        self.line_filter.clip_area()
    }

    /// Drops the recorded track and resets both filters. The emitted
    /// `Reset` event reaches the renderer on the next tick.
    pub fn clear_track(&mut self) {
        self.track.clear();
        self.point_filter.reset();
        self.line_filter.reset();
    }

    /// Runs one update tick against a fresh GPS fix.
    pub fn update(&mut self, fix: &GpsFix) -> TickUpdate {
        // 1. focus update
        let focus = self.converter.convert_coordinate(&fix.position());
        self.container.set_focus(focus);

        // 2. container recompute
        let rect = self.container.container_rect();

        // 3. conditional reload and track reset
        let tiles = if self.container.take_changed() {
            self.reload(rect, focus)
        } else {
            Vec::new()
        };

        // 4. point-filter push
        if self.tracking {
            if let Some(accepted) = self.point_filter.push_point(focus) {
                self.track.push(fix.position());
                self.line_filter.push_point(accepted);
            }
        }

        TickUpdate {
            focus,
            focus_offset: self.container.focus_offset(),
            container_offset: self.container.container_offset(),
            heading: fix.course,
            tiles,
            line_events: self.line_filter.drain_events(),
        }
    }

    /// Builds the tile reload list and replays the track against the new
    /// covering rectangle.
    fn reload(&mut self, rect: PixelRect, focus: PixelPoint) -> Vec<TileRequest> {
        log::debug!(
            "reloading {} tiles, level {}",
            self.container.tile_count(),
            self.converter.level()
        );

        let mut tiles = Vec::with_capacity(self.container.tile_count());
        for index in 0..self.container.tile_count() {
            // tile_cell/tile_pos are Some for every index below tile_count
            let Some((col, row)) = self.container.tile_cell(index) else {
                continue;
            };
            let Some(pos) = self.container.tile_pos(index) else {
                continue;
            };
            tiles.push(TileRequest {
                index,
                path: self.converter.tile_path(col, row),
                offset: self.container.offset_of(&pos),
            });
        }

        self.line_filter.set_clip_area(rect);
        self.line_filter.reset();
        if self.tracking {
            for geo in &self.track {
                let pixel = self.converter.convert_coordinate(geo);
                self.line_filter.push_point(pixel);
            }
            self.line_filter.push_point(focus);
            self.line_filter.push_end();
        }

        tiles
    }
}
