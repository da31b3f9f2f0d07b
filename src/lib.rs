//! # trailmap
//!
//! Coordinate/tile addressing and GPS track rendering core for an offline,
//! tile-based map viewer.
//!
//! The crate converts geographic coordinates into a pyramided tile-pixel
//! plane, determines which tile files cover the viewport around a moving
//! focus point, and filters a live stream of GPS samples into renderable
//! polyline events. Rendering, image decoding, and storage are external
//! collaborators: they supply a [`GpsFix`], request tiles by path, and draw
//! line segments at the pixel offsets this crate computes.

pub mod core;
pub mod engine;
pub mod tiles;
pub mod track;

// Re-export public API
pub use crate::core::{
    bounds::PixelRect,
    config::MapConfig,
    converter::MapConverter,
    geo::{GeoPoint, PixelPoint},
};

pub use crate::tiles::{
    container::TileContainer,
    path::{FileTileSource, TilePath, TileSource},
};

pub use crate::track::{
    line_filter::{LineEvent, TrackLineFilter},
    point_filter::TrackPointFilter,
};

pub use crate::engine::{GpsFix, MapEngine, TickUpdate, TileRequest};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error type alias for convenience
pub type Error = MapError;
