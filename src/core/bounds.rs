use crate::core::geo::PixelPoint;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in map pixel coordinates.
///
/// Used both for the tile container (always tile-aligned) and for the track
/// clip area. `x`/`y` is the top-left corner; `width`/`height` extend right
/// and down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from a center point and size
    pub fn from_center_and_size(center: PixelPoint, width: i32, height: i32) -> Self {
        Self::new(center.x - width / 2, center.y - height / 2, width, height)
    }

    /// First pixel column past the right edge
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// First pixel row past the bottom edge
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Top-left corner as a point
    pub fn origin(&self) -> PixelPoint {
        PixelPoint::new(self.x, self.y)
    }

    /// Checks if the rectangle contains a point (edges inclusive)
    pub fn contains(&self, point: &PixelPoint) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Checks if the rectangle intersects with another
    pub fn intersects(&self, other: &PixelRect) -> bool {
        !(other.right() < self.x
            || other.x > self.right()
            || other.bottom() < self.y
            || other.y > self.bottom())
    }

    /// Returns the rectangle shifted by the given delta
    pub fn translate(&self, dx: i32, dy: i32) -> PixelRect {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Checks that the rectangle has positive extent
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}
