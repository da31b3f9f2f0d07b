//! Covering-grid computation for the viewport.
//!
//! The container is the grid of tiles that must be resident to draw the
//! viewport around the focus point. Per axis it holds enough whole tiles to
//! cover half a viewport on each side of the focus tile, so panning within
//! a tile never exposes a gap. The grid is rebuilt whole whenever the focus
//! crosses a tile boundary; it is never patched incrementally.

use crate::core::bounds::PixelRect;
use crate::core::geo::PixelPoint;

/// Tracks which tiles cover the viewport around the current focus point.
///
/// Tiles are indexed row-major: index 0 is the top-left tile, indices run
/// left-to-right then top-to-bottom. Downstream loaders iterate by index and
/// rely on this raster order staying stable.
#[derive(Debug, Clone)]
pub struct TileContainer {
    tile_size: u32,
    view_width: u32,
    view_height: u32,
    cols: u32,
    rows: u32,
    focus: PixelPoint,
    rect: PixelRect,
    last_origin: Option<PixelPoint>,
    changed: bool,
}

impl TileContainer {
    pub fn new(tile_size: u32, view_width: u32, view_height: u32) -> Self {
        // Per axis: the focus tile plus enough tiles on each side to cover
        // half a viewport. The count is always odd, so centering on the
        // focus tile covers [focus - view/2, focus + view/2] regardless of
        // where the focus sits inside its tile.
        let cols = 2 * view_width.div_ceil(2).div_ceil(tile_size) + 1;
        let rows = 2 * view_height.div_ceil(2).div_ceil(tile_size) + 1;

        let mut container = Self {
            tile_size,
            view_width,
            view_height,
            cols,
            rows,
            focus: PixelPoint::default(),
            rect: PixelRect::default(),
            last_origin: None,
            changed: false,
        };
        container.rect = container.covering_rect();
        container
    }

    /// Updates the focus position. Pure state update; the covering grid is
    /// not recomputed until [`container_rect`](Self::container_rect).
    pub fn set_focus(&mut self, focus: PixelPoint) {
        self.focus = focus;
    }

    pub fn focus(&self) -> PixelPoint {
        self.focus
    }

    /// Number of tiles in the covering grid
    pub fn tile_count(&self) -> usize {
        (self.cols * self.rows) as usize
    }

    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    /// Recomputes and returns the tile-aligned rectangle covering the
    /// viewport around the focus.
    ///
    /// Change detection compares only the top-left tile origin of the new
    /// rectangle against the previous one; the grid size is fixed after
    /// construction, so the single-corner check is sufficient. Sub-tile
    /// focus movement never raises the flag.
    pub fn container_rect(&mut self) -> PixelRect {
        let rect = self.covering_rect();
        let origin = rect.origin();

        if self.last_origin != Some(origin) {
            log::debug!(
                "tile container moved to ({}, {}) [{}x{}]",
                rect.x,
                rect.y,
                rect.width,
                rect.height
            );
            self.changed = true;
            self.last_origin = Some(origin);
        }

        self.rect = rect;
        rect
    }

    /// Whether the covering grid has moved since the last
    /// [`take_changed`](Self::take_changed)
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Returns the change flag and acknowledges it
    pub fn take_changed(&mut self) -> bool {
        let changed = self.changed;
        self.changed = false;
        changed
    }

    /// Forces the next [`container_rect`](Self::container_rect) to report a
    /// change. Used when the zoom level switches and every tile is stale
    /// even though the grid origin may coincide numerically.
    pub fn invalidate(&mut self) {
        self.last_origin = None;
    }

    /// Pixel-plane origin of the tile at `index`, raster order
    pub fn tile_pos(&self, index: usize) -> Option<PixelPoint> {
        let (col, row) = self.tile_cell(index)?;
        Some(PixelPoint::new(
            col * self.tile_size as i32,
            row * self.tile_size as i32,
        ))
    }

    /// Grid-cell coordinates (column, row) of the tile at `index`.
    ///
    /// Cells outside the dataset (negative, or past the pyramid edge) are
    /// returned as-is; the loader treats them as missing tiles.
    pub fn tile_cell(&self, index: usize) -> Option<(i32, i32)> {
        if index >= self.tile_count() {
            return None;
        }
        let base_col = self.rect.x / self.tile_size as i32;
        let base_row = self.rect.y / self.tile_size as i32;
        let col = base_col + (index % self.cols as usize) as i32;
        let row = base_row + (index / self.cols as usize) as i32;
        Some((col, row))
    }

    /// Offset of an arbitrary pixel-plane point relative to the container
    /// origin
    pub fn offset_of(&self, point: &PixelPoint) -> PixelPoint {
        point.subtract(&self.rect.origin())
    }

    /// Offset of the focus point relative to the container origin
    pub fn focus_offset(&self) -> PixelPoint {
        self.offset_of(&self.focus)
    }

    /// Offset of the viewport's top-left corner relative to the container
    /// origin. The renderer shifts the tile canvas by the negation of this.
    pub fn container_offset(&self) -> PixelPoint {
        let view_top_left = PixelPoint::new(
            self.focus.x - self.view_width as i32 / 2,
            self.focus.y - self.view_height as i32 / 2,
        );
        self.offset_of(&view_top_left)
    }

    /// Pixel rectangle of the viewport itself, for track clipping
    pub fn view_rect(&self) -> PixelRect {
        PixelRect::from_center_and_size(
            self.focus,
            self.view_width as i32,
            self.view_height as i32,
        )
    }

    fn covering_rect(&self) -> PixelRect {
        let tile = self.tile_size as i32;
        let focus_col = PixelPoint::tile_floor(self.focus.x, self.tile_size);
        let focus_row = PixelPoint::tile_floor(self.focus.y, self.tile_size);

        // Grid edges are always odd, so the focus tile sits exactly in the
        // middle.
        let left = focus_col - (self.cols as i32 - 1) / 2;
        let top = focus_row - (self.rows as i32 - 1) / 2;

        PixelRect::new(
            left * tile,
            top * tile,
            self.cols as i32 * tile,
            self.rows as i32 * tile,
        )
    }
}
