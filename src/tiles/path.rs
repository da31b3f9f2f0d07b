use std::fmt;

/// A structured reference to one tile image on disk.
///
/// Keeping the path as a value (rather than a formatted string) keeps the
/// grammar testable apart from formatting; `Display` renders the on-disk
/// form `<root>/<level>/<col>_<row>.<ext>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TilePath {
    pub root: String,
    pub level: u8,
    pub col: i32,
    pub row: i32,
    pub ext: String,
}

impl fmt::Display for TilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}_{}.{}",
            self.root, self.level, self.col, self.row, self.ext
        )
    }
}

/// Trait representing anything that can name a tile asset for a grid cell.
///
/// The default dataset layout is [`FileTileSource`]; alternate datasets
/// (different directory grammar, different extension) implement this trait.
pub trait TileSource: Send + Sync {
    /// Build the path for the tile at `(col, row)` on zoom `level`.
    fn path(&self, level: u8, col: i32, row: i32) -> TilePath;
}

/// Tile pyramid stored on a local filesystem, one directory per zoom level.
#[derive(Debug, Clone)]
pub struct FileTileSource {
    root: String,
    ext: String,
}

impl FileTileSource {
    pub fn new(root: impl Into<String>, ext: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            ext: ext.into(),
        }
    }
}

impl Default for FileTileSource {
    fn default() -> Self {
        Self::new("/MAP", "png")
    }
}

impl TileSource for FileTileSource {
    fn path(&self, level: u8, col: i32, row: i32) -> TilePath {
        TilePath {
            root: self.root.clone(),
            level,
            col,
            row,
            ext: self.ext.clone(),
        }
    }
}
