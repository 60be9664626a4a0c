//! Placeable tiles

use serde::{Deserialize, Serialize};

use crate::grid::Size;
use crate::id::{PaletteId, TileId};

/// A placeable tile from a palette.
///
/// A tile may span multiple grid cells (`size` >= 1x1). The image payload is
/// opaque to the editing engine - typically a data URL produced by the
/// tileset import pipeline. Tiles are immutable once placed; edits replace
/// the tile, they never mutate it in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Footprint in grid cells
    pub size: Size,
    /// Opaque image payload (not interpreted by the engine)
    pub image: String,
    /// The palette that owns this tile
    pub palette_id: PaletteId,
}

impl Tile {
    pub fn new(
        id: TileId,
        name: impl Into<String>,
        description: impl Into<String>,
        size: Size,
        image: impl Into<String>,
        palette_id: PaletteId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            size,
            image: image.into(),
            palette_id,
        }
    }

    /// Whether this tile covers more than one cell
    pub fn is_multi_cell(&self) -> bool {
        self.size.width > 1 || self.size.height > 1
    }
}
