//! Tile palettes - named, shared collections of tiles

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::id::{PaletteId, TileId};
use crate::tile::Tile;

/// A named collection of tiles, shared across areas by reference.
///
/// Areas store only the *set* of palette ids they use; the tiles themselves
/// live here, keyed by tile id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilePalette {
    pub id: PaletteId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Cell size in pixels - a rendering hint, unused by edit logic
    pub cell_size: u32,
    pub tiles: HashMap<TileId, Tile>,
}

impl TilePalette {
    pub fn new(
        id: PaletteId,
        name: impl Into<String>,
        description: impl Into<String>,
        cell_size: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            cell_size,
            tiles: HashMap::new(),
        }
    }

    pub fn get_tile(&self, tile_id: TileId) -> Option<&Tile> {
        self.tiles.get(&tile_id)
    }

    pub fn add_tile(&mut self, tile: Tile) -> TileId {
        let id = tile.id;
        self.tiles.insert(id, tile);
        id
    }

    /// Remove a tile by id. Returns the removed tile, or `None` if absent.
    ///
    /// Callers must first check the tile is unreferenced; see
    /// [`Definition::remove_tile`](crate::Definition::remove_tile).
    pub fn remove_tile(&mut self, tile_id: TileId) -> Option<Tile> {
        self.tiles.remove(&tile_id)
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Size;

    #[test]
    fn test_add_and_get_tile() {
        let mut palette = TilePalette::new(1, "Terrain", "", 64);
        palette.add_tile(Tile::new(7, "grass", "", Size::new(1, 1), "img", 1));

        assert_eq!(palette.tile_count(), 1);
        let tile = palette.get_tile(7).unwrap();
        assert_eq!(tile.name, "grass");
        assert_eq!(tile.palette_id, 1);
        assert!(!tile.is_multi_cell());
        assert!(palette.get_tile(8).is_none());
    }

    #[test]
    fn test_remove_tile() {
        let mut palette = TilePalette::new(1, "Terrain", "", 64);
        palette.add_tile(Tile::new(7, "grass", "", Size::new(2, 2), "img", 1));

        assert!(palette.remove_tile(7).is_some());
        assert!(palette.remove_tile(7).is_none());
        assert_eq!(palette.tile_count(), 0);
    }
}
