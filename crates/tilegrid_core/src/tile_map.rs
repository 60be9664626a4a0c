//! Tile layers - sparse per-layer placement grids

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::grid::{index_of, Size};
use crate::id::{PaletteId, TileId};

/// One tile placed on a layer, recorded at its anchor (top-left) cell.
///
/// A tile occupying WxH cells is stored once, at the anchor. The other
/// covered cells are implicitly occupied: collision/overlap checks in the
/// edit engine must treat them as occupied, but the layer itself only
/// resolves anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilePlacement {
    pub x: i32,
    pub y: i32,
    pub tile_id: TileId,
    pub palette_id: PaletteId,
}

/// A single editable layer of an area: a sparse grid of cell -> placement.
///
/// Storage is a keyed map from linear cell index to placement; absence means
/// empty. All lookups and mutations treat out-of-bounds coordinates as
/// no-ops rather than errors, so stale UI-derived coordinates never crash
/// the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileMap {
    pub id: u32,
    pub name: String,
    /// Layer index within the owning area
    pub layer: i32,
    pub size: Size,
    placements: HashMap<u32, TilePlacement>,
}

impl TileMap {
    pub fn new(id: u32, name: impl Into<String>, layer: i32, size: Size) -> Self {
        Self {
            id,
            name: name.into(),
            layer,
            size,
            placements: HashMap::new(),
        }
    }

    /// The placement whose anchor is at (x, y), if any.
    ///
    /// Cells merely covered by a multi-cell tile anchored elsewhere return
    /// `None`; resolving coverage is the edit engine's job.
    pub fn placement_at(&self, x: i32, y: i32) -> Option<&TilePlacement> {
        if !self.size.contains(x, y) {
            return None;
        }
        self.placements.get(&index_of(x, y, self.size.width))
    }

    /// Store, overwrite, or remove the placement anchored at (x, y).
    ///
    /// `Some((tile_id, palette_id))` stores or overwrites; `None` removes.
    /// Out of bounds is a no-op.
    pub fn set_placement(&mut self, x: i32, y: i32, tile: Option<(TileId, PaletteId)>) {
        if !self.size.contains(x, y) {
            return;
        }
        let idx = index_of(x, y, self.size.width);
        match tile {
            Some((tile_id, palette_id)) => {
                self.placements.insert(
                    idx,
                    TilePlacement {
                        x,
                        y,
                        tile_id,
                        palette_id,
                    },
                );
            }
            None => {
                self.placements.remove(&idx);
            }
        }
    }

    /// Resize the layer, migrating placements.
    ///
    /// Placements whose anchor is still in bounds keep their coordinates;
    /// the rest are dropped. Surfacing the data loss to the user is the
    /// caller's responsibility.
    pub fn resize(&mut self, new_size: Size) {
        let old = std::mem::take(&mut self.placements);
        self.size = new_size;
        for placement in old.into_values() {
            if new_size.contains(placement.x, placement.y) {
                self.placements
                    .insert(index_of(placement.x, placement.y, new_size.width), placement);
            }
        }
    }

    /// All placements on this layer, in no particular order
    pub fn placements(&self) -> impl Iterator<Item = &TilePlacement> {
        self.placements.values()
    }

    pub fn placement_count(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Remove every placement on this layer
    pub fn clear(&mut self) {
        self.placements.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> TileMap {
        TileMap::new(1, "Layer 0", 0, Size::new(8, 8))
    }

    #[test]
    fn test_set_then_get_placement() {
        let mut map = map();
        map.set_placement(3, 4, Some((7, 2)));

        let placement = map.placement_at(3, 4).unwrap();
        assert_eq!(placement.tile_id, 7);
        assert_eq!(placement.palette_id, 2);
        assert_eq!((placement.x, placement.y), (3, 4));
    }

    #[test]
    fn test_set_none_removes() {
        let mut map = map();
        map.set_placement(1, 1, Some((7, 2)));
        map.set_placement(1, 1, None);
        assert!(map.placement_at(1, 1).is_none());
        assert!(map.is_empty());
    }

    #[test]
    fn test_out_of_bounds_is_noop() {
        let mut map = map();
        map.set_placement(8, 0, Some((7, 2)));
        map.set_placement(0, 8, Some((7, 2)));
        map.set_placement(-1, 0, Some((7, 2)));
        assert!(map.is_empty());
        assert!(map.placement_at(-1, 0).is_none());
        assert!(map.placement_at(8, 8).is_none());
    }

    #[test]
    fn test_overwrite_replaces() {
        let mut map = map();
        map.set_placement(2, 2, Some((7, 1)));
        map.set_placement(2, 2, Some((9, 1)));
        assert_eq!(map.placement_at(2, 2).unwrap().tile_id, 9);
        assert_eq!(map.placement_count(), 1);
    }

    #[test]
    fn test_resize_drops_out_of_bounds_keeps_rest() {
        let mut map = map();
        map.set_placement(1, 1, Some((7, 1)));
        map.set_placement(5, 5, Some((8, 1)));

        map.resize(Size::new(2, 2));

        assert_eq!(map.placement_count(), 1);
        let kept = map.placement_at(1, 1).unwrap();
        assert_eq!(kept.tile_id, 7);
        assert!(map.placement_at(5, 5).is_none());
    }

    #[test]
    fn test_resize_grow_keeps_all() {
        let mut map = map();
        map.set_placement(7, 7, Some((7, 1)));
        map.resize(Size::new(16, 16));
        assert_eq!(map.placement_at(7, 7).unwrap().tile_id, 7);
        // Previously out-of-bounds cells become writable
        map.set_placement(12, 12, Some((8, 1)));
        assert_eq!(map.placement_count(), 2);
    }
}
