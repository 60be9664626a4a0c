//! Areas - aggregates of tile layers plus the palettes usable in them

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::grid::Size;
use crate::id::{AreaId, PaletteId};
use crate::tile_map::TileMap;

/// One editable map of the game world: a stack of tile layers sharing a
/// grid size, plus the set of palette ids available to it.
///
/// Layers are keyed by integer index. Keys are typically 0..N-1 but are not
/// required to be contiguous; removing a middle layer leaves a gap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Area {
    pub id: AreaId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub size: Size,
    /// Cell size in pixels - a rendering hint, unused by edit logic
    pub cell_size: u32,
    pub tile_maps: HashMap<i32, TileMap>,
    /// Palettes referenced by this area. The edit engine registers a
    /// palette here on first placement from it.
    pub palette_ids: BTreeSet<PaletteId>,
}

impl Area {
    pub fn new(
        id: AreaId,
        name: impl Into<String>,
        description: impl Into<String>,
        size: Size,
        cell_size: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            size,
            cell_size,
            tile_maps: HashMap::new(),
            palette_ids: BTreeSet::new(),
        }
    }

    pub fn layer(&self, layer: i32) -> Option<&TileMap> {
        self.tile_maps.get(&layer)
    }

    pub fn layer_mut(&mut self, layer: i32) -> Option<&mut TileMap> {
        self.tile_maps.get_mut(&layer)
    }

    /// Add a new empty layer above the highest existing one.
    ///
    /// Returns the new layer's index. `map_id` is the entity id for the new
    /// tile map, allocated by the owning definition.
    pub fn add_layer(&mut self, map_id: u32) -> i32 {
        let layer = self.tile_maps.keys().max().map_or(0, |max| max + 1);
        self.tile_maps.insert(
            layer,
            TileMap::new(map_id, format!("Layer {layer}"), layer, self.size),
        );
        layer
    }

    /// Remove a layer by index. Returns the removed map, or `None` if absent.
    pub fn remove_layer(&mut self, layer: i32) -> Option<TileMap> {
        self.tile_maps.remove(&layer)
    }

    /// Resize the area and every layer in it.
    ///
    /// Placements outside the new bounds are dropped (see
    /// [`TileMap::resize`]).
    pub fn resize(&mut self, new_size: Size) {
        self.size = new_size;
        for map in self.tile_maps.values_mut() {
            map.resize(new_size);
        }
    }

    /// Whether any layer of this area references the given palette
    pub fn references_palette(&self, palette_id: PaletteId) -> bool {
        self.tile_maps
            .values()
            .any(|map| map.placements().any(|p| p.palette_id == palette_id))
    }

    /// Whether any layer of this area references the given tile
    pub fn references_tile(&self, palette_id: PaletteId, tile_id: u32) -> bool {
        self.tile_maps.values().any(|map| {
            map.placements()
                .any(|p| p.palette_id == palette_id && p.tile_id == tile_id)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Area {
        Area::new(1, "Overworld", "", Size::new(8, 8), 64)
    }

    #[test]
    fn test_add_layer_indices() {
        let mut area = area();
        assert_eq!(area.add_layer(10), 0);
        assert_eq!(area.add_layer(11), 1);
        // Removing layer 0 leaves a gap; the next layer still goes on top
        area.remove_layer(0);
        assert_eq!(area.add_layer(12), 2);
        assert!(area.layer(0).is_none());
        assert!(area.layer(2).is_some());
    }

    #[test]
    fn test_resize_resizes_all_layers() {
        let mut area = area();
        area.add_layer(10);
        area.add_layer(11);
        area.layer_mut(0).unwrap().set_placement(5, 5, Some((1, 1)));
        area.layer_mut(1).unwrap().set_placement(1, 1, Some((2, 1)));

        area.resize(Size::new(3, 3));

        assert_eq!(area.layer(0).unwrap().size, Size::new(3, 3));
        assert!(area.layer(0).unwrap().placement_at(5, 5).is_none());
        assert!(area.layer(1).unwrap().placement_at(1, 1).is_some());
    }

    #[test]
    fn test_references_palette() {
        let mut area = area();
        area.add_layer(10);
        assert!(!area.references_palette(3));
        area.layer_mut(0).unwrap().set_placement(0, 0, Some((9, 3)));
        assert!(area.references_palette(3));
        assert!(area.references_tile(3, 9));
        assert!(!area.references_tile(3, 8));
    }
}
