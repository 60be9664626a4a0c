//! The definition - root aggregate of areas, palettes, and portals

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::area::Area;
use crate::grid::{Coordinate, Size};
use crate::id::{AreaId, IdAllocator, PaletteId, TileId};
use crate::palette::TilePalette;
use crate::portal::Portal;
use crate::tile::Tile;

/// Errors from definition-level operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DefinitionError {
    /// The palette is still referenced by a placement in some area
    #[error("palette {0} is still in use and cannot be removed")]
    PaletteInUse(PaletteId),
    /// The tile is still referenced by a placement in some area
    #[error("tile {tile_id} in palette {palette_id} is still in use and cannot be removed")]
    TileInUse {
        palette_id: PaletteId,
        tile_id: TileId,
    },
}

/// The root aggregate: every area, palette, and portal in the document.
///
/// All entity creation goes through the factory methods here, which
/// allocate ids from the owned [`IdAllocator`]. Referential integrity
/// (a palette or tile still referenced by placements) is enforced at
/// removal time, not at placement time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Definition {
    pub areas: HashMap<AreaId, Area>,
    pub palettes: HashMap<PaletteId, TilePalette>,
    pub portals: Vec<Portal>,
    ids: IdAllocator,
}

impl Definition {
    pub fn new() -> Self {
        Self::default()
    }

    // Areas

    /// Create a new area with one empty layer and return its id
    pub fn add_area(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        size: Size,
        cell_size: u32,
    ) -> AreaId {
        let id = self.ids.next();
        let mut area = Area::new(id, name, description, size, cell_size);
        let map_id = self.ids.next();
        area.add_layer(map_id);
        self.areas.insert(id, area);
        id
    }

    pub fn get_area(&self, id: AreaId) -> Option<&Area> {
        self.areas.get(&id)
    }

    pub fn get_area_mut(&mut self, id: AreaId) -> Option<&mut Area> {
        self.areas.get_mut(&id)
    }

    pub fn remove_area(&mut self, id: AreaId) -> Option<Area> {
        self.areas.remove(&id)
    }

    /// Add a new empty layer to an area. Returns the layer index, or `None`
    /// if the area does not exist.
    pub fn add_layer(&mut self, area_id: AreaId) -> Option<i32> {
        let map_id = self.ids.next();
        self.areas.get_mut(&area_id).map(|a| a.add_layer(map_id))
    }

    // Palettes

    /// Create a new empty palette and return its id
    pub fn add_palette(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        cell_size: u32,
    ) -> PaletteId {
        let id = self.ids.next();
        self.palettes
            .insert(id, TilePalette::new(id, name, description, cell_size));
        id
    }

    pub fn get_palette(&self, id: PaletteId) -> Option<&TilePalette> {
        self.palettes.get(&id)
    }

    pub fn get_palette_mut(&mut self, id: PaletteId) -> Option<&mut TilePalette> {
        self.palettes.get_mut(&id)
    }

    /// Remove a palette.
    ///
    /// Fails with [`DefinitionError::PaletteInUse`] while any placement in
    /// any area still references it.
    pub fn remove_palette(&mut self, id: PaletteId) -> Result<Option<TilePalette>, DefinitionError> {
        if self.areas.values().any(|a| a.references_palette(id)) {
            return Err(DefinitionError::PaletteInUse(id));
        }
        Ok(self.palettes.remove(&id))
    }

    // Tiles

    /// Create a tile in a palette and return its id, or `None` if the
    /// palette does not exist.
    pub fn add_tile(
        &mut self,
        palette_id: PaletteId,
        name: impl Into<String>,
        description: impl Into<String>,
        size: Size,
        image: impl Into<String>,
    ) -> Option<TileId> {
        if !self.palettes.contains_key(&palette_id) {
            return None;
        }
        let id = self.ids.next();
        let tile = Tile::new(id, name, description, size, image, palette_id);
        self.palettes
            .get_mut(&palette_id)
            .map(|p| p.add_tile(tile))
    }

    /// Resolve a (palette, tile) pair to its tile, if both exist
    pub fn resolve_tile(&self, palette_id: PaletteId, tile_id: TileId) -> Option<&Tile> {
        self.palettes.get(&palette_id)?.get_tile(tile_id)
    }

    /// Find the tile with the given id and the palette that owns it.
    ///
    /// Tile ids are globally unique (one allocator), so at most one palette
    /// matches.
    pub fn find_tile(&self, tile_id: TileId) -> Option<(&TilePalette, &Tile)> {
        self.palettes
            .values()
            .find_map(|p| p.get_tile(tile_id).map(|t| (p, t)))
    }

    /// Remove a tile from its palette.
    ///
    /// Fails with [`DefinitionError::TileInUse`] while any placement still
    /// references it.
    pub fn remove_tile(
        &mut self,
        palette_id: PaletteId,
        tile_id: TileId,
    ) -> Result<Option<Tile>, DefinitionError> {
        if self
            .areas
            .values()
            .any(|a| a.references_tile(palette_id, tile_id))
        {
            return Err(DefinitionError::TileInUse {
                palette_id,
                tile_id,
            });
        }
        Ok(self
            .palettes
            .get_mut(&palette_id)
            .and_then(|p| p.remove_tile(tile_id)))
    }

    // Portals

    /// Create a portal between two areas and return its id
    pub fn add_portal(
        &mut self,
        name: impl Into<String>,
        location_area: AreaId,
        location: Coordinate,
        destination_area: AreaId,
        destination: Coordinate,
    ) -> u32 {
        let id = self.ids.next();
        self.portals.push(Portal::new(
            id,
            name,
            location_area,
            location,
            destination_area,
            destination,
        ));
        id
    }

    pub fn remove_portal(&mut self, id: u32) -> Option<Portal> {
        let pos = self.portals.iter().position(|p| p.id == id)?;
        Some(self.portals.remove(pos))
    }
}
