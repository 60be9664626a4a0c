//! Core data structures for tilegrid
//!
//! This crate provides the fundamental types for representing tile-based
//! editable worlds:
//! - `Definition` - The root aggregate: areas, palettes, portals
//! - `Area` - A stack of tile layers sharing one grid size
//! - `TileMap` - One sparse layer of anchor-cell tile placements
//! - `TilePalette` / `Tile` - Reusable tile collections, multi-cell aware
//! - `IdAllocator` - Document-owned integer id source
//!
//! The crate is pure data: no I/O, no logging. The editing operations that
//! mutate these types live in `tilegrid_editor`.

mod area;
mod definition;
mod grid;
mod id;
mod palette;
mod portal;
mod tile;
mod tile_map;

pub use area::Area;
pub use definition::{Definition, DefinitionError};
pub use grid::{index_of, CellCoord, Coordinate, Size};
pub use id::{AreaId, IdAllocator, PaletteId, TileId};
pub use palette::TilePalette;
pub use portal::Portal;
pub use tile::Tile;
pub use tile_map::{TileMap, TilePlacement};
