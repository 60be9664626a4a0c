//! Tileset manifest import
//!
//! A tileset ships as a sheet image plus a JSON manifest describing the
//! tiles cut from it. Slicing the image is the host's job; the importer
//! takes the manifest and the pre-sliced, opaque per-tile image payloads
//! and builds a palette from them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tilegrid_core::{Definition, PaletteId, Size};

/// Errors from tileset import
#[derive(Debug, Error)]
pub enum TilesetError {
    #[error("manifest parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("manifest declares {tiles} tiles but {images} images were supplied")]
    ImageCountMismatch { tiles: usize, images: usize },
}

/// One tile entry in a tileset manifest. `x`/`y`/`w`/`h` are in cells of
/// the sheet grid, not pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileSpriteDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// A tileset sheet manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TilesetManifest {
    pub cell_size: u32,
    pub tiles: Vec<TileSpriteDef>,
}

impl TilesetManifest {
    pub fn from_json(json: &str) -> Result<Self, TilesetError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Build a palette from a manifest and its pre-sliced tile images.
///
/// `images` must supply one opaque payload per manifest tile, in manifest
/// order. Returns the new palette's id.
pub fn import_tileset(
    definition: &mut Definition,
    name: &str,
    manifest: &TilesetManifest,
    images: Vec<String>,
) -> Result<PaletteId, TilesetError> {
    if images.len() != manifest.tiles.len() {
        return Err(TilesetError::ImageCountMismatch {
            tiles: manifest.tiles.len(),
            images: images.len(),
        });
    }
    let palette_id = definition.add_palette(name, "", manifest.cell_size);
    for (def, image) in manifest.tiles.iter().zip(images) {
        definition.add_tile(
            palette_id,
            def.name.clone(),
            def.description.clone(),
            Size::new(def.w, def.h),
            image,
        );
    }
    Ok(palette_id)
}
