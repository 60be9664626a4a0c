//! Typed host <-> canvas message surface
//!
//! The rendering canvas is an external collaborator. These are the message
//! shapes exchanged with it, as explicitly typed structs with validated
//! required fields - deserialization fails on a malformed payload instead
//! of silently probing for properties.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use tilegrid_core::{PaletteId, Size, Tile, TileId, TileMap};

/// The active canvas tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Paint,
    Fill,
    Erase,
    Select,
}

impl Default for Tool {
    fn default() -> Self {
        Self::Paint
    }
}

/// One cell's new rendered content, as sent over the wire.
///
/// `tile_id`/`palette_id` are both present for a placement and both absent
/// for an erased cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionUpdate {
    pub x: i32,
    pub y: i32,
    pub layer: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_id: Option<TileId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette_id: Option<PaletteId>,
}

/// A selected cell as reported by the canvas. `layer` defaults to 0 for
/// canvases that only drive a single layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedCell {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub layer: i32,
}

/// Host -> canvas commands
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum CanvasCommand {
    /// Full (re)initialization of the canvas from the active area
    Init {
        tile_maps: HashMap<i32, TileMap>,
        cell_size: u32,
        area_size: Size,
        palette_tiles: Vec<Tile>,
    },
    /// Replace the rendered layer stack (layer added/removed, resize)
    UpdateTileMaps { tile_maps: HashMap<i32, TileMap> },
    /// Patch individual cells in place
    UpdateTilePositions { updates: Vec<PositionUpdate> },
    SetSelectedTileId { tile_id: TileId },
    SetActiveLayer { layer: i32 },
    SetShowGrid { show: bool },
    SelectTool { tool: Tool },
}

/// Canvas -> host events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum CanvasEvent {
    PlaceTile { x: i32, y: i32, layer: i32 },
    /// `ctrl_key` requests "only fill empty cells"
    Fill {
        x: i32,
        y: i32,
        layer: i32,
        ctrl_key: bool,
    },
    RemoveTile { x: i32, y: i32, layer: i32 },
    SelectionChanged { cells: Vec<SelectedCell> },
    TileSelected { tile_id: TileId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_shape() {
        let json = r#"{"type":"fill","x":3,"y":4,"layer":1,"ctrlKey":true}"#;
        let event: CanvasEvent = serde_json::from_str(json).unwrap();
        match event {
            CanvasEvent::Fill {
                x,
                y,
                layer,
                ctrl_key,
            } => {
                assert_eq!((x, y, layer), (3, 4, 1));
                assert!(ctrl_key);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_selection_layer_defaults_to_zero() {
        let json = r#"{"type":"selectionChanged","cells":[{"x":1,"y":2}]}"#;
        let event: CanvasEvent = serde_json::from_str(json).unwrap();
        match event {
            CanvasEvent::SelectionChanged { cells } => {
                assert_eq!(cells, vec![SelectedCell { x: 1, y: 2, layer: 0 }]);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let json = r#"{"type":"placeTile","x":3,"layer":0}"#;
        assert!(serde_json::from_str::<CanvasEvent>(json).is_err());
    }

    #[test]
    fn test_position_update_omits_empty_tile() {
        let update = PositionUpdate {
            x: 1,
            y: 2,
            layer: 0,
            tile_id: None,
            palette_id: None,
        };
        let json = serde_json::to_string(&update).unwrap();
        assert!(!json.contains("tileId"));

        let command = CanvasCommand::SelectTool { tool: Tool::Fill };
        let json = serde_json::to_string(&command).unwrap();
        assert_eq!(json, r#"{"type":"selectTool","tool":"fill"}"#);
    }
}
