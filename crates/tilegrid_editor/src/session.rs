//! The editing session - the engine behind every user-visible edit
//!
//! All edit operations run synchronously to completion: each one mutates
//! the tile data, records a reversible delta, and emits change events in
//! one atomic unit of work, so the undo history and the data never observe
//! an inconsistent intermediate state.

use std::sync::mpsc::Receiver;

use tilegrid_core::{AreaId, CellCoord, TileId};

use crate::commands::{CommandHistory, TileCellChange, TileChangeDelta};
use crate::messages::{CanvasCommand, CanvasEvent, PositionUpdate};
use crate::notify::{ChangeEvent, ChangeNotifier, TilePositionUpdate};
use crate::project::Project;
use crate::selection::TileSelection;
use crate::shortcuts::EditorAction;

/// A single-editor session over one project.
///
/// Owns the project, the undo/redo history, the selection, and the change
/// notifier; everything is torn down together when the session drops.
pub struct EditorSession {
    pub project: Project,
    history: CommandHistory,
    selection: TileSelection,
    notifier: ChangeNotifier,
    active_area: AreaId,
    active_layer: i32,
    selected_tile: Option<TileId>,
}

impl EditorSession {
    pub fn new(project: Project, active_area: AreaId) -> Self {
        Self {
            project,
            history: CommandHistory::new(),
            selection: TileSelection::new(),
            notifier: ChangeNotifier::new(),
            active_area,
            active_layer: 0,
            selected_tile: None,
        }
    }

    pub fn active_area(&self) -> AreaId {
        self.active_area
    }

    pub fn active_layer(&self) -> i32 {
        self.active_layer
    }

    pub fn set_active_layer(&mut self, layer: i32) {
        self.active_layer = layer;
    }

    pub fn selected_tile(&self) -> Option<TileId> {
        self.selected_tile
    }

    pub fn selection(&self) -> &TileSelection {
        &self.selection
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Subscribe to change events for this session
    pub fn subscribe(&mut self) -> Receiver<ChangeEvent> {
        self.notifier.subscribe()
    }

    // Selection

    /// Apply a click on a cell of the active layer with modifier flags
    pub fn click_cell(&mut self, x: i32, y: i32, ctrl: bool, shift: bool) {
        self.selection
            .click(CellCoord::new(x, y, self.active_layer), ctrl, shift);
        self.notifier.notify(ChangeEvent::SelectionChanged);
    }

    /// Replace the selection wholesale (canvas marquee)
    pub fn set_selection(&mut self, cells: Vec<CellCoord>) {
        self.selection.set_cells(cells);
        self.notifier.notify(ChangeEvent::SelectionChanged);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.notifier.notify(ChangeEvent::SelectionChanged);
    }

    // Edit operations

    /// Place a tile with its anchor at (x, y) on the given layer.
    ///
    /// Resolves the tile from the palette that owns it; a missing tile id,
    /// missing layer, or out-of-bounds anchor makes this a no-op with no
    /// undo delta. The owning palette is auto-registered on the area on
    /// first placement.
    pub fn place_tile(
        &mut self,
        tile_id: TileId,
        x: i32,
        y: i32,
        layer: i32,
    ) -> Vec<TilePositionUpdate> {
        let definition = &self.project.definition;
        let Some((_, tile)) = definition.find_tile(tile_id) else {
            return Vec::new();
        };
        let palette_id = tile.palette_id;
        let Some(area) = definition.get_area(self.active_area) else {
            return Vec::new();
        };
        if !area.size.contains(x, y) || area.layer(layer).is_none() {
            return Vec::new();
        }

        let area_id = self.active_area;
        let area = self.project.definition.get_area_mut(area_id).unwrap();
        area.palette_ids.insert(palette_id);
        let map = area.layer_mut(layer).unwrap();
        let old = map.placement_at(x, y).map(|p| (p.tile_id, p.palette_id));
        let new = Some((tile_id, palette_id));
        if old == new {
            return Vec::new();
        }
        map.set_placement(x, y, new);

        let change = TileCellChange {
            layer,
            x,
            y,
            old,
            new,
        };
        self.commit(vec![change], "Place Tile")
    }

    /// Erase the placement anchored at (x, y) on the given layer.
    ///
    /// Erasing an already-empty cell pushes no delta.
    pub fn remove_tile(&mut self, x: i32, y: i32, layer: i32) -> Vec<TilePositionUpdate> {
        let area_id = self.active_area;
        let Some(map) = self
            .project
            .definition
            .get_area_mut(area_id)
            .and_then(|a| a.layer_mut(layer))
        else {
            return Vec::new();
        };
        let Some(old) = map.placement_at(x, y).map(|p| (p.tile_id, p.palette_id)) else {
            return Vec::new();
        };
        map.set_placement(x, y, None);

        let change = TileCellChange {
            layer,
            x,
            y,
            old: Some(old),
            new: None,
        };
        self.commit(vec![change], "Erase Tile")
    }

    /// Fill a region with a (possibly multi-cell) tile.
    ///
    /// The region is the selection's bounding rectangle on `layer` when a
    /// selection exists, else the whole layer. Anchors step in multiples of
    /// the tile's footprint, row-major, with the fillable span truncated to
    /// whole multiples of the tile size. Every covered cell of a candidate
    /// anchor must be in bounds (and selected, when a selection is active)
    /// or the anchor is skipped entirely. With `only_if_empty`, an anchor is
    /// also skipped if any covered cell holds any part of an existing
    /// placement, including placements made earlier in this same call.
    ///
    /// All placed anchors commit as one undo step.
    pub fn fill(
        &mut self,
        tile_id: TileId,
        layer: i32,
        only_if_empty: bool,
    ) -> Vec<TilePositionUpdate> {
        let area_id = self.active_area;
        let definition = &self.project.definition;
        let Some((_, tile)) = definition.find_tile(tile_id) else {
            return Vec::new();
        };
        let palette_id = tile.palette_id;
        let (w, h) = (tile.size.width as i32, tile.size.height as i32);
        if w < 1 || h < 1 {
            return Vec::new();
        }
        let Some(area) = definition.get_area(area_id) else {
            return Vec::new();
        };
        if area.layer(layer).is_none() {
            return Vec::new();
        }

        let selection_active = !self.selection.is_empty();
        let (min_x, min_y, max_x, max_y) = if selection_active {
            // A selection that has no cells on this layer selects nothing
            // here; falling back to whole-layer would fill behind the
            // user's back.
            match self.selection.bounds_on_layer(layer) {
                Some(bounds) => bounds,
                None => return Vec::new(),
            }
        } else {
            (0, 0, area.size.width as i32 - 1, area.size.height as i32 - 1)
        };

        // Truncate the fillable span down to whole multiples of the tile
        // footprint: floor(span / w) * w.
        let fill_width = ((max_x - min_x + 1) / w) * w;
        let fill_height = ((max_y - min_y + 1) / h) * h;

        let mut changes = Vec::new();
        let mut fy = min_y;
        while fy < min_y + fill_height {
            let mut fx = min_x;
            while fx < min_x + fill_width {
                if self.anchor_fits(fx, fy, w, h, layer, selection_active)
                    && !(only_if_empty && self.region_occupied(fx, fy, w, h, layer))
                {
                    let area = self.project.definition.get_area_mut(area_id).unwrap();
                    area.palette_ids.insert(palette_id);
                    let map = area.layer_mut(layer).unwrap();
                    let old = map.placement_at(fx, fy).map(|p| (p.tile_id, p.palette_id));
                    map.set_placement(fx, fy, Some((tile_id, palette_id)));
                    changes.push(TileCellChange {
                        layer,
                        x: fx,
                        y: fy,
                        old,
                        new: Some((tile_id, palette_id)),
                    });
                }
                fx += w;
            }
            fy += h;
        }

        self.commit(changes, "Fill")
    }

    /// Erase every selected cell, or every cell of the active layer when
    /// nothing is selected. One undo step either way.
    pub fn clear(&mut self) -> Vec<TilePositionUpdate> {
        let area_id = self.active_area;
        let mut changes = Vec::new();

        if !self.selection.is_empty() {
            let cells: Vec<CellCoord> = self.selection.cells().to_vec();
            let Some(area) = self.project.definition.get_area_mut(area_id) else {
                return Vec::new();
            };
            for cell in cells {
                let Some(map) = area.layer_mut(cell.layer) else {
                    continue;
                };
                let Some(old) = map
                    .placement_at(cell.x, cell.y)
                    .map(|p| (p.tile_id, p.palette_id))
                else {
                    continue;
                };
                map.set_placement(cell.x, cell.y, None);
                changes.push(TileCellChange {
                    layer: cell.layer,
                    x: cell.x,
                    y: cell.y,
                    old: Some(old),
                    new: None,
                });
            }
        } else {
            let layer = self.active_layer;
            let Some(map) = self
                .project
                .definition
                .get_area_mut(area_id)
                .and_then(|a| a.layer_mut(layer))
            else {
                return Vec::new();
            };
            for placement in map.placements() {
                changes.push(TileCellChange {
                    layer,
                    x: placement.x,
                    y: placement.y,
                    old: Some((placement.tile_id, placement.palette_id)),
                    new: None,
                });
            }
            map.clear();
        }

        self.commit(changes, "Clear")
    }

    // Undo/redo

    pub fn undo(&mut self) -> Vec<TilePositionUpdate> {
        let Some(delta) = self.history.undo(&mut self.project.definition) else {
            return Vec::new();
        };
        let area_id = delta.area_id();
        let updates: Vec<TilePositionUpdate> = delta
            .changes()
            .iter()
            .map(|c| TilePositionUpdate {
                x: c.x,
                y: c.y,
                layer: c.layer,
                tile: c.old,
            })
            .collect();
        self.after_replay(area_id, updates)
    }

    pub fn redo(&mut self) -> Vec<TilePositionUpdate> {
        let Some(delta) = self.history.redo(&mut self.project.definition) else {
            return Vec::new();
        };
        let area_id = delta.area_id();
        let updates: Vec<TilePositionUpdate> = delta
            .changes()
            .iter()
            .map(|c| TilePositionUpdate {
                x: c.x,
                y: c.y,
                layer: c.layer,
                tile: c.new,
            })
            .collect();
        self.after_replay(area_id, updates)
    }

    /// Dispatch a keyboard-driven action
    pub fn apply_action(&mut self, action: EditorAction) -> Vec<TilePositionUpdate> {
        match action {
            EditorAction::Undo => self.undo(),
            EditorAction::Redo => self.redo(),
        }
    }

    // Canvas event wiring

    /// Handle an event from the rendering canvas, returning the commands to
    /// send back to it.
    pub fn handle_event(&mut self, event: CanvasEvent) -> Vec<CanvasCommand> {
        match event {
            CanvasEvent::PlaceTile { x, y, layer } => {
                let Some(tile_id) = self.selected_tile else {
                    return Vec::new();
                };
                let updates = self.place_tile(tile_id, x, y, layer);
                position_commands(updates)
            }
            CanvasEvent::Fill {
                x: _,
                y: _,
                layer,
                ctrl_key,
            } => {
                let Some(tile_id) = self.selected_tile else {
                    return Vec::new();
                };
                let updates = self.fill(tile_id, layer, ctrl_key);
                position_commands(updates)
            }
            CanvasEvent::RemoveTile { x, y, layer } => {
                let updates = self.remove_tile(x, y, layer);
                position_commands(updates)
            }
            CanvasEvent::SelectionChanged { cells } => {
                self.set_selection(
                    cells
                        .into_iter()
                        .map(|c| CellCoord::new(c.x, c.y, c.layer))
                        .collect(),
                );
                Vec::new()
            }
            CanvasEvent::TileSelected { tile_id } => {
                if self.project.definition.find_tile(tile_id).is_none() {
                    return Vec::new();
                }
                self.selected_tile = Some(tile_id);
                vec![CanvasCommand::SetSelectedTileId { tile_id }]
            }
        }
    }

    /// Build the full canvas (re)initialization command for the active area
    pub fn init_command(&self) -> Option<CanvasCommand> {
        let area = self.project.definition.get_area(self.active_area)?;
        let palette_tiles = area
            .palette_ids
            .iter()
            .filter_map(|id| self.project.definition.get_palette(*id))
            .flat_map(|p| p.tiles.values().cloned())
            .collect();
        Some(CanvasCommand::Init {
            tile_maps: area.tile_maps.clone(),
            cell_size: area.cell_size,
            area_size: area.size,
            palette_tiles,
        })
    }

    // Persistence

    /// Best-effort save of unsaved changes.
    ///
    /// Persistence failures are logged and swallowed: the in-memory state
    /// stays valid and editable. Returns whether a save happened.
    pub fn autosave(&mut self) -> bool {
        if !self.project.is_dirty() {
            return false;
        }
        match self.project.save_current() {
            Ok(()) => true,
            Err(err) => {
                log::warn!("autosave failed, continuing with unsaved changes: {err}");
                false
            }
        }
    }

    // Internals

    /// Whether every cell of the WxH block anchored at (fx, fy) is in
    /// bounds and, when a selection is active, selected on this layer.
    fn anchor_fits(
        &self,
        fx: i32,
        fy: i32,
        w: i32,
        h: i32,
        layer: i32,
        selection_active: bool,
    ) -> bool {
        let Some(area) = self.project.definition.get_area(self.active_area) else {
            return false;
        };
        for ty in 0..h {
            for tx in 0..w {
                let (cx, cy) = (fx + tx, fy + ty);
                if !area.size.contains(cx, cy) {
                    return false;
                }
                if selection_active && !self.selection.contains_on_layer(cx, cy, layer) {
                    return false;
                }
            }
        }
        true
    }

    /// Whether any existing placement covers any cell of the WxH block
    /// anchored at (fx, fy).
    ///
    /// Placements are anchor-only records, so coverage is resolved here:
    /// each placement occupies the footprint of its tile. A placement whose
    /// tile no longer resolves is treated as 1x1.
    fn region_occupied(&self, fx: i32, fy: i32, w: i32, h: i32, layer: i32) -> bool {
        let definition = &self.project.definition;
        let Some(map) = definition
            .get_area(self.active_area)
            .and_then(|a| a.layer(layer))
        else {
            return false;
        };
        map.placements().any(|p| {
            let (pw, ph) = definition
                .resolve_tile(p.palette_id, p.tile_id)
                .map(|t| (t.size.width as i32, t.size.height as i32))
                .unwrap_or((1, 1));
            p.x < fx + w && fx < p.x + pw && p.y < fy + h && fy < p.y + ph
        })
    }

    /// Record already-applied changes as one undo step and emit updates
    fn commit(&mut self, changes: Vec<TileCellChange>, description: &str) -> Vec<TilePositionUpdate> {
        if changes.is_empty() {
            return Vec::new();
        }
        let updates: Vec<TilePositionUpdate> = changes
            .iter()
            .map(|c| TilePositionUpdate {
                x: c.x,
                y: c.y,
                layer: c.layer,
                tile: c.new,
            })
            .collect();
        let area_id = self.active_area;
        self.history
            .push(Box::new(TileChangeDelta::new(area_id, changes, description)));
        self.project.mark_dirty();
        self.notifier.notify(ChangeEvent::TilePositionsChanged {
            area_id,
            updates: updates.clone(),
        });
        updates
    }

    fn after_replay(
        &mut self,
        area_id: AreaId,
        updates: Vec<TilePositionUpdate>,
    ) -> Vec<TilePositionUpdate> {
        self.project.mark_dirty();
        if self.project.definition.get_area(area_id).is_some() {
            self.notifier.notify(ChangeEvent::TilePositionsChanged {
                area_id,
                updates: updates.clone(),
            });
            updates
        } else {
            // Replay against a deleted area was a no-op; nothing to render
            Vec::new()
        }
    }
}

fn position_commands(updates: Vec<TilePositionUpdate>) -> Vec<CanvasCommand> {
    if updates.is_empty() {
        return Vec::new();
    }
    let updates = updates
        .into_iter()
        .map(|u| PositionUpdate {
            x: u.x,
            y: u.y,
            layer: u.layer,
            tile_id: u.tile.map(|(t, _)| t),
            palette_id: u.tile.map(|(_, p)| p),
        })
        .collect();
    vec![CanvasCommand::UpdateTilePositions { updates }]
}
