//! Delta pattern for undo/redo

use tilegrid_core::{Definition, PaletteId, TileId};

/// A reversible record of one edit.
///
/// A delta is self-describing: it carries everything needed to re-apply
/// (`apply`) and reverse (`revert`) the change without recomputation. If
/// the area or layer it references no longer exists when it is replayed,
/// the replay is a silent no-op.
pub trait DefinitionDelta: Send + Sync {
    /// Apply the change (do/redo)
    fn apply(&self, definition: &mut Definition);
    /// Reverse the change (undo)
    fn revert(&self, definition: &mut Definition);
    /// Human-readable undo label
    fn description(&self) -> &str;
    /// The area this delta is scoped to
    fn area_id(&self) -> tilegrid_core::AreaId;
    /// The cells this delta touches, for change notification
    fn changes(&self) -> &[TileCellChange];
}

/// One cell's before/after state within a tile edit.
///
/// Each change carries its own layer index, so a single delta can span
/// layers (a clear over a multi-layer selection is still one undo step).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileCellChange {
    pub layer: i32,
    pub x: i32,
    pub y: i32,
    pub old: Option<(TileId, PaletteId)>,
    pub new: Option<(TileId, PaletteId)>,
}

/// Delta for batch tile changes (placement, erase, fill, clear).
///
/// Scoped to one area. Changes replay in recorded order; cells whose layer
/// no longer exists are skipped.
pub struct TileChangeDelta {
    pub area_id: tilegrid_core::AreaId,
    pub changes: Vec<TileCellChange>,
    description: String,
}

impl TileChangeDelta {
    pub fn new(
        area_id: tilegrid_core::AreaId,
        changes: Vec<TileCellChange>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            area_id,
            changes,
            description: description.into(),
        }
    }

    /// `true` if no cell changes are recorded. Callers skip pushing empty
    /// deltas so the history only contains steps that change state.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

impl DefinitionDelta for TileChangeDelta {
    fn apply(&self, definition: &mut Definition) {
        let Some(area) = definition.get_area_mut(self.area_id) else {
            return;
        };
        for change in &self.changes {
            if let Some(map) = area.layer_mut(change.layer) {
                map.set_placement(change.x, change.y, change.new);
            }
        }
    }

    fn revert(&self, definition: &mut Definition) {
        let Some(area) = definition.get_area_mut(self.area_id) else {
            return;
        };
        for change in &self.changes {
            if let Some(map) = area.layer_mut(change.layer) {
                map.set_placement(change.x, change.y, change.old);
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn area_id(&self) -> tilegrid_core::AreaId {
        self.area_id
    }

    fn changes(&self) -> &[TileCellChange] {
        &self.changes
    }
}

/// Stores delta history for undo/redo.
///
/// Linear history: any fresh edit clears the redo stack. Deltas are pushed
/// already-applied (the edit engine mutates first, then records), so
/// pushing never re-executes.
#[derive(Default)]
pub struct CommandHistory {
    undo_stack: Vec<Box<dyn DefinitionDelta>>,
    redo_stack: Vec<Box<dyn DefinitionDelta>>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an already-applied delta
    pub fn push(&mut self, delta: Box<dyn DefinitionDelta>) {
        self.undo_stack.push(delta);
        self.redo_stack.clear(); // Fresh edits invalidate redo history
    }

    /// Undo the most recent edit. Returns the replayed delta so the caller
    /// can derive change notifications from it.
    pub fn undo(&mut self, definition: &mut Definition) -> Option<&dyn DefinitionDelta> {
        let delta = self.undo_stack.pop()?;
        delta.revert(definition);
        self.redo_stack.push(delta);
        self.redo_stack.last().map(|d| d.as_ref())
    }

    /// Redo the most recently undone edit
    pub fn redo(&mut self, definition: &mut Definition) -> Option<&dyn DefinitionDelta> {
        let delta = self.redo_stack.pop()?;
        delta.apply(definition);
        self.undo_stack.push(delta);
        self.undo_stack.last().map(|d| d.as_ref())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|d| d.description())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|d| d.description())
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilegrid_core::Size;

    fn definition() -> (Definition, tilegrid_core::AreaId) {
        let mut def = Definition::new();
        let area_id = def.add_area("Test", "", Size::new(8, 8), 64);
        (def, area_id)
    }

    fn place_delta(area_id: tilegrid_core::AreaId) -> TileChangeDelta {
        TileChangeDelta::new(
            area_id,
            vec![TileCellChange {
                layer: 0,
                x: 2,
                y: 3,
                old: None,
                new: Some((7, 1)),
            }],
            "Place Tile",
        )
    }

    #[test]
    fn test_apply_then_revert_restores_prior_state() {
        let (mut def, area_id) = definition();
        let delta = place_delta(area_id);

        delta.apply(&mut def);
        assert!(def
            .get_area(area_id)
            .unwrap()
            .layer(0)
            .unwrap()
            .placement_at(2, 3)
            .is_some());

        delta.revert(&mut def);
        assert!(def
            .get_area(area_id)
            .unwrap()
            .layer(0)
            .unwrap()
            .placement_at(2, 3)
            .is_none());
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let (mut def, area_id) = definition();
        let mut history = CommandHistory::new();

        let delta = place_delta(area_id);
        delta.apply(&mut def);
        history.push(Box::new(delta));
        assert!(history.can_undo());
        assert!(!history.can_redo());

        history.undo(&mut def);
        assert!(!history.can_undo());
        assert!(history.can_redo());
        assert!(def
            .get_area(area_id)
            .unwrap()
            .layer(0)
            .unwrap()
            .placement_at(2, 3)
            .is_none());

        history.redo(&mut def);
        assert_eq!(
            def.get_area(area_id)
                .unwrap()
                .layer(0)
                .unwrap()
                .placement_at(2, 3)
                .unwrap()
                .tile_id,
            7
        );
    }

    #[test]
    fn test_fresh_edit_clears_redo() {
        let (mut def, area_id) = definition();
        let mut history = CommandHistory::new();

        let delta = place_delta(area_id);
        delta.apply(&mut def);
        history.push(Box::new(delta));
        history.undo(&mut def);
        assert!(history.can_redo());

        let other = TileChangeDelta::new(
            area_id,
            vec![TileCellChange {
                layer: 0,
                x: 0,
                y: 0,
                old: None,
                new: Some((9, 1)),
            }],
            "Place Tile",
        );
        other.apply(&mut def);
        history.push(Box::new(other));

        assert!(!history.can_redo());
        assert!(history.redo(&mut def).is_none());
    }

    #[test]
    fn test_replay_against_deleted_area_is_noop() {
        let (mut def, area_id) = definition();
        let mut history = CommandHistory::new();
        let delta = place_delta(area_id);
        delta.apply(&mut def);
        history.push(Box::new(delta));

        def.remove_area(area_id);
        // Undo silently discards the delta without touching anything
        assert!(history.undo(&mut def).is_some());
        assert!(!history.can_undo());
        assert!(history.can_redo());
    }

    #[test]
    fn test_replay_against_deleted_layer_skips_cells() {
        let (mut def, area_id) = definition();
        let delta = place_delta(area_id);
        delta.apply(&mut def);
        def.get_area_mut(area_id).unwrap().remove_layer(0);
        // Neither replay direction panics or resurrects the layer
        delta.revert(&mut def);
        delta.apply(&mut def);
        assert!(def.get_area(area_id).unwrap().layer(0).is_none());
    }
}
