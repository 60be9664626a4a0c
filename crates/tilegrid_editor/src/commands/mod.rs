//! Reversible edit deltas and the undo/redo history

mod delta;

pub use delta::{CommandHistory, DefinitionDelta, TileCellChange, TileChangeDelta};
