//! Headless editing engine for tilegrid
//!
//! Everything a host needs to drive an interactive tile editor over a
//! `tilegrid_core::Definition`:
//! - `EditorSession` - place/erase/fill/clear operations with undo/redo
//! - `TileSelection` - click/ctrl/shift selection model
//! - `CommandHistory` / `DefinitionDelta` - reversible edit history
//! - `CanvasCommand` / `CanvasEvent` - the typed host <-> canvas surface
//! - `Project` - the edited document with JSON save/load
//!
//! The rendering canvas, input capture, and storage backend are external
//! collaborators; this crate is pure engine.

pub mod commands;
pub mod messages;
pub mod notify;
pub mod project;
pub mod selection;
pub mod session;
pub mod shortcuts;
pub mod tileset;

pub use commands::{CommandHistory, DefinitionDelta, TileCellChange, TileChangeDelta};
pub use messages::{CanvasCommand, CanvasEvent, PositionUpdate, SelectedCell, Tool};
pub use notify::{ChangeEvent, ChangeNotifier, TilePositionUpdate};
pub use project::{Project, ProjectError};
pub use selection::TileSelection;
pub use session::EditorSession;
pub use shortcuts::{action_for_key, EditorAction, KeyEvent};
pub use tileset::{import_tileset, TileSpriteDef, TilesetError, TilesetManifest};
