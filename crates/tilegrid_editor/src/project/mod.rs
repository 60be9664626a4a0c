//! Project management - the edited document plus save/load state

mod file;

pub use file::ProjectError;

use std::path::PathBuf;

use tilegrid_core::Definition;

/// The edited document: a definition plus where it lives on disk and
/// whether it has unsaved changes.
#[derive(Debug, Clone, Default)]
pub struct Project {
    pub definition: Definition,
    pub path: Option<PathBuf>,
    dirty: bool,
}

impl Project {
    pub fn new(definition: Definition) -> Self {
        Self {
            definition,
            path: None,
            dirty: false,
        }
    }

    /// Mark the project as modified
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether the project has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}
