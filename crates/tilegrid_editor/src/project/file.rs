//! Project file save/load operations

use super::Project;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no file path set")]
    NoPath,
}

impl Project {
    /// Load a project from file
    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let content = std::fs::read_to_string(path)?;
        let definition = serde_json::from_str(&content)?;
        log::info!("loaded project from {}", path.display());
        Ok(Self {
            definition,
            path: Some(path.to_path_buf()),
            dirty: false,
        })
    }

    /// Save the project to file
    pub fn save(&mut self, path: &Path) -> Result<(), ProjectError> {
        let content = serde_json::to_string_pretty(&self.definition)?;
        std::fs::write(path, content)?;
        self.path = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }

    /// Save to the current path if one is set
    pub fn save_current(&mut self) -> Result<(), ProjectError> {
        match self.path.clone() {
            Some(path) => self.save(&path),
            None => Err(ProjectError::NoPath),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilegrid_core::{Definition, Size};

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world.json");

        let mut definition = Definition::new();
        let area_id = definition.add_area("Overworld", "", Size::new(8, 8), 64);
        let palette_id = definition.add_palette("Terrain", "", 64);
        let tile_id = definition
            .add_tile(palette_id, "grass", "", Size::new(1, 1), "img")
            .unwrap();
        definition
            .get_area_mut(area_id)
            .unwrap()
            .layer_mut(0)
            .unwrap()
            .set_placement(3, 3, Some((tile_id, palette_id)));

        let mut project = Project::new(definition);
        project.mark_dirty();
        project.save(&path).unwrap();
        assert!(!project.is_dirty());

        let loaded = Project::load(&path).unwrap();
        let area = loaded.definition.get_area(area_id).unwrap();
        let placement = area.layer(0).unwrap().placement_at(3, 3).unwrap();
        assert_eq!(placement.tile_id, tile_id);
        assert_eq!(placement.palette_id, palette_id);
        assert_eq!(loaded.path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(matches!(
            Project::load(Path::new("/nonexistent/world.json")),
            Err(ProjectError::Io(_))
        ));
    }

    #[test]
    fn test_load_malformed_json_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            Project::load(&path),
            Err(ProjectError::Parse(_))
        ));
    }

    #[test]
    fn test_save_current_without_path() {
        let mut project = Project::default();
        assert!(matches!(
            project.save_current(),
            Err(ProjectError::NoPath)
        ));
    }
}
