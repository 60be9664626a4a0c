//! Portals - inter-area links

use serde::{Deserialize, Serialize};

use crate::grid::Coordinate;
use crate::id::AreaId;

/// A one-way link from a cell in one area to a cell in another.
///
/// Portals link areas by id so the serialized document stays acyclic. They
/// are sibling entities of areas: the edit engine never touches them beyond
/// add/remove on the definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portal {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub location_area: AreaId,
    pub location: Coordinate,
    pub destination_area: AreaId,
    pub destination: Coordinate,
}

impl Portal {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        location_area: AreaId,
        location: Coordinate,
        destination_area: AreaId,
        destination: Coordinate,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            location_area,
            location,
            destination_area,
            destination,
        }
    }
}
