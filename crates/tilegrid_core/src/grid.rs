//! Grid addressing - coordinates, sizes, and linear cell indexing

use serde::{Deserialize, Serialize};

/// A position on a grid, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A cell on a specific layer of an area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
    pub layer: i32,
}

impl CellCoord {
    pub fn new(x: i32, y: i32, layer: i32) -> Self {
        Self { x, y, layer }
    }
}

/// A width/height pair, in grid cells (not pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether (x, y) lies inside a grid of this size
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Total cell count
    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

/// Linear cell index for an in-bounds coordinate.
///
/// Callers must bounds-check first; the result is only meaningful when
/// `0 <= x < width`.
pub fn index_of(x: i32, y: i32, width: u32) -> u32 {
    x as u32 + y as u32 * width
}
