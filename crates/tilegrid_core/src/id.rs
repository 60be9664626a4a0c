//! Entity id allocation

use serde::{Deserialize, Serialize};

/// Id of a tile within a palette
pub type TileId = u32;
/// Id of a tile palette
pub type PaletteId = u32;
/// Id of an area
pub type AreaId = u32;

/// Monotonically incrementing id source for all entities in a definition.
///
/// Owned by the [`Definition`](crate::Definition) and threaded through its
/// factory operations, so that ids are unique within one document and tests
/// get deterministic sequences. Ids start at 1 and are never reused; 0 is
/// never allocated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdAllocator {
    next_id: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next_id: 1 }
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id
    pub fn next(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Bump the allocator past an externally supplied id.
    ///
    /// Used when loading documents whose entities were created by an older
    /// allocator, so freshly allocated ids never collide with loaded ones.
    pub fn reserve(&mut self, id: u32) {
        if id >= self.next_id {
            self.next_id = id + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_at_one_and_increment() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.next(), 1);
        assert_eq!(ids.next(), 2);
        assert_eq!(ids.next(), 3);
    }

    #[test]
    fn test_reserve_skips_past_loaded_ids() {
        let mut ids = IdAllocator::new();
        ids.reserve(10);
        assert_eq!(ids.next(), 11);
        // Reserving a lower id changes nothing
        ids.reserve(4);
        assert_eq!(ids.next(), 12);
    }
}
