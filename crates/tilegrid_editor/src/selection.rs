//! Cell selection for fill/clear operations

use tilegrid_core::CellCoord;

/// The current cell selection.
///
/// An ordered list of distinct cells; empty means "the whole active layer".
/// Order matters: shift-extension spans a rectangle from the most recently
/// selected cell. Selection is advisory input to fill/clear - it never
/// mutates tile data itself.
#[derive(Debug, Default, Clone)]
pub struct TileSelection {
    cells: Vec<CellCoord>,
}

impl TileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, cell: CellCoord) -> bool {
        self.cells.contains(&cell)
    }

    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Apply a click on `cell` with modifier flags.
    ///
    /// - no modifiers: selection becomes `{cell}`
    /// - ctrl: toggle membership of `cell`, keep the rest
    /// - shift: union in the inclusive rectangle spanned by the last
    ///   selected cell and `cell`; with an empty selection this degrades to
    ///   the no-modifier case
    pub fn click(&mut self, cell: CellCoord, ctrl: bool, shift: bool) {
        if ctrl {
            if let Some(pos) = self.cells.iter().position(|c| *c == cell) {
                self.cells.remove(pos);
            } else {
                self.cells.push(cell);
            }
            return;
        }
        if shift {
            if let Some(&anchor) = self.cells.last() {
                self.extend_rectangle(anchor, cell);
                return;
            }
        }
        self.cells.clear();
        self.cells.push(cell);
    }

    /// Replace the selection wholesale (canvas-driven marquee selection).
    ///
    /// Duplicates are dropped, keeping first-occurrence order.
    pub fn set_cells(&mut self, cells: Vec<CellCoord>) {
        self.cells.clear();
        for cell in cells {
            if !self.cells.contains(&cell) {
                self.cells.push(cell);
            }
        }
    }

    /// Add every cell of the axis-aligned rectangle spanned by `a` and `b`
    /// (inclusive) on `b`'s layer, skipping cells already selected.
    fn extend_rectangle(&mut self, a: CellCoord, b: CellCoord) {
        let min_x = a.x.min(b.x);
        let max_x = a.x.max(b.x);
        let min_y = a.y.min(b.y);
        let max_y = a.y.max(b.y);
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let cell = CellCoord::new(x, y, b.layer);
                if !self.cells.contains(&cell) {
                    self.cells.push(cell);
                }
            }
        }
    }

    /// Bounding rectangle of the selected cells on one layer, as
    /// `(min_x, min_y, max_x, max_y)`. `None` if no cell of the selection
    /// lies on that layer.
    pub fn bounds_on_layer(&self, layer: i32) -> Option<(i32, i32, i32, i32)> {
        let mut bounds: Option<(i32, i32, i32, i32)> = None;
        for cell in self.cells.iter().filter(|c| c.layer == layer) {
            bounds = Some(match bounds {
                None => (cell.x, cell.y, cell.x, cell.y),
                Some((min_x, min_y, max_x, max_y)) => (
                    min_x.min(cell.x),
                    min_y.min(cell.y),
                    max_x.max(cell.x),
                    max_y.max(cell.y),
                ),
            });
        }
        bounds
    }

    /// Membership test scoped to one layer
    pub fn contains_on_layer(&self, x: i32, y: i32, layer: i32) -> bool {
        self.contains(CellCoord::new(x, y, layer))
    }
}
