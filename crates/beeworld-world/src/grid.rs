//! The world grid: a read-only matrix tagging each cell's terrain class.
//!
//! The grid is built once by the terrain loader and never changes during a
//! run. Cells are stored in a flat row-major `Vec`; all lookups go through
//! checked index math so out-of-range queries answer `None` rather than
//! panicking.

use beeworld_types::{Position, TerrainCell};

/// The terrain-class matrix for one loaded map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldGrid {
    /// Grid width in cells.
    width: i32,
    /// Grid height in cells.
    height: i32,
    /// Row-major cell storage (`index = x * height + y`).
    cells: Vec<TerrainCell>,
}

impl WorldGrid {
    /// Create an all-[`TerrainCell::Empty`] grid of the given dimensions.
    ///
    /// Non-positive dimensions produce an empty grid where every position is
    /// out of bounds.
    pub fn new(width: i32, height: i32) -> Self {
        let cell_count = usize::try_from(width.max(0))
            .unwrap_or(0)
            .saturating_mul(usize::try_from(height.max(0)).unwrap_or(0));
        Self {
            width: width.max(0),
            height: height.max(0),
            cells: vec![TerrainCell::Empty; cell_count],
        }
    }

    /// Grid width in cells.
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells.
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Whether `pos` lies inside the grid.
    pub const fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// The terrain class at `pos`, or `None` when out of bounds.
    pub fn cell(&self, pos: Position) -> Option<TerrainCell> {
        self.index_of(pos)
            .and_then(|idx| self.cells.get(idx).copied())
    }

    /// Tag the cell at `pos` with a terrain class.
    ///
    /// Out-of-bounds positions are ignored; the loader filters them before
    /// calling, so this is purely defensive.
    pub(crate) fn set_cell(&mut self, pos: Position, cell: TerrainCell) {
        if let Some(idx) = self.index_of(pos)
            && let Some(slot) = self.cells.get_mut(idx)
        {
            *slot = cell;
        }
    }

    /// Flat storage index for `pos`, or `None` when out of bounds.
    fn index_of(&self, pos: Position) -> Option<usize> {
        if !self.in_bounds(pos) {
            return None;
        }
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        let height = usize::try_from(self.height).ok()?;
        x.checked_mul(height)?.checked_add(y)
    }
}
