//! The hive grid: a comb-patterned matrix that accumulates deposited honey.
//!
//! The grid starts with a vertical comb stripe (rows 10..15 of each column
//! set to 10, with rows 10, 12, and 14 holding full honey cells at 5).
//! Returning bees deposit carried nectar into the cell under them, capped
//! at [`CELL_CAP`] per cell.

use serde::{Deserialize, Serialize};

use beeworld_types::Position;

/// Maximum honey a single hive cell can hold via deposits.
pub const CELL_CAP: u32 = 5;

/// First comb-stripe row (inclusive).
const COMB_START: i32 = 10;

/// Last comb-stripe row (exclusive).
const COMB_END: i32 = 15;

/// Unready comb marker value.
const COMB_VALUE: u32 = 10;

/// Full honey cell marker value.
const HONEY_VALUE: u32 = 5;

/// The hive's honey-accumulator matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiveGrid {
    /// Hive width in cells.
    width: i32,
    /// Hive height in cells.
    height: i32,
    /// Row-major cell storage (`index = x * height + y`).
    cells: Vec<u32>,
}

impl HiveGrid {
    /// Create a hive grid with the standard comb pattern.
    ///
    /// Non-positive dimensions produce an empty grid.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let cell_count = usize::try_from(width)
            .unwrap_or(0)
            .saturating_mul(usize::try_from(height).unwrap_or(0));
        let mut grid = Self {
            width,
            height,
            cells: vec![0; cell_count],
        };
        for x in 0..width {
            for y in COMB_START..COMB_END {
                grid.set(Position::new(x, y), COMB_VALUE);
            }
            // Alternating full honey cells within the stripe.
            let mut y = COMB_START;
            while y < COMB_END {
                grid.set(Position::new(x, y), HONEY_VALUE);
                y = y.saturating_add(2);
            }
        }
        grid
    }

    /// Hive width in cells.
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Hive height in cells.
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// The honey value at `pos`, or `None` when out of bounds.
    pub fn cell(&self, pos: Position) -> Option<u32> {
        self.index_of(pos)
            .and_then(|idx| self.cells.get(idx).copied())
    }

    /// Deposit `amount` honey at a bee's position.
    ///
    /// World-frame positions can exceed the hive dimensions, so each axis is
    /// clamped into range before the deposit lands. The receiving cell is
    /// capped at [`CELL_CAP`].
    pub fn deposit(&mut self, pos: Position, amount: u32) {
        if amount == 0 || self.width == 0 || self.height == 0 {
            return;
        }
        let clamped = Position::new(
            pos.x.clamp(0, self.width.saturating_sub(1)),
            pos.y.clamp(0, self.height.saturating_sub(1)),
        );
        if let Some(current) = self.cell(clamped) {
            let updated = current.saturating_add(amount).min(CELL_CAP);
            self.set(clamped, updated);
        }
    }

    /// Overwrite the cell at `pos`, ignoring out-of-bounds positions.
    fn set(&mut self, pos: Position, value: u32) {
        if let Some(idx) = self.index_of(pos)
            && let Some(slot) = self.cells.get_mut(idx)
        {
            *slot = value;
        }
    }

    /// Flat storage index for `pos`, or `None` when out of bounds.
    fn index_of(&self, pos: Position) -> Option<usize> {
        if pos.x < 0 || pos.x >= self.width || pos.y < 0 || pos.y >= self.height {
            return None;
        }
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        let height = usize::try_from(self.height).ok()?;
        x.checked_mul(height)?.checked_add(y)
    }
}
