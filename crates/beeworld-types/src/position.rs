//! Grid coordinates and neighborhood geometry.
//!
//! Every entity in the simulation lives on an integer grid. [`Position`] is
//! the value type used everywhere a coordinate pair is needed; it replaces
//! ad hoc `(x, y)` tuples so that equality checks and homeward steering are
//! expressed in one place.

use serde::{Deserialize, Serialize};

/// The 8 Moore-neighborhood offsets around a cell (own cell excluded).
///
/// Listed in fixed nested `(dx, dy)` order. Callers that need an unbiased
/// walk shuffle a copy of this list.
pub const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// An `(x, y)` coordinate on the world or hive grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal grid coordinate.
    pub x: i32,
    /// Vertical grid coordinate.
    pub y: i32,
}

impl Position {
    /// Create a position from its coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return the position offset by `(dx, dy)`.
    ///
    /// Saturating: positions never wrap around the integer range.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Return the position one unit step closer to `target`.
    ///
    /// Each axis moves by the sign of its delta (0 when already aligned), so
    /// a bee heading home walks diagonally until an axis lines up, then
    /// straight. Moving toward itself returns the same position.
    pub const fn step_toward(self, target: Self) -> Self {
        self.offset(axis_step(self.x, target.x), axis_step(self.y, target.y))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Sign of the step needed to move `from` toward `to` on one axis.
const fn axis_step(from: i32, to: i32) -> i32 {
    if to > from {
        1
    } else if to < from {
        -1
    } else {
        0
    }
}
