//! The shared hive memory used by the intelligent strategy.

use serde::{Deserialize, Serialize};

use beeworld_types::Position;

/// The hive's shared pool of nectar-source positions.
///
/// Returning bees under the intelligent strategy contribute the locations
/// they visited. The pool is append-only and duplicate-free within a run,
/// preserving contribution order so target selection stays deterministic
/// for a given RNG seed. It is cleared at simulation reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiveMemory {
    /// Shared locations in contribution order.
    entries: Vec<Position>,
}

impl HiveMemory {
    /// Create an empty pool.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Contribute a location; returns `true` if it was not already known.
    pub fn share(&mut self, location: Position) -> bool {
        if self.entries.contains(&location) {
            return false;
        }
        self.entries.push(location);
        true
    }

    /// The shared locations in contribution order.
    pub fn as_slice(&self) -> &[Position] {
        &self.entries
    }

    /// Number of shared locations.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been shared yet.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget everything (simulation reset).
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
