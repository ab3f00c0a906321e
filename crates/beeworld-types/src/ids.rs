//! Typed identifiers for simulation entities.

use serde::{Deserialize, Serialize};

/// Identifier of a bee within one simulation run.
///
/// Bees are created once per run in roster order, so the ordinal index is
/// the identity. Formats as `b0`, `b1`, ... in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BeeId(u32);

impl BeeId {
    /// Create an ID from a roster index.
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// The roster index this ID wraps.
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for BeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "b{}", self.0)
    }
}
