//! Enumeration types shared across the Beeworld workspace.

use serde::{Deserialize, Serialize};

/// Foraging strategy governing how a bee picks a target at mission start.
///
/// A closed enumeration: the parameter loader rejects anything outside
/// these three variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// No memory: the bee always random-walks and searches locally.
    None,
    /// Probabilistic recall: with probability `comm_prob`, pick a location
    /// from the bee's own known-nectar memory.
    Random,
    /// Shared targeting: pick from the hive memory, avoiding locations
    /// already claimed by two living bees.
    Intelligent,
}

impl Strategy {
    /// All strategies, in the order the parameter sweep iterates them.
    pub const ALL: [Self; 3] = [Self::None, Self::Random, Self::Intelligent];

    /// Parse a strategy name as it appears in the parameter file.
    ///
    /// Returns `None` for anything other than the three recognized names;
    /// the loader turns that into a fatal configuration error.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "none" => Some(Self::None),
            "random" => Some(Self::Random),
            "intelligent" => Some(Self::Intelligent),
            _ => None,
        }
    }

    /// The lowercase name used in parameter files and sweep output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Random => "random",
            Self::Intelligent => "intelligent",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terrain class of a single world-grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainCell {
    /// Open ground; bees may occupy it.
    #[default]
    Empty,
    /// A flower grows here.
    Flower,
    /// A tree (with its own flowers) grows here.
    Tree,
    /// Water; blocks bee movement.
    Water,
    /// A building; blocks bee movement.
    Building,
}

/// Kind of barrier occupying a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarrierKind {
    /// Open water.
    Water,
    /// A man-made structure.
    Building,
}

impl BarrierKind {
    /// The terrain-grid cell class this barrier kind maps to.
    pub const fn cell(self) -> TerrainCell {
        match self {
            Self::Water => TerrainCell::Water,
            Self::Building => TerrainCell::Building,
        }
    }
}
