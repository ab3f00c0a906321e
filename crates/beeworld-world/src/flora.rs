//! Nectar sources: flowers and the trees that group them.
//!
//! A [`Flower`] holds a depleting stock of nectar. Each collection takes up
//! to [`NECTAR_PER_VISIT`] units, capped by the remaining stock, with a
//! floor of zero. A [`Tree`] owns a fixed set of child flowers and delegates
//! each collection to one child chosen uniformly at random, so a tree can
//! still yield nothing while some of its flowers are empty.

use rand::Rng;
use rand::seq::IndexedMutRandom;
use serde::{Deserialize, Serialize};

use beeworld_types::Position;

/// Maximum nectar units a bee can take from a flower in one visit.
pub const NECTAR_PER_VISIT: u32 = 10;

/// A flower holding a depleting stock of nectar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flower {
    /// Grid cell the flower occupies.
    pub position: Position,
    /// Display name (e.g. `rose`, or `flower_0` for tree children).
    pub name: String,
    /// Display color (unused by the engine, kept from the map data).
    pub color: String,
    /// Remaining nectar units.
    pub nectar: u32,
}

impl Flower {
    /// Create a flower with a full nectar stock.
    pub const fn new(position: Position, name: String, color: String, nectar: u32) -> Self {
        Self {
            position,
            name,
            color,
            nectar,
        }
    }

    /// Collect up to [`NECTAR_PER_VISIT`] units, reducing the stock.
    ///
    /// Returns the units actually taken (0 if the flower is empty).
    pub const fn collect_nectar(&mut self) -> u32 {
        let taken = if self.nectar < NECTAR_PER_VISIT {
            self.nectar
        } else {
            NECTAR_PER_VISIT
        };
        self.nectar = self.nectar.saturating_sub(taken);
        taken
    }
}

/// A tree grouping several flowers at one grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    /// Grid cell the tree occupies.
    pub position: Position,
    /// The tree's own flowers; collection picks one uniformly at random.
    pub flowers: Vec<Flower>,
}

impl Tree {
    /// Create a tree from its position and child flowers.
    pub const fn new(position: Position, flowers: Vec<Flower>) -> Self {
        Self { position, flowers }
    }

    /// Collect nectar from one uniformly chosen child flower.
    ///
    /// Exactly one child is tried per call; if that child is empty the call
    /// yields 0 even when siblings still hold nectar.
    pub fn collect_nectar<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u32 {
        self.flowers
            .choose_mut(rng)
            .map_or(0, Flower::collect_nectar)
    }
}
