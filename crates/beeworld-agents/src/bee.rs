//! The [`Bee`] agent and its per-run state.

use serde::{Deserialize, Serialize};

use beeworld_types::{BeeId, Position};

use crate::config::BeeConfig;

/// A worker bee.
///
/// Bees are created once per run at random in-hive positions and only ever
/// mutate through [`advance`](crate::behavior::advance). A dead bee stays in
/// the roster but is inert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bee {
    /// Stable identifier within the roster.
    pub id: BeeId,
    /// Current grid position (hive frame while in the hive, world frame
    /// outside).
    pub position: Position,
    /// Age in ticks.
    pub age: u32,
    /// Remaining energy; the bee dies when this reaches 0.
    pub energy: u32,
    /// Whether the bee is still alive.
    pub alive: bool,
    /// Whether the bee is currently inside the hive.
    pub in_hive: bool,
    /// Whether the bee is on a foraging mission.
    pub on_mission: bool,
    /// Nectar currently carried, deposited on hive return.
    pub carrying_nectar: u32,
    /// Mission target chosen at mission start, if any.
    pub target: Option<Position>,
    /// Private bounded memory of nectar sources this bee has visited.
    pub known_nectar: Vec<Position>,
    /// Remaining hive-wait ticks; the bee recharges while this is nonzero.
    pub wait_ticks: u32,
    /// Total nectar collected over the bee's lifetime.
    pub total_nectar: u32,
    /// Ticks spent outside the hive on the current mission.
    pub steps_outside: u32,
}

impl Bee {
    /// Create a live bee inside the hive at the given position.
    pub const fn new(id: BeeId, position: Position, config: &BeeConfig) -> Self {
        Self {
            id,
            position,
            age: 0,
            energy: config.initial_energy,
            alive: true,
            in_hive: true,
            on_mission: false,
            carrying_nectar: 0,
            target: None,
            known_nectar: Vec::new(),
            wait_ticks: 0,
            total_nectar: 0,
            steps_outside: 0,
        }
    }

    /// Record a nectar source in the bee's private memory, skipping
    /// duplicates.
    pub fn remember_source(&mut self, source: Position) {
        if !self.known_nectar.contains(&source) {
            self.known_nectar.push(source);
        }
    }

    /// Whether the bee ever collected any nectar.
    pub const fn ever_collected(&self) -> bool {
        self.total_nectar > 0
    }
}
