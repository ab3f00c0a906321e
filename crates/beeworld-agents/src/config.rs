//! Configurable parameters for bee vitals, missions, and memory.

use serde::{Deserialize, Serialize};

/// Tunable constants governing a bee's lifecycle and memory.
///
/// The defaults reproduce the standard simulation: bees live 50 ticks,
/// start with 100 energy, leave on a mission once 4 ticks old, are forced
/// home after 5 ticks outside, and recharge while waiting 4 ticks in the
/// hive between missions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeeConfig {
    /// Energy a bee is born with.
    pub initial_energy: u32,
    /// Upper bound on energy; recharge never exceeds this.
    pub energy_cap: u32,
    /// Age (in ticks) at which a bee dies.
    pub lifespan: u32,
    /// Ticks a bee waits in the hive after returning from a mission.
    pub wait_ticks: u32,
    /// Energy regained per waiting tick.
    pub recharge_per_wait_tick: u32,
    /// Age a bee must reach before its first mission.
    pub mission_age: u32,
    /// Ticks outside the hive that trigger a forced return.
    pub max_steps_outside: u32,
    /// Maximum entries in a bee's private known-nectar memory.
    pub memory_cap: usize,
    /// Per-entry survival probability when memory is pruned at mission
    /// start.
    pub memory_retention: f64,
}

impl Default for BeeConfig {
    fn default() -> Self {
        Self {
            initial_energy: 100,
            energy_cap: 100,
            lifespan: 50,
            wait_ticks: 4,
            recharge_per_wait_tick: 5,
            mission_age: 4,
            max_steps_outside: 5,
            memory_cap: 5,
            memory_retention: 0.9,
        }
    }
}
