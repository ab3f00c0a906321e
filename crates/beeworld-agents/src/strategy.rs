//! Mission-start target selection and private-memory pruning.
//!
//! Both operations run exactly once per mission, in the in-hive branch of
//! [`advance`](crate::behavior::advance): the bee first picks a target
//! according to its strategy (from the still-unpruned known-nectar list),
//! then prunes its private memory.

use rand::Rng;
use rand::seq::IndexedRandom;

use beeworld_types::{Position, Strategy};

use crate::config::BeeConfig;
use crate::memory::HiveMemory;

/// Maximum number of living bees that may share one intelligent target.
const MAX_BEES_PER_TARGET: usize = 2;

/// Pick a mission target for a bee leaving the hive.
///
/// - [`Strategy::None`] never sets a target.
/// - [`Strategy::Random`] draws against `comm_prob` and, on success, picks
///   uniformly from the bee's own known-nectar list. An empty list means no
///   draw and no target.
/// - [`Strategy::Intelligent`] picks uniformly from the hive-memory entries
///   that fewer than two living bees are already aimed at (`live_targets`
///   holds one entry per living bee with a target). No eligible entry means
///   no target.
pub fn select_target<R: Rng + ?Sized>(
    strategy: Strategy,
    comm_prob: f64,
    known_nectar: &[Position],
    hive_memory: &HiveMemory,
    live_targets: &[Position],
    rng: &mut R,
) -> Option<Position> {
    match strategy {
        Strategy::None => None,
        Strategy::Random => {
            if !known_nectar.is_empty() && rng.random::<f64>() < comm_prob {
                known_nectar.choose(rng).copied()
            } else {
                None
            }
        }
        Strategy::Intelligent => {
            let eligible: Vec<Position> = hive_memory
                .as_slice()
                .iter()
                .filter(|loc| {
                    live_targets.iter().filter(|t| t == loc).count() < MAX_BEES_PER_TARGET
                })
                .copied()
                .collect();
            eligible.choose(rng).copied()
        }
    }
}

/// Probabilistically prune a bee's private known-nectar memory.
///
/// Each entry survives with probability `memory_retention` (drawn in list
/// order), and the survivors are truncated to `memory_cap` entries.
pub fn prune_memory<R: Rng + ?Sized>(
    known_nectar: &mut Vec<Position>,
    config: &BeeConfig,
    rng: &mut R,
) {
    known_nectar.retain(|_loc| rng.random::<f64>() < config.memory_retention);
    known_nectar.truncate(config.memory_cap);
}
