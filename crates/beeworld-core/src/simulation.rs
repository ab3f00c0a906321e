//! A single simulation run.
//!
//! [`Simulation`] owns everything a run mutates: the instantiated terrain,
//! the hive grid, the bee roster, the shared hive memory, and the RNG. The
//! tick loop updates bees strictly in roster order; before each bee steps,
//! the targets held by living bees are snapshotted so the intelligent
//! strategy observes the roster exactly as it stands mid-tick.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use beeworld_agents::{Bee, BeeConfig, HiveMemory, StepContext, advance};
use beeworld_types::{BeeId, Position};
use beeworld_world::{HiveGrid, Terrain, TerrainLayout};

use crate::params::Parameters;

/// Aggregate metrics derived from a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Total honey deposited over the run.
    pub total_honey: u32,
    /// Total honey divided by the roster size (0 for an empty roster).
    pub avg_honey_per_bee: f64,
    /// Fraction of bees that ever carried or accumulated nectar.
    pub success_rate: f64,
}

/// One configured simulation run.
pub struct Simulation {
    layout: TerrainLayout,
    params: Parameters,
    config: BeeConfig,
    terrain: Terrain,
    hive: HiveGrid,
    bees: Vec<Bee>,
    hive_memory: HiveMemory,
    rng: SmallRng,
    total_honey: u32,
    honey_over_time: Vec<u32>,
}

impl Simulation {
    /// Build a run from a parsed terrain layout and validated parameters.
    ///
    /// The run starts in its reset state and can be re-run after another
    /// call to [`Self::reset`].
    pub fn new(layout: TerrainLayout, params: Parameters) -> Self {
        let mut sim = Self {
            terrain: layout.instantiate(params.nectar_amount),
            hive: HiveGrid::new(params.hive_width, params.hive_height),
            bees: Vec::new(),
            hive_memory: HiveMemory::new(),
            rng: SmallRng::seed_from_u64(params.seed),
            total_honey: 0,
            honey_over_time: Vec::new(),
            config: BeeConfig::default(),
            layout,
            params,
        };
        sim.reset();
        sim
    }

    /// Reset all run state: terrain, hive, roster, memory, and RNG.
    pub fn reset(&mut self) {
        self.terrain = self.layout.instantiate(self.params.nectar_amount);
        self.hive = HiveGrid::new(self.params.hive_width, self.params.hive_height);
        self.rng = SmallRng::seed_from_u64(self.params.seed);
        self.hive_memory.clear();
        self.total_honey = 0;
        self.honey_over_time.clear();

        let width = self.params.hive_width.max(1);
        let height = self.params.hive_height.max(1);
        self.bees = (0..self.params.num_bees)
            .map(|i| {
                let position = Position::new(
                    self.rng.random_range(0..width),
                    self.rng.random_range(0..height),
                );
                Bee::new(BeeId::new(i), position, &self.config)
            })
            .collect();
        debug!(
            bees = self.bees.len(),
            flowers = self.terrain.flowers.len(),
            trees = self.terrain.trees.len(),
            barriers = self.terrain.barriers.len(),
            "simulation reset"
        );
    }

    /// Advance every bee by one tick, in roster order.
    ///
    /// Returns the honey deposited this tick.
    pub fn step_tick(&mut self) -> u32 {
        let mut tick_honey: u32 = 0;

        for index in 0..self.bees.len() {
            // Snapshot targets of living bees so intelligent target
            // selection sees earlier updates from this same tick.
            let live_targets: Vec<Position> = self
                .bees
                .iter()
                .filter(|b| b.alive)
                .filter_map(|b| b.target)
                .collect();

            let Some(bee) = self.bees.get_mut(index) else {
                break;
            };
            let mut ctx = StepContext {
                grid: &self.terrain.grid,
                hive_pos: self.params.hive_pos,
                flowers: &mut self.terrain.flowers,
                trees: &mut self.terrain.trees,
                barriers: &self.terrain.barriers,
                comm_prob: self.params.comm_prob,
                strategy: self.params.strategy,
                hive_memory: &mut self.hive_memory,
                live_targets: &live_targets,
            };
            let deposited = advance(bee, &mut ctx, &self.config, &mut self.rng);
            if deposited > 0 {
                self.hive.deposit(bee.position, deposited);
            }
            tick_honey = tick_honey.saturating_add(deposited);
        }

        tick_honey
    }

    /// Run the configured number of ticks and return the total honey.
    pub fn run(&mut self) -> u32 {
        for tick in 0..self.params.sim_length {
            let tick_honey = self.step_tick();
            self.total_honey = self.total_honey.saturating_add(tick_honey);
            self.honey_over_time.push(tick_honey);
            debug!(tick, tick_honey, total = self.total_honey, "tick complete");
        }
        info!(
            total_honey = self.total_honey,
            strategy = %self.params.strategy,
            "run complete"
        );
        self.total_honey
    }

    /// Aggregate metrics for the run so far.
    pub fn summary(&self) -> RunSummary {
        let roster = self.bees.len();
        let (avg_honey_per_bee, success_rate) = if roster == 0 {
            (0.0, 0.0)
        } else {
            let successes = self
                .bees
                .iter()
                .filter(|b| b.carrying_nectar > 0 || b.ever_collected())
                .count();
            let roster = to_f64(roster);
            (
                f64::from(self.total_honey) / roster,
                to_f64(successes) / roster,
            )
        };
        RunSummary {
            total_honey: self.total_honey,
            avg_honey_per_bee,
            success_rate,
        }
    }

    /// The bee roster.
    pub fn bees(&self) -> &[Bee] {
        &self.bees
    }

    /// The hive's honey grid.
    pub const fn hive(&self) -> &HiveGrid {
        &self.hive
    }

    /// The instantiated terrain.
    pub const fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    /// Total honey deposited so far.
    pub const fn total_honey(&self) -> u32 {
        self.total_honey
    }

    /// Honey deposited per tick, in tick order.
    pub fn honey_over_time(&self) -> &[u32] {
        &self.honey_over_time
    }
}

/// Lossless-enough conversion for roster-sized counts.
#[allow(clippy::cast_precision_loss)]
const fn to_f64(count: usize) -> f64 {
    count as f64
}
