//! The single-tick bee state transition.
//!
//! [`advance`] updates one bee for one timestep and returns the nectar it
//! deposited in the hive this tick (0 in every other case). The transition
//! runs in a fixed order: death checks, hive-wait handling, mission start,
//! then outside-hive movement where forced return outranks a nectar-laden
//! return, which outranks local search and random walking.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use beeworld_types::{MOORE_OFFSETS, Position, Strategy};
use beeworld_world::{Barrier, Flower, Tree, WorldGrid};

use crate::bee::Bee;
use crate::config::BeeConfig;
use crate::memory::HiveMemory;
use crate::strategy::{prune_memory, select_target};

/// The world a bee sees during one step.
///
/// Flowers and trees are mutable because collection depletes them; the hive
/// memory is mutable because returning bees contribute to it. `live_targets`
/// is a snapshot of the targets held by currently-living bees, used only by
/// the intelligent strategy to avoid crowded sources.
pub struct StepContext<'a> {
    /// Read-only terrain matrix for bounds checks.
    pub grid: &'a WorldGrid,
    /// The hive's position in the world frame.
    pub hive_pos: Position,
    /// All flowers in the world, depleted in place by collection.
    pub flowers: &'a mut [Flower],
    /// All trees in the world, depleted in place by collection.
    pub trees: &'a mut [Tree],
    /// Impassable cells.
    pub barriers: &'a [Barrier],
    /// Probability that a random-strategy bee recalls a known source.
    pub comm_prob: f64,
    /// Foraging strategy in force for this run.
    pub strategy: Strategy,
    /// Shared nectar-source pool (intelligent strategy only).
    pub hive_memory: &'a mut HiveMemory,
    /// One entry per living bee that currently holds a target.
    pub live_targets: &'a [Position],
}

/// Advance one bee by one timestep.
///
/// Returns the nectar deposited in the hive this tick. Side effects are
/// confined to the bee's own fields, the collected flower or tree's stock,
/// and (intelligent strategy) the shared hive memory.
pub fn advance<R: Rng + ?Sized>(
    bee: &mut Bee,
    ctx: &mut StepContext<'_>,
    config: &BeeConfig,
    rng: &mut R,
) -> u32 {
    if !bee.alive {
        return 0;
    }

    // Vitals tick: death is terminal and checked before any other change.
    bee.energy = bee.energy.saturating_sub(1);
    bee.age = bee.age.saturating_add(1);
    if bee.energy == 0 || bee.age >= config.lifespan {
        bee.alive = false;
        debug!(bee = %bee.id, age = bee.age, "bee died");
        return 0;
    }

    // Waiting in the hive recharges; no movement or collection.
    if bee.wait_ticks > 0 {
        bee.wait_ticks = bee.wait_ticks.saturating_sub(1);
        bee.energy = bee
            .energy
            .saturating_add(config.recharge_per_wait_tick)
            .min(config.energy_cap);
        return 0;
    }

    if bee.in_hive {
        if bee.age >= config.mission_age && !bee.on_mission {
            begin_mission(bee, ctx, config, rng);
        }
        return 0;
    }

    step_outside(bee, ctx, config, rng)
}

/// Send a hive bee out on a mission: pick a target from the still-unpruned
/// known-nectar list, then prune the list.
fn begin_mission<R: Rng + ?Sized>(
    bee: &mut Bee,
    ctx: &StepContext<'_>,
    config: &BeeConfig,
    rng: &mut R,
) {
    bee.on_mission = true;
    bee.in_hive = false;
    bee.steps_outside = 0;
    bee.target = select_target(
        ctx.strategy,
        ctx.comm_prob,
        &bee.known_nectar,
        ctx.hive_memory,
        ctx.live_targets,
        rng,
    );
    prune_memory(&mut bee.known_nectar, config, rng);
    debug!(bee = %bee.id, target = ?bee.target, "mission started");
}

/// One outside-hive tick: forced return, nectar-laden return, or search.
fn step_outside<R: Rng + ?Sized>(
    bee: &mut Bee,
    ctx: &mut StepContext<'_>,
    config: &BeeConfig,
    rng: &mut R,
) -> u32 {
    bee.steps_outside = bee.steps_outside.saturating_add(1);

    let mut deposited = 0;
    let mut candidate = bee.position;

    if bee.steps_outside >= config.max_steps_outside {
        // Forced return: head home regardless of nectar held, and do not
        // deposit on arrival.
        candidate = bee.position.step_toward(ctx.hive_pos);
        if candidate == ctx.hive_pos {
            bee.in_hive = true;
            bee.on_mission = false;
            bee.wait_ticks = config.wait_ticks;
            debug!(
                bee = %bee.id,
                steps = bee.steps_outside,
                "returned to hive after forced timeout"
            );
            bee.steps_outside = 0;
        }
    } else if bee.carrying_nectar > 0 {
        candidate = bee.position.step_toward(ctx.hive_pos);
        if candidate == ctx.hive_pos {
            bee.in_hive = true;
            bee.on_mission = false;
            deposited = bee.carrying_nectar;
            bee.carrying_nectar = 0;
            bee.wait_ticks = config.wait_ticks;
            bee.steps_outside = 0;
            debug!(bee = %bee.id, nectar = deposited, "returned to hive with nectar");
            if ctx.strategy == Strategy::Intelligent {
                for location in &bee.known_nectar {
                    if ctx.hive_memory.share(*location) {
                        debug!(bee = %bee.id, %location, "shared nectar location");
                    }
                }
            }
        }
    } else {
        let collected = search_neighborhood(bee, ctx, rng);
        if !collected {
            candidate = random_walk(bee, ctx, rng);
        }
    }

    if ctx.grid.in_bounds(candidate) && !is_blocked(ctx.barriers, candidate) {
        bee.position = candidate;
    }

    deposited
}

/// Scan the 3x3 neighborhood (own cell included) for a nectar source.
///
/// Cells are probed in fixed nested `(dx, dy)` order. At each cell, flowers
/// are tried before trees and the first successful collection wins the whole
/// scan. Only the first tree at a cell is tried, so an unlucky draw from an
/// empty child flower moves the scan on to the next cell.
fn search_neighborhood<R: Rng + ?Sized>(
    bee: &mut Bee,
    ctx: &mut StepContext<'_>,
    rng: &mut R,
) -> bool {
    for dx in -1..=1 {
        for dy in -1..=1 {
            let probe = bee.position.offset(dx, dy);
            if !ctx.grid.in_bounds(probe) {
                continue;
            }
            for flower in &mut *ctx.flowers {
                if flower.position == probe {
                    let taken = flower.collect_nectar();
                    if taken > 0 {
                        gather(bee, probe, taken);
                        return true;
                    }
                }
            }
            if let Some(tree) = ctx.trees.iter_mut().find(|t| t.position == probe) {
                let taken = tree.collect_nectar(rng);
                if taken > 0 {
                    gather(bee, probe, taken);
                    return true;
                }
            }
        }
    }
    false
}

/// Book a successful collection into the bee's state.
fn gather(bee: &mut Bee, source: Position, taken: u32) {
    bee.carrying_nectar = taken;
    bee.total_nectar = bee.total_nectar.saturating_add(taken);
    bee.remember_source(source);
    bee.target = None;
    debug!(bee = %bee.id, %source, nectar = taken, "collected nectar");
}

/// Pick the first in-bounds, barrier-free cell from a shuffled Moore
/// neighborhood, or stay put when every neighbor is blocked.
fn random_walk<R: Rng + ?Sized>(bee: &Bee, ctx: &StepContext<'_>, rng: &mut R) -> Position {
    let mut moves = MOORE_OFFSETS;
    moves.shuffle(rng);
    for (dx, dy) in moves {
        let probe = bee.position.offset(dx, dy);
        if ctx.grid.in_bounds(probe) && !is_blocked(ctx.barriers, probe) {
            return probe;
        }
    }
    bee.position
}

/// Whether a barrier occupies `pos`.
fn is_blocked(barriers: &[Barrier], pos: Position) -> bool {
    barriers.iter().any(|b| b.position == pos)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use beeworld_types::{BarrierKind, BeeId};

    use super::*;

    const HIVE: Position = Position::new(20, 20);

    struct World {
        grid: WorldGrid,
        flowers: Vec<Flower>,
        trees: Vec<Tree>,
        barriers: Vec<Barrier>,
        hive_memory: HiveMemory,
        live_targets: Vec<Position>,
        comm_prob: f64,
        strategy: Strategy,
    }

    impl World {
        fn empty() -> Self {
            Self {
                grid: WorldGrid::new(40, 35),
                flowers: Vec::new(),
                trees: Vec::new(),
                barriers: Vec::new(),
                hive_memory: HiveMemory::new(),
                live_targets: Vec::new(),
                comm_prob: 0.7,
                strategy: Strategy::None,
            }
        }

        fn ctx(&mut self) -> StepContext<'_> {
            StepContext {
                grid: &self.grid,
                hive_pos: HIVE,
                flowers: &mut self.flowers,
                trees: &mut self.trees,
                barriers: &self.barriers,
                comm_prob: self.comm_prob,
                strategy: self.strategy,
                hive_memory: &mut self.hive_memory,
                live_targets: &self.live_targets,
            }
        }
    }

    fn make_bee(position: Position) -> Bee {
        Bee::new(BeeId::new(0), position, &BeeConfig::default())
    }

    fn make_forager(position: Position) -> Bee {
        let mut bee = make_bee(position);
        bee.in_hive = false;
        bee.on_mission = true;
        bee.age = 10;
        bee
    }

    fn make_flower(position: Position, nectar: u32) -> Flower {
        Flower::new(position, String::from("rose"), String::from("red"), nectar)
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    #[test]
    fn dead_bee_is_inert() {
        let mut world = World::empty();
        let mut bee = make_forager(Position::new(5, 5));
        bee.alive = false;
        bee.energy = 50;
        bee.age = 10;

        let deposited = advance(&mut bee, &mut world.ctx(), &BeeConfig::default(), &mut rng());

        assert_eq!(deposited, 0);
        assert_eq!(bee.energy, 50);
        assert_eq!(bee.age, 10);
        assert_eq!(bee.position, Position::new(5, 5));
    }

    #[test]
    fn energy_drains_by_one_per_active_tick() {
        let mut world = World::empty();
        let mut bee = make_bee(Position::new(5, 5));

        advance(&mut bee, &mut world.ctx(), &BeeConfig::default(), &mut rng());

        assert_eq!(bee.energy, 99);
        assert_eq!(bee.age, 1);
        assert!(bee.alive);
    }

    #[test]
    fn bee_dies_when_energy_runs_out() {
        let mut world = World::empty();
        let mut bee = make_bee(Position::new(5, 5));
        bee.energy = 1;

        advance(&mut bee, &mut world.ctx(), &BeeConfig::default(), &mut rng());

        assert!(!bee.alive);
        assert_eq!(bee.energy, 0);
    }

    #[test]
    fn bee_dies_at_lifespan() {
        let mut world = World::empty();
        let mut bee = make_bee(Position::new(5, 5));
        bee.age = 49;

        advance(&mut bee, &mut world.ctx(), &BeeConfig::default(), &mut rng());

        assert!(!bee.alive);
        assert_eq!(bee.age, 50);
    }

    #[test]
    fn dead_bee_never_moves_again() {
        let mut world = World::empty();
        world.flowers.push(make_flower(Position::new(5, 5), 100));
        let mut bee = make_forager(Position::new(5, 5));
        bee.age = 49;

        advance(&mut bee, &mut world.ctx(), &BeeConfig::default(), &mut rng());
        assert!(!bee.alive);

        for _ in 0..5 {
            advance(&mut bee, &mut world.ctx(), &BeeConfig::default(), &mut rng());
        }
        assert_eq!(bee.position, Position::new(5, 5));
        assert_eq!(bee.carrying_nectar, 0);
        assert_eq!(world.flowers.first().map(|f| f.nectar), Some(100));
    }

    #[test]
    fn waiting_bee_recharges_and_stays_put() {
        let mut world = World::empty();
        let mut bee = make_bee(Position::new(5, 5));
        bee.wait_ticks = 4;
        bee.energy = 50;

        let deposited = advance(&mut bee, &mut world.ctx(), &BeeConfig::default(), &mut rng());

        assert_eq!(deposited, 0);
        assert_eq!(bee.wait_ticks, 3);
        // -1 drain then +5 recharge.
        assert_eq!(bee.energy, 54);
        assert_eq!(bee.position, Position::new(5, 5));
    }

    #[test]
    fn recharge_caps_at_full_energy() {
        let mut world = World::empty();
        let mut bee = make_bee(Position::new(5, 5));
        bee.wait_ticks = 2;
        bee.energy = 99;

        advance(&mut bee, &mut world.ctx(), &BeeConfig::default(), &mut rng());

        assert_eq!(bee.energy, 100);
    }

    #[test]
    fn young_bee_stays_in_hive() {
        let mut world = World::empty();
        let mut bee = make_bee(Position::new(5, 5));

        advance(&mut bee, &mut world.ctx(), &BeeConfig::default(), &mut rng());

        assert!(bee.in_hive);
        assert!(!bee.on_mission);
    }

    #[test]
    fn mission_starts_at_mission_age() {
        let mut world = World::empty();
        let mut bee = make_bee(Position::new(5, 5));
        bee.age = 4;

        advance(&mut bee, &mut world.ctx(), &BeeConfig::default(), &mut rng());

        assert!(bee.on_mission);
        assert!(!bee.in_hive);
        assert_eq!(bee.steps_outside, 0);
        assert_eq!(bee.target, None);
    }

    #[test]
    fn none_strategy_targets_stay_unset_over_full_lifecycle() {
        let mut world = World::empty();
        world.comm_prob = 0.0;
        world.flowers.push(make_flower(Position::new(22, 22), 100));
        let mut bee = make_bee(Position::new(20, 20));
        let config = BeeConfig::default();
        let mut rng = rng();

        for _ in 0..40 {
            advance(&mut bee, &mut world.ctx(), &config, &mut rng);
            assert_eq!(bee.target, None);
        }
    }

    #[test]
    fn collection_takes_ten_from_rich_flower() {
        let mut world = World::empty();
        world.flowers.push(make_flower(Position::new(10, 10), 100));
        let mut bee = make_forager(Position::new(10, 10));

        let deposited = advance(&mut bee, &mut world.ctx(), &BeeConfig::default(), &mut rng());

        assert_eq!(deposited, 0);
        assert_eq!(bee.carrying_nectar, 10);
        assert_eq!(bee.total_nectar, 10);
        assert_eq!(world.flowers.first().map(|f| f.nectar), Some(90));
        assert_eq!(bee.known_nectar, vec![Position::new(10, 10)]);
        // Collecting does not move the bee.
        assert_eq!(bee.position, Position::new(10, 10));
    }

    #[test]
    fn collection_reaches_adjacent_cells() {
        let mut world = World::empty();
        world.flowers.push(make_flower(Position::new(11, 11), 100));
        let mut bee = make_forager(Position::new(10, 10));

        advance(&mut bee, &mut world.ctx(), &BeeConfig::default(), &mut rng());

        assert_eq!(bee.carrying_nectar, 10);
        assert_eq!(world.flowers.first().map(|f| f.nectar), Some(90));
    }

    #[test]
    fn scarce_flower_yields_its_remainder() {
        let mut world = World::empty();
        world.flowers.push(make_flower(Position::new(10, 10), 4));
        let mut bee = make_forager(Position::new(10, 10));

        advance(&mut bee, &mut world.ctx(), &BeeConfig::default(), &mut rng());

        assert_eq!(bee.carrying_nectar, 4);
        assert_eq!(world.flowers.first().map(|f| f.nectar), Some(0));
    }

    #[test]
    fn empty_flower_is_skipped_for_a_fuller_one() {
        let mut world = World::empty();
        world.flowers.push(make_flower(Position::new(10, 10), 0));
        world.flowers.push(make_flower(Position::new(10, 10), 30));
        let mut bee = make_forager(Position::new(10, 10));

        advance(&mut bee, &mut world.ctx(), &BeeConfig::default(), &mut rng());

        assert_eq!(bee.carrying_nectar, 10);
    }

    #[test]
    fn flower_wins_over_tree_at_same_cell() {
        let pos = Position::new(10, 10);
        let mut world = World::empty();
        world.flowers.push(make_flower(pos, 100));
        world
            .trees
            .push(Tree::new(pos, vec![make_flower(pos, 100)]));
        let mut bee = make_forager(pos);

        advance(&mut bee, &mut world.ctx(), &BeeConfig::default(), &mut rng());

        assert_eq!(bee.carrying_nectar, 10);
        assert_eq!(world.flowers.first().map(|f| f.nectar), Some(90));
        // The tree's child is untouched.
        let child_nectar = world.trees.first().and_then(|t| t.flowers.first()).map(|f| f.nectar);
        assert_eq!(child_nectar, Some(100));
    }

    #[test]
    fn tree_collection_targets_one_child() {
        let pos = Position::new(10, 10);
        let mut world = World::empty();
        let children = vec![
            make_flower(pos, 100),
            make_flower(pos, 100),
            make_flower(pos, 100),
        ];
        world.trees.push(Tree::new(pos, children));
        let mut bee = make_forager(pos);

        advance(&mut bee, &mut world.ctx(), &BeeConfig::default(), &mut rng());

        assert_eq!(bee.carrying_nectar, 10);
        let depleted = world
            .trees
            .first()
            .map(|t| t.flowers.iter().filter(|f| f.nectar == 90).count());
        assert_eq!(depleted, Some(1));
    }

    #[test]
    fn carrying_bee_steps_toward_hive() {
        let mut world = World::empty();
        let mut bee = make_forager(Position::new(10, 10));
        bee.carrying_nectar = 10;

        let deposited = advance(&mut bee, &mut world.ctx(), &BeeConfig::default(), &mut rng());

        assert_eq!(deposited, 0);
        assert_eq!(bee.position, Position::new(11, 11));
        assert!(!bee.in_hive);
    }

    #[test]
    fn deposit_on_reaching_hive() {
        let mut world = World::empty();
        let mut bee = make_forager(HIVE);
        bee.carrying_nectar = 7;

        let deposited = advance(&mut bee, &mut world.ctx(), &BeeConfig::default(), &mut rng());

        assert_eq!(deposited, 7);
        assert_eq!(bee.carrying_nectar, 0);
        assert_eq!(bee.wait_ticks, 4);
        assert!(bee.in_hive);
        assert!(!bee.on_mission);
        assert_eq!(bee.steps_outside, 0);
    }

    #[test]
    fn forced_return_does_not_deposit() {
        let mut world = World::empty();
        let mut bee = make_forager(Position::new(21, 21));
        bee.carrying_nectar = 10;
        bee.steps_outside = 4;

        let deposited = advance(&mut bee, &mut world.ctx(), &BeeConfig::default(), &mut rng());

        assert_eq!(deposited, 0);
        assert!(bee.in_hive);
        assert!(!bee.on_mission);
        assert_eq!(bee.wait_ticks, 4);
        // The nectar is still carried, not deposited.
        assert_eq!(bee.carrying_nectar, 10);
        assert_eq!(bee.position, HIVE);
    }

    #[test]
    fn forced_return_keeps_walking_until_home() {
        let mut world = World::empty();
        let mut bee = make_forager(Position::new(30, 30));
        bee.steps_outside = 10;

        advance(&mut bee, &mut world.ctx(), &BeeConfig::default(), &mut rng());

        assert_eq!(bee.position, Position::new(29, 29));
        assert!(!bee.in_hive);
        // The counter keeps climbing until the hive is reached.
        assert_eq!(bee.steps_outside, 11);
    }

    #[test]
    fn intelligent_return_shares_known_sources() {
        let mut world = World::empty();
        world.strategy = Strategy::Intelligent;
        let mut bee = make_forager(HIVE);
        bee.carrying_nectar = 10;
        bee.known_nectar = vec![Position::new(10, 10), Position::new(11, 11)];
        world.hive_memory.share(Position::new(10, 10));

        advance(&mut bee, &mut world.ctx(), &BeeConfig::default(), &mut rng());

        // Only the new location was added; no duplicate of (10, 10).
        assert_eq!(
            world.hive_memory.as_slice(),
            &[Position::new(10, 10), Position::new(11, 11)]
        );
    }

    #[test]
    fn non_intelligent_return_shares_nothing() {
        let mut world = World::empty();
        world.strategy = Strategy::Random;
        let mut bee = make_forager(HIVE);
        bee.carrying_nectar = 10;
        bee.known_nectar = vec![Position::new(10, 10)];

        advance(&mut bee, &mut world.ctx(), &BeeConfig::default(), &mut rng());

        assert!(world.hive_memory.is_empty());
    }

    #[test]
    fn random_walk_stays_in_bounds_and_off_barriers() {
        let mut world = World::empty();
        // Corner bee: only 3 neighbors are in bounds; block two of them.
        world.barriers.push(Barrier {
            position: Position::new(1, 0),
            kind: BarrierKind::Water,
        });
        world.barriers.push(Barrier {
            position: Position::new(0, 1),
            kind: BarrierKind::Building,
        });
        let mut bee = make_forager(Position::new(0, 0));

        advance(&mut bee, &mut world.ctx(), &BeeConfig::default(), &mut rng());

        assert_eq!(bee.position, Position::new(1, 1));
    }

    #[test]
    fn fully_blocked_bee_stays_put() {
        let mut world = World::empty();
        for (dx, dy) in MOORE_OFFSETS {
            world.barriers.push(Barrier {
                position: Position::new(10, 10).offset(dx, dy),
                kind: BarrierKind::Water,
            });
        }
        let mut bee = make_forager(Position::new(10, 10));

        advance(&mut bee, &mut world.ctx(), &BeeConfig::default(), &mut rng());

        assert_eq!(bee.position, Position::new(10, 10));
    }

    #[test]
    fn full_cycle_collect_return_deposit() {
        let mut world = World::empty();
        world.flowers.push(make_flower(Position::new(22, 22), 100));
        let mut bee = make_forager(Position::new(22, 22));
        let config = BeeConfig::default();
        let mut rng = rng();

        // Tick 1: collect at the flower.
        assert_eq!(advance(&mut bee, &mut world.ctx(), &config, &mut rng), 0);
        assert_eq!(bee.carrying_nectar, 10);

        // Tick 2: step to (21, 21).
        assert_eq!(advance(&mut bee, &mut world.ctx(), &config, &mut rng), 0);
        assert_eq!(bee.position, Position::new(21, 21));

        // Tick 3: reach the hive and deposit.
        let deposited = advance(&mut bee, &mut world.ctx(), &config, &mut rng);
        assert_eq!(deposited, 10);
        assert!(bee.in_hive);
        assert_eq!(bee.wait_ticks, 4);
        assert_eq!(bee.total_nectar, 10);
    }
}
