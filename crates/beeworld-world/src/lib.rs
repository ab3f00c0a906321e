//! Terrain, flora, barriers, and the hive grid for the Beeworld simulation.
//!
//! This crate models the physical world the bees forage in: a read-only
//! terrain grid loaded from a CSV map, the flowers and trees that hold
//! nectar, the barriers that block movement, and the hive grid that
//! accumulates deposited honey.
//!
//! # Modules
//!
//! - [`error`] -- Error types for terrain loading.
//! - [`flora`] -- [`Flower`] and [`Tree`] nectar sources and their
//!   depletion rules.
//! - [`grid`] -- [`WorldGrid`], the cell matrix tagging each cell's
//!   terrain class.
//! - [`hive`] -- [`HiveGrid`], the comb-patterned honey accumulator.
//! - [`terrain`] -- The CSV map loader and per-run terrain instantiation.

pub mod error;
pub mod flora;
pub mod grid;
pub mod hive;
pub mod terrain;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use flora::{Flower, NECTAR_PER_VISIT, Tree};
pub use grid::WorldGrid;
pub use hive::HiveGrid;
pub use terrain::{Barrier, Terrain, TerrainLayout, WORLD_HEIGHT, WORLD_WIDTH};
