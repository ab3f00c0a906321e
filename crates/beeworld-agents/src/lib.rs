//! Bee state, foraging strategies, and the per-tick behavior engine.
//!
//! This crate contains the logic layer for bees -- everything that operates
//! on bee state without touching I/O. It sits between `beeworld-types`
//! (which defines the shared value types) and the core/engine crates (which
//! handle orchestration and reporting).
//!
//! # Modules
//!
//! - [`bee`] -- The [`Bee`] agent and its per-run state.
//! - [`behavior`] -- The single-tick state transition ([`advance`]).
//! - [`config`] -- Configurable parameters for bee vitals and memory
//!   ([`BeeConfig`]).
//! - [`memory`] -- The shared [`HiveMemory`] pool for the intelligent
//!   strategy.
//! - [`strategy`] -- Mission-start target selection and memory pruning.

pub mod bee;
pub mod behavior;
pub mod config;
pub mod memory;
pub mod strategy;

// Re-export primary types at crate root.
pub use bee::Bee;
pub use behavior::{StepContext, advance};
pub use config::BeeConfig;
pub use memory::HiveMemory;
pub use strategy::{prune_memory, select_target};
