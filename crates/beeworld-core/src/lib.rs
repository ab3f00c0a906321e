//! Simulation orchestration for the Beeworld foraging model.
//!
//! This crate ties the world and agent layers together: it loads run
//! parameters, owns the per-run state (terrain, hive, bee roster, shared
//! hive memory), drives the tick loop, and runs the batch parameter sweep.
//!
//! # Modules
//!
//! - [`params`] -- The parameter-file loader and [`Parameters`].
//! - [`simulation`] -- A single run: [`Simulation`] and [`RunSummary`].
//! - [`sweep`] -- The batch parameter sweep over bee counts, nectar
//!   amounts, and strategies.

pub mod params;
pub mod simulation;
pub mod sweep;

// Re-export primary types at crate root.
pub use params::{Parameters, ParamsError};
pub use simulation::{RunSummary, Simulation};
pub use sweep::{SweepRecord, log_sweep_report, run_parameter_sweep, write_sweep_csv};
