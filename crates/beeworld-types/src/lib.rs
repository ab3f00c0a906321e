//! Shared type definitions for the Beeworld simulation.
//!
//! This crate is the single source of truth for the small value types used
//! across the Beeworld workspace.
//!
//! # Modules
//!
//! - [`ids`] -- Typed identifier for bees
//! - [`enums`] -- Enumeration types (strategy, terrain, barriers)
//! - [`position`] -- Grid coordinates and neighborhood geometry

pub mod enums;
pub mod ids;
pub mod position;

// Re-export all public types at crate root for convenience.
pub use enums::{BarrierKind, Strategy, TerrainCell};
pub use ids::BeeId;
pub use position::{MOORE_OFFSETS, Position};
