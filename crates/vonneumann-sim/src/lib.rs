//! Simulation engine for Von Neumann Explorer.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces WorldSnapshots for renderers and UI.

pub mod config;
pub mod effects;
pub mod engine;
pub mod error;
pub mod handle;
pub mod names;
pub mod spatial;
pub mod stats;
pub mod systems;
pub mod world_setup;

pub use config::{ConfigError, SimConfig};
pub use effects::{StandardEffects, WorldEffects};
pub use engine::SimulationEngine;
pub use error::CommandError;
pub use vonneumann_core as core;

#[cfg(test)]
mod tests;
