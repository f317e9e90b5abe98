//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.
//!
//! `Position` and `Velocity` are defined in types.rs and used as components too.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Where a mobile unit is heading. `None` = no target (coast and damp).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementTarget {
    pub point: Option<Position>,
}

/// Facing angle (radians, `atan2(vy, vx)`) for the renderer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Heading {
    pub angle: f64,
}

/// In-progress unit construction. Shared shape for probes and stations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildState {
    pub is_building: bool,
    /// 0.0 ..< 1.0 while building.
    pub progress: f64,
    pub target: Option<UnitKind>,
}

/// In-progress station research.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResearchState {
    pub is_researching: bool,
    /// 0.0 ..< 1.0 while researching.
    pub progress: f64,
    pub target: Option<ResearchKind>,
}

/// Self-replicating mobile unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Probe {
    pub name: String,
    /// Stored matter, 0 ..= max_matter.
    pub matter: f64,
    pub max_matter: f64,
    /// Whether the AI drives this probe.
    pub is_autonomous: bool,
    /// Whether the player has this probe selected.
    pub is_selected: bool,
    pub build: BuildState,
}

/// Stationary hub formed by merging three probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    /// Stored matter, 0 ..= max_matter.
    pub matter: f64,
    pub max_matter: f64,
    pub build: BuildState,
    pub research: ResearchState,
}

/// Minable body orbiting a sun.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planet {
    pub ore: OreType,
    /// Remaining resources, 0 ..= max_resources.
    pub resources: f64,
    pub max_resources: f64,
    pub radius: f64,
    /// Set once by a scan, never cleared.
    pub discovered: bool,
    /// Set once when resources reach zero, never cleared.
    pub depleted: bool,
}

/// Per-tick mining feedback for the renderer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mineable {
    /// Reset every tick; true if any probe extracted this tick.
    pub is_being_mined: bool,
    /// Monotonic animation accumulator.
    pub mining_progress: f64,
}

/// Area scanner that reveals planets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scanner {
    pub range: f64,
    /// Cooldown applied after each scan (seconds).
    pub cooldown: f64,
    /// Remaining cooldown, never negative.
    pub current_cooldown: f64,
    pub is_scanning: bool,
    /// 0.0 ..< 1.0 while scanning.
    pub scan_progress: f64,
}

/// Circular orbit around a sun center stored on the entity itself,
/// so multiple solar systems orbit independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Orbital {
    pub orbit_radius: f64,
    /// Radians per second.
    pub orbit_speed: f64,
    /// Radians, kept in [0, TAU).
    pub current_angle: f64,
    pub sun_x: f64,
    pub sun_y: f64,
}

/// Autonomous decision state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ai {
    pub task: AiTask,
    pub state: AiState,
    /// Entity bits of the current target. A relation only: re-resolved every
    /// decision, never trusted across ticks.
    pub target_entity: Option<u64>,
    /// Seconds until the next decision.
    pub think_timer: f64,
}

/// Scout unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rover {
    pub name: String,
    pub status: RoverStatus,
    /// Unused by the simulation; the rover's Scanner carries the real cooldown.
    pub scan_cooldown: f64,
}

/// Center of a solar system.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Sun {
    /// 0 for the starting system, incremented per unlock.
    pub index: u32,
}
