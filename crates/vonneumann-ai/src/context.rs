//! Inputs and outputs of the decision functions.
//!
//! Entities are referenced by their `u64` handle bits; the caller resolves
//! them again before acting on a decision.

use vonneumann_core::enums::{AiState, AiTask, RoverStatus, UnitKind};
use vonneumann_core::types::Position;

/// A discovered, non-depleted planet the probe could mine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetTarget {
    pub id: u64,
    pub position: Position,
}

/// The nearest station and its storage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationTarget {
    pub id: u64,
    pub position: Position,
    /// Center distance from the probe.
    pub distance: f64,
    pub matter: f64,
    pub max_matter: f64,
}

impl StationTarget {
    pub fn free_capacity(&self) -> f64 {
        (self.max_matter - self.matter).max(0.0)
    }
}

/// Everything a probe's decision reads, gathered fresh every decision tick.
#[derive(Debug, Clone)]
pub struct ProbeContext {
    pub task: AiTask,
    pub matter: f64,
    pub max_matter: f64,
    pub is_building: bool,
    /// Scanner idle and off cooldown.
    pub scanner_ready: bool,
    pub has_movement_target: bool,
    /// First discovered, non-depleted planet within mining range (surface distance).
    pub planet_in_range: Option<PlanetTarget>,
    /// Nearest discovered, non-depleted planet by center distance.
    pub nearest_minable: Option<PlanetTarget>,
    pub nearest_station: Option<StationTarget>,
    /// Whether any planet in the world is still undiscovered.
    pub any_undiscovered: bool,
}

impl ProbeContext {
    pub fn is_full(&self) -> bool {
        self.matter >= self.max_matter
    }
}

/// What to do with the unit's movement target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOrder {
    Keep,
    Set(Position),
    Clear,
    /// Pick a random point `WANDER_MIN_DISTANCE + U(0, radius)` away.
    Wander { radius: f64 },
}

/// What to do with the AI's target relation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetChange {
    Keep,
    Set(u64),
    Clear,
}

/// Instant matter transfer into a station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deposit {
    pub station: u64,
    pub amount: f64,
}

/// Result of one probe decision.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeDecision {
    pub task: AiTask,
    /// `None` leaves the status label unchanged.
    pub state: Option<AiState>,
    pub target: TargetChange,
    pub movement: MoveOrder,
    pub trigger_scan: bool,
    pub deposit: Option<Deposit>,
    pub start_build: Option<UnitKind>,
}

impl ProbeDecision {
    /// Keep the current task and change nothing.
    pub fn hold(task: AiTask) -> Self {
        Self {
            task,
            state: None,
            target: TargetChange::Keep,
            movement: MoveOrder::Keep,
            trigger_scan: false,
            deposit: None,
            start_build: None,
        }
    }
}

/// Inputs for a rover decision.
#[derive(Debug, Clone, Copy)]
pub struct RoverContext {
    pub scanner_ready: bool,
    pub is_scanning: bool,
    pub has_movement_target: bool,
}

/// Result of one rover decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoverDecision {
    pub trigger_scan: bool,
    pub movement: MoveOrder,
    pub status: RoverStatus,
}
