//! World snapshot: the complete visible state handed to renderers and UI each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{Position, SimTime, Velocity};

/// Complete simulation state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    pub probes: Vec<ProbeView>,
    pub rovers: Vec<RoverView>,
    pub stations: Vec<StationView>,
    pub planets: Vec<PlanetView>,
    pub suns: Vec<SunView>,
    pub stats: StatsView,
    pub events: Vec<SimEvent>,
}

/// Scanner animation state for the scan ring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScannerView {
    pub range: f64,
    pub is_scanning: bool,
    pub scan_progress: f64,
    pub cooldown_remaining: f64,
}

/// Construction progress.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildView {
    pub is_building: bool,
    pub progress: f64,
    pub target: Option<UnitKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeView {
    pub id: u64,
    pub name: String,
    pub position: Position,
    pub velocity: Velocity,
    pub heading: f64,
    pub target: Option<Position>,
    pub matter: f64,
    pub max_matter: f64,
    pub is_autonomous: bool,
    pub is_selected: bool,
    pub build: BuildView,
    pub task: AiTask,
    pub state: AiState,
    pub scanner: ScannerView,
    /// Whether a merge cluster containing this probe exists right now.
    pub can_merge: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoverView {
    pub id: u64,
    pub name: String,
    pub position: Position,
    pub heading: f64,
    pub status: RoverStatus,
    pub scanner: ScannerView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationView {
    pub id: u64,
    pub name: String,
    pub position: Position,
    pub matter: f64,
    pub max_matter: f64,
    pub build: BuildView,
    pub is_researching: bool,
    pub research_progress: f64,
    pub research_target: Option<ResearchKind>,
    /// Whether research of a new system could start right now.
    pub can_research: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetView {
    pub id: u64,
    pub position: Position,
    pub ore: OreType,
    pub color: u32,
    pub radius: f64,
    pub resources: f64,
    pub max_resources: f64,
    pub discovered: bool,
    pub depleted: bool,
    pub is_being_mined: bool,
    pub mining_progress: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SunView {
    pub index: u32,
    pub position: Position,
}

/// Running totals for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsView {
    pub probe_count: u32,
    pub rover_count: u32,
    pub station_count: u32,
    pub planets_discovered: u32,
    pub planets_total: u32,
    pub total_matter_mined: f64,
    pub probes_built: u32,
    pub rovers_built: u32,
    pub stations_formed: u32,
    pub systems_unlocked: u32,
}
