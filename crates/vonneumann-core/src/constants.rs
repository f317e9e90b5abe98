//! Simulation constants and tuning parameters.

use crate::enums::{BuilderKind, ResearchKind, UnitKind};

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Movement ---

/// Cruise speed of mobile units (units/s).
pub const PROBE_SPEED: f64 = 120.0;

/// Distance below which a unit is considered to have reached its target.
pub const ARRIVAL_THRESHOLD: f64 = 5.0;

/// Per-tick easing factor from current velocity toward desired velocity.
/// Applied per tick, not per second.
pub const MOVEMENT_SMOOTHING: f64 = 0.08;

/// Per-tick velocity multiplier while no target is set.
pub const VELOCITY_DAMPING: f64 = 0.9;

// --- Scanning ---

/// Duration of one scan animation cycle (seconds).
pub const SCAN_DURATION: f64 = 1.5;

/// Scan progress at which planets in range are revealed.
pub const SCAN_DISCOVERY_CHECKPOINT: f64 = 0.5;

/// Default cooldown after a scan completes (seconds).
pub const SCANNER_COOLDOWN: f64 = 3.0;

/// Probe scanner range.
pub const PROBE_SCAN_RANGE: f64 = 150.0;

/// Rover scanner range.
pub const ROVER_SCAN_RANGE: f64 = 100.0;

// --- Mining ---

/// Maximum surface distance at which a probe extracts from a planet.
pub const MINING_RANGE: f64 = 30.0;

/// Base extraction rate (matter/s) before the ore multiplier.
pub const BASE_MINING_RATE: f64 = 5.0;

/// Mining animation accumulator speed (per second).
pub const MINING_ANIMATION_RATE: f64 = 3.0;

// --- Storage ---

/// Probe matter capacity.
pub const PROBE_MAX_MATTER: f64 = 100.0;

/// Station matter capacity.
pub const STATION_MAX_MATTER: f64 = 500.0;

// --- AI ---

/// Seconds between probe AI decisions.
pub const PROBE_THINK_INTERVAL: f64 = 0.5;

/// Seconds between rover AI decisions.
pub const ROVER_THINK_INTERVAL: f64 = 1.0;

/// Random extra wander distance for exploring probes.
pub const PROBE_WANDER_RADIUS: f64 = 300.0;

/// Random extra wander distance for rovers.
pub const ROVER_WANDER_RADIUS: f64 = 200.0;

/// Minimum wander distance, added to the random part.
pub const WANDER_MIN_DISTANCE: f64 = 50.0;

/// Center distance at which a probe can unload into a station.
pub const STATION_DEPOSIT_RANGE: f64 = 60.0;

// --- Construction ---

/// Spawn offset for units built by a probe.
pub const PROBE_BUILD_SPAWN_OFFSET: f64 = 30.0;

/// Spawn offset for units built by a station.
pub const STATION_BUILD_SPAWN_OFFSET: f64 = 50.0;

// --- Merge ---

/// Probes within this distance of a candidate center form a cluster.
pub const MERGE_RADIUS: f64 = 50.0;

/// Number of probes consumed by a merge.
pub const MERGE_CLUSTER_SIZE: usize = 3;

// --- World generation ---

/// Offset of the seed probe from the first sun (+x).
pub const SEED_PROBE_OFFSET: f64 = 80.0;

/// Spacing between consecutive solar systems (+x).
pub const SYSTEM_SPACING: f64 = 1200.0;

/// Planet radius range.
pub const PLANET_RADIUS_MIN: f64 = 15.0;
pub const PLANET_RADIUS_MAX: f64 = 35.0;

/// Planet resource range.
pub const PLANET_RESOURCES_MIN: f64 = 50.0;
pub const PLANET_RESOURCES_MAX: f64 = 200.0;

/// Jitter applied to each planet's start angle within its ring (radians, ±).
pub const PLANET_ANGLE_JITTER: f64 = 0.15;

/// One ring of planets around a sun.
#[derive(Debug, Clone, Copy)]
pub struct OrbitalRing {
    pub radius: f64,
    pub count: u32,
    /// Base orbit speed (rad/s), varied per planet by ×0.8..1.2.
    pub speed: f64,
}

/// Ring layout used for every generated solar system.
pub const ORBITAL_RINGS: [OrbitalRing; 4] = [
    OrbitalRing { radius: 150.0, count: 2, speed: 0.15 },
    OrbitalRing { radius: 250.0, count: 3, speed: 0.10 },
    OrbitalRing { radius: 350.0, count: 4, speed: 0.07 },
    OrbitalRing { radius: 450.0, count: 3, speed: 0.05 },
];

// --- Cost and time tables ---

/// Matter cost of a unit, by builder. Stations build cheaper.
pub fn build_cost(builder: BuilderKind, unit: UnitKind) -> f64 {
    match (builder, unit) {
        (BuilderKind::Probe, UnitKind::Probe) => 50.0,
        (BuilderKind::Probe, UnitKind::Rover) => 25.0,
        (BuilderKind::Station, UnitKind::Probe) => 30.0,
        (BuilderKind::Station, UnitKind::Rover) => 15.0,
    }
}

/// Build duration in seconds, by builder. Stations build faster.
pub fn build_time(builder: BuilderKind, unit: UnitKind) -> f64 {
    match (builder, unit) {
        (BuilderKind::Probe, UnitKind::Probe) => 5.0,
        (BuilderKind::Probe, UnitKind::Rover) => 3.0,
        (BuilderKind::Station, UnitKind::Probe) => 3.0,
        (BuilderKind::Station, UnitKind::Rover) => 2.0,
    }
}

/// Matter cost of a research project, paid up front.
pub fn research_cost(research: ResearchKind) -> f64 {
    match research {
        ResearchKind::NewSystem => 500.0,
    }
}

/// Research duration in seconds.
pub fn research_time(research: ResearchKind) -> f64 {
    match research {
        ResearchKind::NewSystem => 10.0,
    }
}
