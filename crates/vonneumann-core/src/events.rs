//! Events emitted by the simulation for UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Something noteworthy that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A scan revealed a planet.
    PlanetDiscovered { planet: u64, ore: OreType },
    /// A planet's resources ran out.
    PlanetDepleted { planet: u64, ore: OreType },
    /// A probe or station finished building a unit.
    UnitBuilt {
        builder: u64,
        builder_kind: BuilderKind,
        unit: u64,
        unit_kind: UnitKind,
    },
    /// Three probes merged into a station.
    StationFormed { station: u64, matter: f64 },
    /// A station paid for and began research.
    ResearchStarted { station: u64, research: ResearchKind },
    /// A station finished research.
    ResearchComplete { station: u64, research: ResearchKind },
    /// A player command could not be applied.
    CommandRejected { reason: String },
}
