//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and applied at the next tick boundary. Entities are
//! addressed by the `u64` id exposed in snapshots.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Unit control ---
    /// Select a probe (deselects every other probe).
    SelectEntity { entity: u64 },
    /// Set a unit's movement target.
    MoveTo { entity: u64, x: f64, y: f64 },
    /// Flip a probe between manual and autonomous control.
    ToggleAutonomy { entity: u64 },
    /// Start a scan on a unit's scanner.
    TriggerScan { entity: u64 },

    // --- Economy ---
    /// Start building a unit from a probe or station.
    Build { entity: u64, unit: UnitKind },
    /// Start research at a station.
    Research { entity: u64, research: ResearchKind },
    /// Merge the cluster containing this probe into a station.
    Merge { entity: u64 },

    // --- Simulation control ---
    /// Set time scale (1.0 = normal, 2.0 = double, 0.0 = paused).
    SetTimeScale { scale: f64 },
    /// Populate the world and start simulating.
    StartExpedition,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}
