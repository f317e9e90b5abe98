//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Resource category of a planet. Determines color, display name and mining rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OreType {
    #[default]
    Iron,
    Copper,
    Titanium,
    Crystal,
    Rare,
}

impl OreType {
    /// All ore types, in generation order.
    pub const ALL: [OreType; 5] = [
        OreType::Iron,
        OreType::Copper,
        OreType::Titanium,
        OreType::Crystal,
        OreType::Rare,
    ];

    /// Display color (0xRRGGBB).
    pub fn color(self) -> u32 {
        match self {
            OreType::Iron => 0x8b7355,
            OreType::Copper => 0xcd7f32,
            OreType::Titanium => 0x878787,
            OreType::Crystal => 0x88ddff,
            OreType::Rare => 0xaa44ff,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            OreType::Iron => "Iron",
            OreType::Copper => "Copper",
            OreType::Titanium => "Titanium",
            OreType::Crystal => "Crystal",
            OreType::Rare => "Rare Earth",
        }
    }

    /// Multiplier on the base mining rate.
    pub fn mining_rate(self) -> f64 {
        match self {
            OreType::Iron => 1.0,
            OreType::Copper => 1.2,
            OreType::Titanium => 0.8,
            OreType::Crystal => 0.5,
            OreType::Rare => 0.3,
        }
    }
}

/// Unit that can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    Probe,
    Rover,
}

/// Kind of entity doing the building. Selects the cost/time table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuilderKind {
    Probe,
    Station,
}

/// Station research projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResearchKind {
    /// Unlocks a new star system.
    NewSystem,
}

/// Task selected by the autonomous AI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiTask {
    Idle,
    Explore,
    #[default]
    Mine,
    Deposit,
    Build,
}

/// Status label shown in the UI. Not read by any decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    #[default]
    Idle,
    Mining,
    Traveling,
    Depositing,
    Building,
}

/// Rover status label shown in the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoverStatus {
    #[default]
    Idle,
    Moving,
    Scanning,
}

/// Top-level simulation phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    /// World not yet populated.
    #[default]
    Setup,
    Active,
    Paused,
}
