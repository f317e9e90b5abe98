//! Running totals tracked by the engine.
//!
//! Stored in `SimulationEngine`, NOT as ECS entities. Systems that change a
//! total receive it by `&mut`.

/// Running game statistics.
#[derive(Debug, Clone, Default)]
pub struct GameStats {
    /// All matter ever extracted from planets.
    pub total_matter_mined: f64,
    pub probes_built: u32,
    pub rovers_built: u32,
    pub stations_formed: u32,
}

impl GameStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
