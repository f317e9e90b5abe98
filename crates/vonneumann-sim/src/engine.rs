//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `WorldSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use vonneumann_core::commands::PlayerCommand;
use vonneumann_core::components::{Ai, MovementTarget, Probe, Scanner, Station};
use vonneumann_core::constants::{DT, SEED_PROBE_OFFSET};
use vonneumann_core::enums::{AiState, AiTask, SimPhase};
use vonneumann_core::events::SimEvent;
use vonneumann_core::state::WorldSnapshot;
use vonneumann_core::types::{Position, SimTime};

use crate::config::SimConfig;
use crate::effects::{StandardEffects, WorldEffects};
use crate::error::CommandError;
use crate::handle::{entity_id, resolve};
use crate::names::SEED_PROBE_NAME;
use crate::stats::GameStats;
use crate::systems;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine<E: WorldEffects = StandardEffects> {
    world: World,
    time: SimTime,
    phase: SimPhase,
    time_scale: f64,
    config: SimConfig,
    rng: ChaCha8Rng,
    effects: E,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<SimEvent>,
    stats: GameStats,
}

impl SimulationEngine<StandardEffects> {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        let effects = StandardEffects::new(config.seed);
        Self::with_effects(config, effects)
    }
}

impl<E: WorldEffects> SimulationEngine<E> {
    /// Create an engine that spawns, removes and unlocks through `effects`.
    pub fn with_effects(config: SimConfig, effects: E) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: SimPhase::default(),
            time_scale: config.time_scale.clamp(0.0, 4.0),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            effects,
            command_queue: VecDeque::new(),
            events: Vec::new(),
            stats: GameStats::default(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> WorldSnapshot {
        self.process_commands();

        if self.phase == SimPhase::Active {
            self.run_systems(DT);
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, self.phase, &self.stats, events)
    }

    /// Get the current simulation phase.
    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale. Pacing is the driver's job; each tick is `DT`.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for drivers and tests that place entities directly.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn effects(&self) -> &E {
        &self.effects
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(err) = self.apply_command(command) {
                debug!(%err, "command rejected");
                self.events.push(SimEvent::CommandRejected {
                    reason: err.to_string(),
                });
            }
        }
    }

    fn entity(&self, id: u64) -> Result<Entity, CommandError> {
        resolve(&self.world, id).ok_or(CommandError::UnknownEntity(id))
    }

    /// Apply a single player command immediately.
    pub fn apply_command(&mut self, command: PlayerCommand) -> Result<(), CommandError> {
        match command {
            PlayerCommand::StartExpedition => {
                if self.phase != SimPhase::Setup {
                    return Err(CommandError::WrongPhase(self.phase));
                }
                self.start_expedition();
            }
            PlayerCommand::Pause => {
                if self.phase == SimPhase::Active {
                    self.phase = SimPhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == SimPhase::Paused {
                    self.phase = SimPhase::Active;
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, 4.0);
            }
            PlayerCommand::SelectEntity { entity } => {
                let target = self.entity(entity)?;
                if self.world.get::<&Probe>(target).is_err() {
                    return Err(CommandError::MissingComponent {
                        entity,
                        component: "Probe",
                    });
                }
                for (e, probe) in self.world.query_mut::<&mut Probe>() {
                    probe.is_selected = e == target;
                }
            }
            PlayerCommand::MoveTo { entity, x, y } => {
                let target = self.entity(entity)?;
                let mut movement = self
                    .world
                    .get::<&mut MovementTarget>(target)
                    .map_err(|_| CommandError::MissingComponent {
                        entity,
                        component: "MovementTarget",
                    })?;
                movement.point = Some(Position::new(x, y));
            }
            PlayerCommand::ToggleAutonomy { entity } => {
                let target = self.entity(entity)?;
                self.toggle_autonomy(target, entity)?;
            }
            PlayerCommand::TriggerScan { entity } => {
                let target = self.entity(entity)?;
                let mut scanner = self.world.get::<&mut Scanner>(target).map_err(|_| {
                    CommandError::MissingComponent {
                        entity,
                        component: "Scanner",
                    }
                })?;
                if !systems::scanning::trigger_scan(&mut scanner) {
                    return Err(CommandError::ScanRejected(entity));
                }
            }
            PlayerCommand::Build { entity, unit } => {
                let target = self.entity(entity)?;
                let started = if let Ok(mut probe) = self.world.get::<&mut Probe>(target) {
                    systems::construction::start_probe_build(&mut probe, unit)
                } else if let Ok(mut station) = self.world.get::<&mut Station>(target) {
                    systems::construction::start_station_build(&mut station, unit)
                } else {
                    return Err(CommandError::MissingComponent {
                        entity,
                        component: "Probe or Station",
                    });
                };
                if !started {
                    return Err(CommandError::BuildRejected { unit });
                }
                if let Ok(mut ai) = self.world.get::<&mut Ai>(target) {
                    ai.state = AiState::Building;
                }
            }
            PlayerCommand::Research { entity, research } => {
                let target = self.entity(entity)?;
                let mut station = self.world.get::<&mut Station>(target).map_err(|_| {
                    CommandError::MissingComponent {
                        entity,
                        component: "Station",
                    }
                })?;
                if !systems::research::start_research(&mut station, research) {
                    return Err(CommandError::ResearchRejected { research });
                }
                self.events.push(SimEvent::ResearchStarted {
                    station: entity,
                    research,
                });
            }
            PlayerCommand::Merge { entity } => {
                let target = self.entity(entity)?;
                let cluster = systems::merge::probe_cluster(&self.world, target)
                    .ok_or(CommandError::NoCluster(entity))?;
                systems::merge::execute_merge(
                    &mut self.world,
                    &mut self.effects,
                    &mut self.stats,
                    &mut self.events,
                    &cluster,
                )
                .ok_or(CommandError::NoCluster(entity))?;
            }
        }
        Ok(())
    }

    fn toggle_autonomy(&mut self, target: Entity, id: u64) -> Result<(), CommandError> {
        let (probe, ai, movement) = self
            .world
            .query_one_mut::<(&mut Probe, &mut Ai, &mut MovementTarget)>(target)
            .map_err(|_| CommandError::MissingComponent {
                entity: id,
                component: "Probe",
            })?;
        probe.is_autonomous = !probe.is_autonomous;
        if probe.is_autonomous {
            ai.task = AiTask::Explore;
            ai.state = AiState::Idle;
            ai.think_timer = 0.0;
        } else {
            movement.point = None;
        }
        debug!(probe = %probe.name, autonomous = probe.is_autonomous, "autonomy toggled");
        Ok(())
    }

    /// Populate the first system and the seed probe, then go Active.
    fn start_expedition(&mut self) {
        self.world.clear();
        self.stats.reset();
        self.effects.reset();
        self.time = SimTime::default();

        let center = self.config.system_center;
        world_setup::generate_solar_system(&mut self.world, &mut self.rng, center, 0);
        let probe = world_setup::spawn_probe(
            &mut self.world,
            Position::new(center.x + SEED_PROBE_OFFSET, center.y),
            SEED_PROBE_NAME.to_string(),
            self.config.autonomous_seed_probe,
        );
        self.phase = SimPhase::Active;
        info!(
            seed = self.config.seed,
            probe = entity_id(probe),
            "expedition started"
        );
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        // 1. Movement (mobile units)
        systems::movement::run(&mut self.world, dt);
        // 2. Orbital motion (planets)
        systems::orbital::run(&mut self.world, dt);
        // 3. Scanner timers
        systems::scanning::run(&mut self.world, dt);
        // 4. Discovery at the scan midpoint
        systems::discovery::run(&mut self.world, dt, &mut self.events);
        // 5. Mining
        systems::mining::run(&mut self.world, dt, &mut self.stats, &mut self.events);
        // 6. Autonomous decisions
        systems::ai::run(&mut self.world, dt, &mut self.rng);
        // 7. Construction
        systems::construction::run(
            &mut self.world,
            dt,
            &mut self.rng,
            &mut self.effects,
            &mut self.stats,
            &mut self.events,
        );
        // 8. Research
        systems::research::run(&mut self.world, dt, &mut self.effects, &mut self.events);
    }
}
