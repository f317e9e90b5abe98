//! World effects: spawning, removal and research completion.
//!
//! Systems that create or destroy units, or finish research, do so through a
//! `WorldEffects` value handed to them by the engine. The systems decide when
//! and with what parameters; the effects decide what that means for the world.

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use vonneumann_core::enums::ResearchKind;
use vonneumann_core::types::Position;

use crate::handle::entity_id;
use crate::names::NameGenerator;
use crate::world_setup;

/// Spawn, destroy and notify operations used by the systems.
pub trait WorldEffects {
    /// Spawn a fully attributed probe and return it.
    fn spawn_probe(&mut self, world: &mut World, position: Position, autonomous: bool) -> Entity;

    /// Spawn a fully attributed rover and return it.
    fn spawn_rover(&mut self, world: &mut World, position: Position) -> Entity;

    /// Spawn a station holding at most its capacity of `initial_matter`.
    fn spawn_station(&mut self, world: &mut World, position: Position, initial_matter: f64)
        -> Entity;

    /// Remove an entity. Must not be called while a query over it is borrowed.
    fn remove_entity(&mut self, world: &mut World, entity: Entity);

    /// A station finished a research project.
    fn research_complete(&mut self, world: &mut World, station: Entity, research: ResearchKind);

    /// Forget per-expedition state such as name counters.
    fn reset(&mut self) {}
}

/// The game's effects: named units, and a new solar system per unlock.
pub struct StandardEffects {
    names: NameGenerator,
    rng: ChaCha8Rng,
}

impl StandardEffects {
    /// Names and generated systems draw from their own stream of `seed`, so
    /// they do not disturb the engine's random sequence.
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(1);
        Self {
            names: NameGenerator::new(),
            rng,
        }
    }

    pub fn names(&self) -> &NameGenerator {
        &self.names
    }

    /// Generate the system at `center` with its own random stream.
    pub fn generate_system(&mut self, world: &mut World, center: Position, index: u32) -> Entity {
        world_setup::generate_solar_system(world, &mut self.rng, center, index)
    }
}

impl WorldEffects for StandardEffects {
    fn spawn_probe(&mut self, world: &mut World, position: Position, autonomous: bool) -> Entity {
        let name = self.names.probe_name(&mut self.rng);
        world_setup::spawn_probe(world, position, name, autonomous)
    }

    fn spawn_rover(&mut self, world: &mut World, position: Position) -> Entity {
        let name = self.names.rover_name(&mut self.rng);
        world_setup::spawn_rover(world, position, name)
    }

    fn spawn_station(
        &mut self,
        world: &mut World,
        position: Position,
        initial_matter: f64,
    ) -> Entity {
        let name = self.names.station_name(&mut self.rng);
        world_setup::spawn_station(world, position, name, initial_matter)
    }

    fn remove_entity(&mut self, world: &mut World, entity: Entity) {
        let _ = world.despawn(entity);
    }

    fn reset(&mut self) {
        self.names.reset();
    }

    fn research_complete(&mut self, world: &mut World, station: Entity, research: ResearchKind) {
        match research {
            ResearchKind::NewSystem => {
                let (center, index) = world_setup::next_system_center(world);
                self.generate_system(world, center, index);
                info!(
                    station = entity_id(station),
                    systems = index + 1,
                    "new system unlocked"
                );
            }
        }
    }
}
