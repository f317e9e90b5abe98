//! Mining system: per-tick extraction from the closest in-range planet.
//!
//! Each probe mines at most one planet per tick. A planet may be mined by
//! several probes in the same tick; each extraction reads the current
//! resources, clamps, and writes back.

use hecs::{Entity, World};
use tracing::info;

use vonneumann_core::components::{Mineable, Planet, Probe};
use vonneumann_core::constants::{BASE_MINING_RATE, MINING_ANIMATION_RATE, MINING_RANGE};
use vonneumann_core::events::SimEvent;
use vonneumann_core::types::Position;

use crate::handle::entity_id;
use crate::spatial;
use crate::stats::GameStats;

pub fn run(world: &mut World, dt: f64, stats: &mut GameStats, events: &mut Vec<SimEvent>) {
    for (_entity, mineable) in world.query_mut::<&mut Mineable>() {
        mineable.is_being_mined = false;
    }

    let miners: Vec<(Entity, Position)> = world
        .query::<(&Position, &Probe)>()
        .iter()
        .filter(|(_, (_, probe))| probe.matter < probe.max_matter)
        .map(|(entity, (pos, _))| (entity, *pos))
        .collect();

    for (probe_entity, probe_pos) in miners {
        let Some((planet_entity, distance)) =
            spatial::closest_minable_by_surface(world, &probe_pos)
        else {
            continue;
        };
        if distance > MINING_RANGE {
            continue;
        }

        let (Ok(mut probe), Ok(mut planet)) = (
            world.get::<&mut Probe>(probe_entity),
            world.get::<&mut Planet>(planet_entity),
        ) else {
            continue;
        };

        let free = (probe.max_matter - probe.matter).max(0.0);
        let rate = BASE_MINING_RATE * planet.ore.mining_rate();
        let extracted = (rate * dt).min(free).min(planet.resources).max(0.0);

        planet.resources -= extracted;
        probe.matter += extracted;
        stats.total_matter_mined += extracted;

        if planet.resources <= 0.0 && !planet.depleted {
            planet.resources = 0.0;
            planet.depleted = true;
            info!(
                planet = entity_id(planet_entity),
                ore = planet.ore.display_name(),
                "planet depleted"
            );
            events.push(SimEvent::PlanetDepleted {
                planet: entity_id(planet_entity),
                ore: planet.ore,
            });
        }
        drop(planet);
        drop(probe);

        if let Ok(mut mineable) = world.get::<&mut Mineable>(planet_entity) {
            mineable.is_being_mined = true;
            mineable.mining_progress += dt * MINING_ANIMATION_RATE;
        }
    }
}
