//! Discovery system: reveals planets when a scan passes its midpoint.

use hecs::World;
use tracing::info;

use vonneumann_core::components::{Planet, Scanner};
use vonneumann_core::constants::SCAN_DISCOVERY_CHECKPOINT;
use vonneumann_core::events::SimEvent;
use vonneumann_core::types::Position;

use crate::handle::entity_id;

/// Whether this tick's scan progress sits in the discovery window
/// `[checkpoint, checkpoint + 2*dt)`.
pub fn in_discovery_window(scan_progress: f64, dt: f64) -> bool {
    scan_progress >= SCAN_DISCOVERY_CHECKPOINT
        && scan_progress < SCAN_DISCOVERY_CHECKPOINT + dt * 2.0
}

pub fn run(world: &mut World, dt: f64, events: &mut Vec<SimEvent>) {
    // Collect pulses first; planets are mutated after the scanner borrow ends.
    let pulses: Vec<(Position, f64)> = world
        .query::<(&Position, &Scanner)>()
        .iter()
        .filter(|(_, (_, scanner))| {
            scanner.is_scanning && in_discovery_window(scanner.scan_progress, dt)
        })
        .map(|(_, (pos, scanner))| (*pos, scanner.range))
        .collect();

    if pulses.is_empty() {
        return;
    }

    for (entity, (pos, planet)) in world.query_mut::<(&Position, &mut Planet)>() {
        if planet.discovered {
            continue;
        }
        let in_range = pulses
            .iter()
            .any(|(origin, range)| origin.surface_distance_to(pos, planet.radius) <= *range);
        if in_range {
            planet.discovered = true;
            info!(
                planet = entity_id(entity),
                ore = planet.ore.display_name(),
                "planet discovered"
            );
            events.push(SimEvent::PlanetDiscovered {
                planet: entity_id(entity),
                ore: planet.ore,
            });
        }
    }
}
