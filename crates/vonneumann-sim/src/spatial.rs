//! Spatial lookups over the world shared by mining and the AI.
//!
//! Linear scans in query order. Ties keep the first entity found.

use hecs::{Entity, World};

use vonneumann_core::components::{Planet, Station};
use vonneumann_core::types::Position;

fn is_minable(planet: &Planet) -> bool {
    planet.discovered && !planet.depleted
}

/// Discovered, non-depleted planet with the smallest surface distance to `from`.
pub fn closest_minable_by_surface(world: &World, from: &Position) -> Option<(Entity, f64)> {
    let mut best: Option<(Entity, f64)> = None;
    for (entity, (pos, planet)) in world.query::<(&Position, &Planet)>().iter() {
        if !is_minable(planet) {
            continue;
        }
        let distance = from.surface_distance_to(pos, planet.radius);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((entity, distance));
        }
    }
    best
}

/// First discovered, non-depleted planet whose surface is within `range`.
pub fn first_minable_in_range(
    world: &World,
    from: &Position,
    range: f64,
) -> Option<(Entity, Position)> {
    world
        .query::<(&Position, &Planet)>()
        .iter()
        .find(|(_, (pos, planet))| {
            is_minable(planet) && from.surface_distance_to(pos, planet.radius) <= range
        })
        .map(|(entity, (pos, _))| (entity, *pos))
}

/// Discovered, non-depleted planet nearest to `from` by center distance.
pub fn nearest_minable(world: &World, from: &Position) -> Option<(Entity, Position)> {
    let mut best: Option<(Entity, Position, f64)> = None;
    for (entity, (pos, planet)) in world.query::<(&Position, &Planet)>().iter() {
        if !is_minable(planet) {
            continue;
        }
        let distance = from.distance_to(pos);
        if best.map_or(true, |(_, _, d)| distance < d) {
            best = Some((entity, *pos, distance));
        }
    }
    best.map(|(entity, pos, _)| (entity, pos))
}

/// A station as seen from a probe.
#[derive(Debug, Clone, Copy)]
pub struct NearbyStation {
    pub entity: Entity,
    pub position: Position,
    pub distance: f64,
    pub matter: f64,
    pub max_matter: f64,
}

pub fn nearest_station(world: &World, from: &Position) -> Option<NearbyStation> {
    let mut best: Option<NearbyStation> = None;
    for (entity, (pos, station)) in world.query::<(&Position, &Station)>().iter() {
        let distance = from.distance_to(pos);
        if best.map_or(true, |b| distance < b.distance) {
            best = Some(NearbyStation {
                entity,
                position: *pos,
                distance,
                matter: station.matter,
                max_matter: station.max_matter,
            });
        }
    }
    best
}

pub fn any_undiscovered(world: &World) -> bool {
    world
        .query::<&Planet>()
        .iter()
        .any(|(_, planet)| !planet.discovered)
}
