//! Entity spawn factories for setting up the simulation world.
//!
//! Creates probes, rovers, stations, suns and planets with the component
//! bundles the systems query for.

use std::f64::consts::TAU;

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use vonneumann_core::components::*;
use vonneumann_core::constants::*;
use vonneumann_core::enums::*;
use vonneumann_core::types::{Position, Velocity};

fn fresh_scanner(range: f64) -> Scanner {
    Scanner {
        range,
        cooldown: SCANNER_COOLDOWN,
        current_cooldown: 0.0,
        is_scanning: false,
        scan_progress: 0.0,
    }
}

/// Spawn a probe at rest. Autonomous probes start on the mine task.
pub fn spawn_probe(world: &mut World, position: Position, name: String, autonomous: bool) -> Entity {
    world.spawn((
        position,
        Velocity::default(),
        MovementTarget::default(),
        Heading::default(),
        Probe {
            name,
            matter: 0.0,
            max_matter: PROBE_MAX_MATTER,
            is_autonomous: autonomous,
            is_selected: false,
            build: BuildState::default(),
        },
        fresh_scanner(PROBE_SCAN_RANGE),
        Ai {
            task: AiTask::Mine,
            ..Default::default()
        },
    ))
}

/// Spawn a rover. Rovers are always AI-driven scouts.
pub fn spawn_rover(world: &mut World, position: Position, name: String) -> Entity {
    world.spawn((
        position,
        Velocity::default(),
        MovementTarget::default(),
        Heading::default(),
        Rover {
            name,
            status: RoverStatus::Idle,
            scan_cooldown: 0.0,
        },
        fresh_scanner(ROVER_SCAN_RANGE),
        Ai {
            task: AiTask::Explore,
            ..Default::default()
        },
    ))
}

/// Spawn a station holding `min(initial_matter, STATION_MAX_MATTER)`.
pub fn spawn_station(
    world: &mut World,
    position: Position,
    name: String,
    initial_matter: f64,
) -> Entity {
    world.spawn((
        position,
        Station {
            name,
            matter: initial_matter.clamp(0.0, STATION_MAX_MATTER),
            max_matter: STATION_MAX_MATTER,
            build: BuildState::default(),
            research: ResearchState::default(),
        },
    ))
}

/// Generate a sun at `center` and its four rings of undiscovered planets.
pub fn generate_solar_system(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    center: Position,
    index: u32,
) -> Entity {
    let sun = world.spawn((center, Sun { index }));

    let mut planets = 0;
    for ring in ORBITAL_RINGS.iter() {
        let angle_step = TAU / ring.count as f64;
        let base_angle = rng.gen_range(0.0..TAU);

        for i in 0..ring.count {
            let jitter = rng.gen_range(-PLANET_ANGLE_JITTER..PLANET_ANGLE_JITTER);
            let start_angle = (base_angle + angle_step * i as f64 + jitter).rem_euclid(TAU);
            let orbit_speed = ring.speed * rng.gen_range(0.8..1.2);
            let ore = OreType::ALL[rng.gen_range(0..OreType::ALL.len())];
            let radius = rng.gen_range(PLANET_RADIUS_MIN..PLANET_RADIUS_MAX);
            let resources = rng.gen_range(PLANET_RESOURCES_MIN..PLANET_RESOURCES_MAX);

            world.spawn((
                center.offset_polar(start_angle, ring.radius),
                Planet {
                    ore,
                    resources,
                    max_resources: resources,
                    radius,
                    discovered: false,
                    depleted: false,
                },
                Mineable::default(),
                Orbital {
                    orbit_radius: ring.radius,
                    orbit_speed,
                    current_angle: start_angle,
                    sun_x: center.x,
                    sun_y: center.y,
                },
            ));
            planets += 1;
        }
    }

    info!(index, x = center.x, y = center.y, planets, "solar system generated");
    sun
}

/// Centre of the next system to unlock: `SYSTEM_SPACING` per existing system
/// along +x from the first sun.
pub fn next_system_center(world: &World) -> (Position, u32) {
    let mut origin = Position::default();
    let mut count = 0u32;
    for (_entity, (pos, sun)) in world.query::<(&Position, &Sun)>().iter() {
        if sun.index == 0 {
            origin = *pos;
        }
        count += 1;
    }
    (
        Position::new(origin.x + SYSTEM_SPACING * count as f64, origin.y),
        count,
    )
}
