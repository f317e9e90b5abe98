//! Snapshot system: queries the ECS world and builds a complete WorldSnapshot.
//!
//! Read-only: it never modifies the world.

use hecs::World;

use vonneumann_core::components::*;
use vonneumann_core::enums::*;
use vonneumann_core::events::SimEvent;
use vonneumann_core::state::*;
use vonneumann_core::types::{Position, SimTime, Velocity};

use crate::handle::entity_id;
use crate::stats::GameStats;
use crate::systems::{merge, research};

/// Build a complete WorldSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: SimPhase,
    stats: &GameStats,
    events: Vec<SimEvent>,
) -> WorldSnapshot {
    let probes = build_probes(world);
    let rovers = build_rovers(world);
    let stations = build_stations(world);
    let planets = build_planets(world);
    let suns = build_suns(world);

    let stats = StatsView {
        probe_count: probes.len() as u32,
        rover_count: rovers.len() as u32,
        station_count: stations.len() as u32,
        planets_discovered: planets.iter().filter(|p| p.discovered).count() as u32,
        planets_total: planets.len() as u32,
        total_matter_mined: stats.total_matter_mined,
        probes_built: stats.probes_built,
        rovers_built: stats.rovers_built,
        stations_formed: stats.stations_formed,
        systems_unlocked: suns.len() as u32,
    };

    WorldSnapshot {
        time: *time,
        phase,
        probes,
        rovers,
        stations,
        planets,
        suns,
        stats,
        events,
    }
}

fn scanner_view(scanner: &Scanner) -> ScannerView {
    ScannerView {
        range: scanner.range,
        is_scanning: scanner.is_scanning,
        scan_progress: scanner.scan_progress,
        cooldown_remaining: scanner.current_cooldown,
    }
}

fn build_view(build: &BuildState) -> BuildView {
    BuildView {
        is_building: build.is_building,
        progress: build.progress,
        target: build.target,
    }
}

fn build_probes(world: &World) -> Vec<ProbeView> {
    let mut probes: Vec<ProbeView> = world
        .query::<(
            &Position,
            &Velocity,
            &MovementTarget,
            &Probe,
            &Scanner,
            &Ai,
            Option<&Heading>,
        )>()
        .iter()
        .map(
            |(entity, (pos, vel, target, probe, scanner, ai, heading))| ProbeView {
                id: entity_id(entity),
                name: probe.name.clone(),
                position: *pos,
                velocity: *vel,
                heading: heading.map_or(0.0, |h| h.angle),
                target: target.point,
                matter: probe.matter,
                max_matter: probe.max_matter,
                is_autonomous: probe.is_autonomous,
                is_selected: probe.is_selected,
                build: build_view(&probe.build),
                task: ai.task,
                state: ai.state,
                scanner: scanner_view(scanner),
                can_merge: merge::can_merge(world, entity),
            },
        )
        .collect();

    probes.sort_by_key(|p| p.id);
    probes
}

fn build_rovers(world: &World) -> Vec<RoverView> {
    let mut rovers: Vec<RoverView> = world
        .query::<(&Position, &Rover, &Scanner, Option<&Heading>)>()
        .iter()
        .map(|(entity, (pos, rover, scanner, heading))| RoverView {
            id: entity_id(entity),
            name: rover.name.clone(),
            position: *pos,
            heading: heading.map_or(0.0, |h| h.angle),
            status: rover.status,
            scanner: scanner_view(scanner),
        })
        .collect();

    rovers.sort_by_key(|r| r.id);
    rovers
}

fn build_stations(world: &World) -> Vec<StationView> {
    let mut stations: Vec<StationView> = world
        .query::<(&Position, &Station)>()
        .iter()
        .map(|(entity, (pos, station))| StationView {
            id: entity_id(entity),
            name: station.name.clone(),
            position: *pos,
            matter: station.matter,
            max_matter: station.max_matter,
            build: build_view(&station.build),
            is_researching: station.research.is_researching,
            research_progress: station.research.progress,
            research_target: station.research.target,
            can_research: research::can_research(station, ResearchKind::NewSystem),
        })
        .collect();

    stations.sort_by_key(|s| s.id);
    stations
}

fn build_planets(world: &World) -> Vec<PlanetView> {
    let mut planets: Vec<PlanetView> = world
        .query::<(&Position, &Planet, Option<&Mineable>)>()
        .iter()
        .map(|(entity, (pos, planet, mineable))| PlanetView {
            id: entity_id(entity),
            position: *pos,
            ore: planet.ore,
            color: planet.ore.color(),
            radius: planet.radius,
            resources: planet.resources,
            max_resources: planet.max_resources,
            discovered: planet.discovered,
            depleted: planet.depleted,
            is_being_mined: mineable.is_some_and(|m| m.is_being_mined),
            mining_progress: mineable.map_or(0.0, |m| m.mining_progress),
        })
        .collect();

    planets.sort_by_key(|p| p.id);
    planets
}

fn build_suns(world: &World) -> Vec<SunView> {
    let mut suns: Vec<SunView> = world
        .query::<(&Position, &Sun)>()
        .iter()
        .map(|(_, (pos, sun))| SunView {
            index: sun.index,
            position: *pos,
        })
        .collect();

    suns.sort_by_key(|s| s.index);
    suns
}
