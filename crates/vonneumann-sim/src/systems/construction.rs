//! Construction system: timed unit production from probes and stations.
//!
//! Matter is debited when a build completes, not when it starts. Spawning
//! goes through `WorldEffects`; this system only decides when and where.

use std::f64::consts::TAU;

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use vonneumann_core::components::{Ai, BuildState, Probe, Station};
use vonneumann_core::constants::*;
use vonneumann_core::enums::{AiState, AiTask, BuilderKind, UnitKind};
use vonneumann_core::events::SimEvent;
use vonneumann_core::types::Position;

use crate::effects::WorldEffects;
use crate::handle::entity_id;
use crate::stats::GameStats;

fn begin(build: &mut BuildState, unit: UnitKind) {
    build.is_building = true;
    build.progress = 0.0;
    build.target = Some(unit);
}

/// Start a probe-initiated build. Rejected if already building or short of matter.
pub fn start_probe_build(probe: &mut Probe, unit: UnitKind) -> bool {
    if probe.build.is_building || probe.matter < build_cost(BuilderKind::Probe, unit) {
        return false;
    }
    begin(&mut probe.build, unit);
    debug!(probe = %probe.name, ?unit, "probe build started");
    true
}

/// Start a station-initiated build. Rejected if building, researching, or short of matter.
pub fn start_station_build(station: &mut Station, unit: UnitKind) -> bool {
    if station.build.is_building
        || station.research.is_researching
        || station.matter < build_cost(BuilderKind::Station, unit)
    {
        return false;
    }
    begin(&mut station.build, unit);
    debug!(station = %station.name, ?unit, "station build started");
    true
}

/// Advance progress. On completion debit the cost and reset; returns the finished unit.
fn advance(
    build: &mut BuildState,
    matter: &mut f64,
    builder: BuilderKind,
    dt: f64,
) -> Option<UnitKind> {
    if !build.is_building {
        return None;
    }
    // A build flag without a target cannot complete; drop it.
    let Some(unit) = build.target else {
        *build = BuildState::default();
        return None;
    };

    build.progress += dt / build_time(builder, unit);
    if build.progress < 1.0 {
        return None;
    }

    *matter = (*matter - build_cost(builder, unit)).max(0.0);
    *build = BuildState::default();
    Some(unit)
}

struct Completed {
    builder: Entity,
    builder_kind: BuilderKind,
    name: String,
    position: Position,
    unit: UnitKind,
}

pub fn run<E: WorldEffects + ?Sized>(
    world: &mut World,
    dt: f64,
    rng: &mut ChaCha8Rng,
    effects: &mut E,
    stats: &mut GameStats,
    events: &mut Vec<SimEvent>,
) {
    // Collect completions in a buffer; spawning needs the world unborrowed.
    let mut completed: Vec<Completed> = Vec::new();

    for (entity, (pos, probe)) in world.query_mut::<(&Position, &mut Probe)>() {
        if let Some(unit) = advance(&mut probe.build, &mut probe.matter, BuilderKind::Probe, dt) {
            completed.push(Completed {
                builder: entity,
                builder_kind: BuilderKind::Probe,
                name: probe.name.clone(),
                position: *pos,
                unit,
            });
        }
    }

    for (entity, (pos, station)) in world.query_mut::<(&Position, &mut Station)>() {
        if let Some(unit) =
            advance(&mut station.build, &mut station.matter, BuilderKind::Station, dt)
        {
            completed.push(Completed {
                builder: entity,
                builder_kind: BuilderKind::Station,
                name: station.name.clone(),
                position: *pos,
                unit,
            });
        }
    }

    for done in completed {
        let offset = match done.builder_kind {
            BuilderKind::Probe => PROBE_BUILD_SPAWN_OFFSET,
            BuilderKind::Station => STATION_BUILD_SPAWN_OFFSET,
        };
        let spawn_at = done.position.offset_polar(rng.gen_range(0.0..TAU), offset);

        let unit = match done.unit {
            UnitKind::Probe => {
                stats.probes_built += 1;
                effects.spawn_probe(world, spawn_at, true)
            }
            UnitKind::Rover => {
                stats.rovers_built += 1;
                effects.spawn_rover(world, spawn_at)
            }
        };

        if let Ok(mut ai) = world.get::<&mut Ai>(done.builder) {
            ai.task = AiTask::Mine;
            ai.state = AiState::Idle;
        }

        info!(builder = %done.name, unit = ?done.unit, "unit built");
        events.push(SimEvent::UnitBuilt {
            builder: entity_id(done.builder),
            builder_kind: done.builder_kind,
            unit: entity_id(unit),
            unit_kind: done.unit,
        });
    }
}
