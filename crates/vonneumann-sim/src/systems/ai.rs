//! AI system: runs the autonomous decision logic for probes and rovers.
//!
//! Calls the decision functions from vonneumann-ai on a context gathered
//! fresh from the world, then applies the decision. Probes are decided and
//! applied one at a time, so a deposit by one probe is visible to the next.

use std::f64::consts::TAU;

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use vonneumann_core::components::{Ai, MovementTarget, Probe, Rover, Scanner, Station};
use vonneumann_core::constants::*;
use vonneumann_core::types::Position;

use vonneumann_ai::context::*;
use vonneumann_ai::fsm::{advance_think_timer, evaluate_probe};
use vonneumann_ai::rover::evaluate_rover;

use crate::handle::{entity_id, resolve};
use crate::spatial;
use crate::systems::{construction, scanning};

/// Random point `WANDER_MIN_DISTANCE + U(0, radius)` away in a random direction.
pub fn wander_point(rng: &mut ChaCha8Rng, from: &Position, radius: f64) -> Position {
    let angle = rng.gen_range(0.0..TAU);
    let distance = WANDER_MIN_DISTANCE + rng.gen::<f64>() * radius;
    from.offset_polar(angle, distance)
}

pub fn run(world: &mut World, dt: f64, rng: &mut ChaCha8Rng) {
    let probes: Vec<Entity> = world
        .query::<(&Probe, &Ai)>()
        .iter()
        .filter(|(_, (probe, _))| probe.is_autonomous)
        .map(|(entity, _)| entity)
        .collect();

    for entity in probes {
        if !think_due(world, entity, dt, PROBE_THINK_INTERVAL) {
            continue;
        }
        let Some((ctx, position)) = probe_context(world, entity) else {
            continue;
        };
        let decision = evaluate_probe(&ctx);
        apply_probe_decision(world, rng, entity, &position, &ctx, decision);
    }

    let rovers: Vec<Entity> = world
        .query::<(&Rover, &Ai)>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();

    for entity in rovers {
        if !think_due(world, entity, dt, ROVER_THINK_INTERVAL) {
            continue;
        }
        update_rover(world, rng, entity);
    }
}

fn think_due(world: &World, entity: Entity, dt: f64, interval: f64) -> bool {
    match world.get::<&mut Ai>(entity) {
        Ok(mut ai) => advance_think_timer(&mut ai.think_timer, dt, interval),
        Err(_) => false,
    }
}

/// Snapshot the probe's own state and its surroundings.
pub fn probe_context(world: &World, entity: Entity) -> Option<(ProbeContext, Position)> {
    let (position, task, matter, max_matter, is_building, scanner_ready, has_movement_target) = {
        let mut query = world
            .query_one::<(&Position, &Probe, &Ai, &Scanner, &MovementTarget)>(entity)
            .ok()?;
        let (pos, probe, ai, scanner, target) = query.get()?;
        (
            *pos,
            ai.task,
            probe.matter,
            probe.max_matter,
            probe.build.is_building,
            scanning::is_ready(scanner),
            target.point.is_some(),
        )
    };

    let to_target = |(planet, pos): (Entity, Position)| PlanetTarget {
        id: entity_id(planet),
        position: pos,
    };

    let ctx = ProbeContext {
        task,
        matter,
        max_matter,
        is_building,
        scanner_ready,
        has_movement_target,
        planet_in_range: spatial::first_minable_in_range(world, &position, MINING_RANGE)
            .map(to_target),
        nearest_minable: spatial::nearest_minable(world, &position).map(to_target),
        nearest_station: spatial::nearest_station(world, &position).map(|s| StationTarget {
            id: entity_id(s.entity),
            position: s.position,
            distance: s.distance,
            matter: s.matter,
            max_matter: s.max_matter,
        }),
        any_undiscovered: spatial::any_undiscovered(world),
    };
    Some((ctx, position))
}

fn apply_movement(
    world: &World,
    rng: &mut ChaCha8Rng,
    entity: Entity,
    position: &Position,
    order: MoveOrder,
) {
    let Ok(mut target) = world.get::<&mut MovementTarget>(entity) else {
        return;
    };
    match order {
        MoveOrder::Keep => {}
        MoveOrder::Set(point) => target.point = Some(point),
        MoveOrder::Clear => target.point = None,
        MoveOrder::Wander { radius } => {
            target.point = Some(wander_point(rng, position, radius));
        }
    }
}

fn apply_probe_decision(
    world: &World,
    rng: &mut ChaCha8Rng,
    entity: Entity,
    position: &Position,
    ctx: &ProbeContext,
    decision: ProbeDecision,
) {
    if let Ok(mut ai) = world.get::<&mut Ai>(entity) {
        if ai.task != decision.task {
            debug!(
                probe = entity_id(entity),
                from = ?ai.task,
                to = ?decision.task,
                "task change"
            );
        }
        ai.task = decision.task;
        if let Some(state) = decision.state {
            ai.state = state;
        }
        match decision.target {
            TargetChange::Keep => {}
            TargetChange::Set(id) => ai.target_entity = Some(id),
            TargetChange::Clear => ai.target_entity = None,
        }
    }

    apply_movement(world, rng, entity, position, decision.movement);

    if decision.trigger_scan {
        if let Ok(mut scanner) = world.get::<&mut Scanner>(entity) {
            scanning::trigger_scan(&mut scanner);
        }
    }

    if let Some(deposit) = decision.deposit {
        transfer_to_station(world, entity, deposit);
    }

    if let Some(unit) = decision.start_build {
        if let Ok(mut probe) = world.get::<&mut Probe>(entity) {
            if !construction::start_probe_build(&mut probe, unit) {
                debug!(probe = %probe.name, matter = ctx.matter, ?unit, "build rejected");
            }
        }
    }
}

/// Move matter into the station, re-clamped against current storage.
fn transfer_to_station(world: &World, probe_entity: Entity, deposit: Deposit) {
    let Some(station_entity) = resolve(world, deposit.station) else {
        return;
    };
    let (Ok(mut probe), Ok(mut station)) = (
        world.get::<&mut Probe>(probe_entity),
        world.get::<&mut Station>(station_entity),
    ) else {
        return;
    };

    let free = (station.max_matter - station.matter).max(0.0);
    let amount = deposit.amount.min(probe.matter).min(free).max(0.0);
    probe.matter -= amount;
    station.matter += amount;
    debug!(probe = %probe.name, station = %station.name, amount, "matter deposited");
}

fn update_rover(world: &World, rng: &mut ChaCha8Rng, entity: Entity) {
    let (ctx, position) = {
        let Ok(mut query) = world.query_one::<(&Position, &Scanner, &MovementTarget)>(entity)
        else {
            return;
        };
        let Some((pos, scanner, target)) = query.get() else {
            return;
        };
        (
            RoverContext {
                scanner_ready: scanning::is_ready(scanner),
                is_scanning: scanner.is_scanning,
                has_movement_target: target.point.is_some(),
            },
            *pos,
        )
    };

    let decision = evaluate_rover(&ctx);

    if decision.trigger_scan {
        if let Ok(mut scanner) = world.get::<&mut Scanner>(entity) {
            scanning::trigger_scan(&mut scanner);
        }
    }
    apply_movement(world, rng, entity, &position, decision.movement);
    if let Ok(mut rover) = world.get::<&mut Rover>(entity) {
        rover.status = decision.status;
    }
}
