//! Probe task state machine.
//!
//! Pure functions that pick a probe's next task and the actions it takes on a
//! decision tick. No ECS dependency; operates on plain data. A task change
//! takes effect on the following decision tick, so each call runs exactly one
//! task handler.

use vonneumann_core::constants::*;
use vonneumann_core::enums::{AiState, AiTask, BuilderKind, UnitKind};

use crate::context::*;

/// Count down the think timer. Returns true (and rearms the timer) when a
/// decision is due.
pub fn advance_think_timer(timer: &mut f64, dt: f64, interval: f64) -> bool {
    *timer -= dt;
    if *timer > 0.0 {
        return false;
    }
    *timer = interval;
    true
}

/// Evaluate one probe decision.
pub fn evaluate_probe(ctx: &ProbeContext) -> ProbeDecision {
    // Construction in progress overrides every task.
    if ctx.is_building {
        return ProbeDecision {
            state: Some(AiState::Building),
            ..ProbeDecision::hold(ctx.task)
        };
    }

    match ctx.task {
        AiTask::Explore => evaluate_explore(ctx),
        AiTask::Mine => evaluate_mine(ctx),
        AiTask::Deposit => evaluate_deposit(ctx),
        AiTask::Build => evaluate_build(ctx),
        AiTask::Idle => pick_task(ctx),
    }
}

fn pick_task(ctx: &ProbeContext) -> ProbeDecision {
    let task = if ctx.matter >= build_cost(BuilderKind::Probe, UnitKind::Probe) {
        AiTask::Build
    } else if ctx.nearest_minable.is_some() {
        AiTask::Mine
    } else {
        AiTask::Explore
    };
    ProbeDecision::hold(task)
}

fn evaluate_explore(ctx: &ProbeContext) -> ProbeDecision {
    let mut decision = ProbeDecision::hold(AiTask::Explore);
    decision.trigger_scan = ctx.scanner_ready;

    if !ctx.has_movement_target {
        if ctx.any_undiscovered {
            // Planet positions are unknown until scanned, so wander.
            decision.movement = MoveOrder::Wander {
                radius: PROBE_WANDER_RADIUS,
            };
        } else {
            decision.task = AiTask::Mine;
        }
    }
    decision
}

/// Task to take when storage is full: unload if a station exists, else spend it.
fn full_storage_task(ctx: &ProbeContext) -> AiTask {
    if ctx.nearest_station.is_some() {
        AiTask::Deposit
    } else {
        AiTask::Build
    }
}

fn evaluate_mine(ctx: &ProbeContext) -> ProbeDecision {
    if let Some(planet) = ctx.planet_in_range {
        if ctx.is_full() {
            let task = full_storage_task(ctx);
            let state = match task {
                AiTask::Deposit => AiState::Traveling,
                _ => AiState::Idle,
            };
            return ProbeDecision {
                state: Some(state),
                ..ProbeDecision::hold(task)
            };
        }

        // Lock on and follow the planet along its orbit.
        return ProbeDecision {
            state: Some(AiState::Mining),
            target: TargetChange::Set(planet.id),
            movement: MoveOrder::Set(planet.position),
            ..ProbeDecision::hold(AiTask::Mine)
        };
    }

    let mut decision = ProbeDecision {
        state: Some(AiState::Traveling),
        ..ProbeDecision::hold(AiTask::Mine)
    };

    if ctx.is_full() {
        decision.task = full_storage_task(ctx);
        return decision;
    }

    match ctx.nearest_minable {
        Some(planet) => {
            decision.target = TargetChange::Set(planet.id);
            decision.movement = MoveOrder::Set(planet.position);
        }
        None => {
            decision.target = TargetChange::Clear;
            decision.task = AiTask::Explore;
        }
    }
    decision
}

fn evaluate_deposit(ctx: &ProbeContext) -> ProbeDecision {
    let Some(station) = ctx.nearest_station else {
        return ProbeDecision::hold(AiTask::Build);
    };

    if station.distance > STATION_DEPOSIT_RANGE {
        return ProbeDecision {
            state: Some(AiState::Traveling),
            movement: MoveOrder::Set(station.position),
            ..ProbeDecision::hold(AiTask::Deposit)
        };
    }

    let free = station.free_capacity();
    let amount = ctx.matter.min(free).max(0.0);
    let mut decision = ProbeDecision {
        state: Some(AiState::Depositing),
        movement: MoveOrder::Clear,
        ..ProbeDecision::hold(AiTask::Deposit)
    };
    if amount > 0.0 {
        decision.deposit = Some(Deposit {
            station: station.id,
            amount,
        });
    }

    // Judged on the post-transfer state.
    if ctx.matter - amount <= 0.0 || free - amount <= 0.0 {
        decision.state = Some(AiState::Idle);
        decision.task = AiTask::Mine;
    }
    decision
}

fn evaluate_build(ctx: &ProbeContext) -> ProbeDecision {
    let unit = if ctx.matter >= build_cost(BuilderKind::Probe, UnitKind::Probe) {
        UnitKind::Probe
    } else if ctx.matter >= build_cost(BuilderKind::Probe, UnitKind::Rover) {
        UnitKind::Rover
    } else {
        return ProbeDecision::hold(AiTask::Mine);
    };

    ProbeDecision {
        state: Some(AiState::Building),
        start_build: Some(unit),
        ..ProbeDecision::hold(AiTask::Build)
    }
}
