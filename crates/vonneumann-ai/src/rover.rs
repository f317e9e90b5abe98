//! Rover scouting loop: scan whenever possible, wander when idle.

use vonneumann_core::constants::ROVER_WANDER_RADIUS;
use vonneumann_core::enums::RoverStatus;

use crate::context::{MoveOrder, RoverContext, RoverDecision};

pub fn evaluate_rover(ctx: &RoverContext) -> RoverDecision {
    let trigger_scan = ctx.scanner_ready;
    let movement = if ctx.has_movement_target {
        MoveOrder::Keep
    } else {
        MoveOrder::Wander {
            radius: ROVER_WANDER_RADIUS,
        }
    };

    let status = if trigger_scan || ctx.is_scanning {
        RoverStatus::Scanning
    } else {
        // Either already travelling or just given a wander point.
        RoverStatus::Moving
    };

    RoverDecision {
        trigger_scan,
        movement,
        status,
    }
}
