//! Movement system.
//!
//! Smoothed pursuit of the movement target: ease velocity toward
//! `PROBE_SPEED` along the line to the target, snap to a stop inside the
//! arrival threshold, and damp velocity when no target is set. Easing and
//! damping are per-tick factors, so the feel depends on the tick rate.

use glam::DVec2;
use hecs::World;
use tracing::trace;

use vonneumann_core::components::{Heading, MovementTarget};
use vonneumann_core::constants::{
    ARRIVAL_THRESHOLD, MOVEMENT_SMOOTHING, PROBE_SPEED, VELOCITY_DAMPING,
};
use vonneumann_core::types::{Position, Velocity};

use crate::handle::entity_id;

/// Run movement for all entities with Position + Velocity + MovementTarget.
pub fn run(world: &mut World, dt: f64) {
    for (entity, (pos, vel, target, heading)) in world.query_mut::<(
        &mut Position,
        &mut Velocity,
        &mut MovementTarget,
        Option<&mut Heading>,
    )>() {
        let Some(goal) = target.point else {
            let damped: DVec2 = vel.as_dvec2() * VELOCITY_DAMPING;
            *vel = damped.into();
            *pos = (pos.as_dvec2() + damped * dt).into();
            continue;
        };

        let to_goal: DVec2 = goal.as_dvec2() - pos.as_dvec2();
        let distance = to_goal.length();
        if distance < ARRIVAL_THRESHOLD {
            target.point = None;
            *vel = Velocity::default();
            trace!(entity = entity_id(entity), x = pos.x, y = pos.y, "arrived");
            continue;
        }

        let desired = to_goal / distance * PROBE_SPEED;
        let current = vel.as_dvec2();
        let eased = current + (desired - current) * MOVEMENT_SMOOTHING;
        *vel = eased.into();
        *pos = (pos.as_dvec2() + eased * dt).into();

        if let Some(heading) = heading {
            heading.angle = vel.heading();
        }
    }
}
