//! Orbital motion: planets circle their own stored sun centre.

use std::f64::consts::TAU;

use hecs::World;

use vonneumann_core::components::Orbital;
use vonneumann_core::types::Position;

pub fn run(world: &mut World, dt: f64) {
    for (_entity, (pos, orbital)) in world.query_mut::<(&mut Position, &mut Orbital)>() {
        orbital.current_angle += orbital.orbit_speed * dt;
        // Per-tick advance is far below one turn, so a single subtraction wraps.
        if orbital.current_angle >= TAU {
            orbital.current_angle -= TAU;
        }
        *pos = Position::new(orbital.sun_x, orbital.sun_y)
            .offset_polar(orbital.current_angle, orbital.orbit_radius);
    }
}
