//! Scanner timers: cooldown countdown and scan animation progress.

use hecs::World;

use vonneumann_core::components::Scanner;
use vonneumann_core::constants::SCAN_DURATION;

/// Idle and off cooldown.
pub fn is_ready(scanner: &Scanner) -> bool {
    !scanner.is_scanning && scanner.current_cooldown <= 0.0
}

/// Start a scan. Returns false if the scanner is busy or cooling down.
pub fn trigger_scan(scanner: &mut Scanner) -> bool {
    if !is_ready(scanner) {
        return false;
    }
    scanner.is_scanning = true;
    scanner.scan_progress = 0.0;
    true
}

pub fn run(world: &mut World, dt: f64) {
    for (_entity, scanner) in world.query_mut::<&mut Scanner>() {
        if scanner.current_cooldown > 0.0 {
            scanner.current_cooldown = (scanner.current_cooldown - dt).max(0.0);
        }

        if scanner.is_scanning {
            scanner.scan_progress += dt / SCAN_DURATION;
            if scanner.scan_progress >= 1.0 {
                scanner.is_scanning = false;
                scanner.scan_progress = 0.0;
                scanner.current_cooldown = scanner.cooldown;
            }
        }
    }
}
