//! Fixed-rate game loop: feeds scheduled commands, ticks the engine, paces.
//!
//! Without real-time pacing the loop runs as fast as the engine allows, which
//! is what batch runs and tests want. With pacing each tick is stretched to
//! `TICK_DURATION / time_scale` of wall time.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::info;

use vonneumann_core::commands::PlayerCommand;
use vonneumann_core::constants::TICK_RATE;
use vonneumann_core::state::WorldSnapshot;
use vonneumann_sim::{SimulationEngine, WorldEffects};

/// Nominal duration of one tick at 1x speed.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// A command to queue once the simulation reaches `tick`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledCommand {
    pub tick: u64,
    pub command: PlayerCommand,
}

#[derive(Debug, Clone)]
pub struct LoopOptions {
    /// Loop iterations to run, including paused ones.
    pub ticks: u64,
    /// Sleep between ticks to match wall-clock time.
    pub realtime: bool,
    /// Log a summary line every this many ticks. 0 disables it.
    pub summary_every: u64,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            ticks: 60 * TICK_RATE as u64,
            realtime: false,
            summary_every: 10 * TICK_RATE as u64,
        }
    }
}

/// Wall time one tick should take at `time_scale`.
pub fn effective_tick_duration(time_scale: f64) -> Duration {
    if time_scale > 0.001 {
        TICK_DURATION.div_f64(time_scale)
    } else {
        TICK_DURATION
    }
}

/// Run the loop and return the last snapshot.
///
/// `schedule` must be ordered by tick; commands are queued on the first loop
/// iteration whose index is at least their tick.
pub fn run<E: WorldEffects>(
    engine: &mut SimulationEngine<E>,
    schedule: Vec<ScheduledCommand>,
    options: &LoopOptions,
) -> WorldSnapshot {
    let mut pending: VecDeque<ScheduledCommand> = schedule.into();
    let mut last = WorldSnapshot::default();
    let mut next_tick_time = Instant::now();

    for iteration in 0..options.ticks {
        // 1. Queue commands that have come due
        while pending.front().is_some_and(|c| c.tick <= iteration) {
            if let Some(scheduled) = pending.pop_front() {
                engine.queue_command(scheduled.command);
            }
        }

        // 2. Advance one tick (the engine handles pause internally)
        last = engine.tick();

        if options.summary_every > 0 && (iteration + 1) % options.summary_every == 0 {
            log_summary(&last);
        }

        // 3. Sleep until the next tick, adjusting for time_scale
        if options.realtime {
            let tick_duration = effective_tick_duration(engine.time_scale());
            next_tick_time += tick_duration;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > tick_duration * 2 {
                // Too far behind, reset to avoid a catch-up spiral
                next_tick_time = now;
            }
        }
    }
    last
}

pub fn log_summary(snapshot: &WorldSnapshot) {
    let stats = &snapshot.stats;
    info!(
        t = snapshot.time.elapsed_secs,
        phase = ?snapshot.phase,
        probes = stats.probe_count,
        rovers = stats.rover_count,
        stations = stats.station_count,
        discovered = stats.planets_discovered,
        planets = stats.planets_total,
        mined = stats.total_matter_mined,
        systems = stats.systems_unlocked,
        "status"
    );
}
