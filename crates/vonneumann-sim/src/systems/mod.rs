//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components. The engine runs
//! them in a fixed order; merge runs on demand rather than every tick.

pub mod ai;
pub mod construction;
pub mod discovery;
pub mod merge;
pub mod mining;
pub mod movement;
pub mod orbital;
pub mod research;
pub mod scanning;
pub mod snapshot;
