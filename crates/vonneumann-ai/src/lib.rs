//! Autonomous behavior for Von Neumann Explorer units.
//!
//! Implements the probe task state machine (idle / explore / mine / deposit /
//! build) and the rover scouting loop as pure functions over plain context
//! structs. The simulation gathers a context from the world, asks for a
//! decision, and applies it.

pub mod context;
pub mod fsm;
pub mod rover;

pub use vonneumann_core as core;
