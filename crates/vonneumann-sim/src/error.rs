//! Errors raised at the command boundary.
//!
//! Domain operations report failure as `false` or a no-op; the engine maps
//! those onto `CommandError` so rejected player commands can be logged and
//! surfaced as events.

use thiserror::Error;

use vonneumann_core::enums::{ResearchKind, SimPhase, UnitKind};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CommandError {
    #[error("entity {0} does not exist")]
    UnknownEntity(u64),

    #[error("entity {entity} has no {component} component")]
    MissingComponent {
        entity: u64,
        component: &'static str,
    },

    #[error("cannot build {unit:?}: builder busy or short of matter")]
    BuildRejected { unit: UnitKind },

    #[error("cannot research {research:?}: station busy or short of matter")]
    ResearchRejected { research: ResearchKind },

    #[error("scanner on entity {0} is busy or cooling down")]
    ScanRejected(u64),

    #[error("no merge cluster contains probe {0}")]
    NoCluster(u64),

    #[error("command not valid in phase {0:?}")]
    WrongPhase(SimPhase),
}
