//! Error types for Anveshak

use thiserror::Error;

use crate::belief::HazardKind;
use crate::core::{Cell, State};

/// Anveshak error type
#[derive(Error, Debug)]
pub enum AnveshakError {
    #[error("Grid size {0} is too small (need at least 2)")]
    InvalidGrid(usize),

    #[error("Cell {cell} is outside the {size}x{size} grid")]
    CellOutOfBounds { cell: Cell, size: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Observation conflict at {cell}: {variable} already known as {known}, observed {observed}")]
    ObservationConflict {
        cell: Cell,
        variable: &'static str,
        known: bool,
        observed: bool,
    },

    #[error("No {kind} placement is consistent with the recorded evidence")]
    InconsistentEvidence { kind: HazardKind },

    #[error("Exact inference needs {variables} coupled variables (limit {limit})")]
    InferenceTooLarge { variables: usize, limit: usize },

    #[error("State {0} is not in the explored graph")]
    UnknownState(State),

    #[error("No path from {from} to {to}")]
    NoPath { from: State, to: State },

    #[error("Planned path starts at {found} but the agent is at {expected}")]
    PathDesync { expected: State, found: State },

    #[error("Invalid path step from {from} to {to}")]
    InvalidPath { from: State, to: State },

    #[error("Episode is over (agent dead or exited)")]
    EpisodeOver,
}

impl From<toml::de::Error> for AnveshakError {
    fn from(e: toml::de::Error) -> Self {
        AnveshakError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AnveshakError>;
