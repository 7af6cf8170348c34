//! Hazard beliefs.
//!
//! This module provides:
//! - [`HazardModel`]: exact inference for one hazard type
//! - [`ObservationTracker`]: the monotone evidence record
//! - [`Belief`]: both models plus the tracker, with combined risk

mod model;
mod observations;
mod tracker;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Cell, GridSpec};
use crate::error::Result;

pub use model::HazardModel;
pub use observations::{ObservationVector, Slot};
pub use tracker::ObservationTracker;

/// The two kinds of lethal hazard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    /// Any number of cells may hold one; sensed as a breeze
    Pit,
    /// Exactly one exists; sensed as a stench, can be killed by an attack
    Wumpus,
}

impl HazardKind {
    pub const ALL: [HazardKind; 2] = [HazardKind::Pit, HazardKind::Wumpus];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            HazardKind::Pit => 0,
            HazardKind::Wumpus => 1,
        }
    }

    /// Name of the cue this hazard produces in adjacent cells.
    pub fn cue_name(self) -> &'static str {
        match self {
            HazardKind::Pit => "breeze",
            HazardKind::Wumpus => "stench",
        }
    }
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HazardKind::Pit => f.write_str("pit"),
            HazardKind::Wumpus => f.write_str("wumpus"),
        }
    }
}

/// Everything the agent believes about hazards during one episode.
#[derive(Clone, Debug)]
pub struct Belief {
    grid: GridSpec,
    models: [HazardModel; 2],
    tracker: ObservationTracker,
}

impl Belief {
    /// Build both models and an empty tracker.
    pub fn new(
        grid: GridSpec,
        pit_prior: f64,
        wumpus_prior: f64,
        max_exact_variables: usize,
        origin: Cell,
    ) -> Result<Self> {
        Ok(Self {
            grid,
            models: [
                HazardModel::new(HazardKind::Pit, grid, pit_prior, max_exact_variables)?,
                HazardModel::new(HazardKind::Wumpus, grid, wumpus_prior, max_exact_variables)?,
            ],
            tracker: ObservationTracker::new(grid, origin)?,
        })
    }

    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    pub fn model(&self, kind: HazardKind) -> &HazardModel {
        &self.models[kind.index()]
    }

    pub fn tracker(&self) -> &ObservationTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut ObservationTracker {
        &mut self.tracker
    }

    /// Posterior that `cell` holds a hazard of `kind`.
    pub fn probability(&self, kind: HazardKind, cell: Cell) -> Result<f64> {
        self.model(kind)
            .infer(self.tracker.observations(kind), cell)
    }

    /// Probability of dying on entering `cell` from either hazard.
    ///
    /// Union of independent events; only pits count once the wumpus is gone.
    pub fn combined_risk(&self, cell: Cell) -> Result<f64> {
        let pit = self.probability(HazardKind::Pit, cell)?;
        if self.tracker.is_eliminated(HazardKind::Wumpus) {
            return Ok(pit);
        }
        let wumpus = self.probability(HazardKind::Wumpus, cell)?;
        Ok(pit + wumpus - pit * wumpus)
    }

    /// Most likely location of a hazard of `kind`.
    pub fn most_probable(&self, kind: HazardKind) -> Result<(Cell, f64)> {
        self.model(kind)
            .most_probable(self.tracker.observations(kind))
    }
}
