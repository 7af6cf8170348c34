//! Observation tracker.
//!
//! Owns one [`ObservationVector`] per hazard type and applies the step
//! updates: cues sensed in a cell, cells proven safe by standing in them, and
//! eliminations reported by attacks. The world never changes once generated,
//! so a known entry may be re-confirmed but never contradicted.

use crate::core::{Cell, GridSpec, Heading};
use crate::error::{AnveshakError, Result};

use super::HazardKind;
use super::observations::{ObservationVector, Slot};

/// Monotone record of everything observed during one episode.
#[derive(Clone, Debug)]
pub struct ObservationTracker {
    grid: GridSpec,
    vectors: [ObservationVector; 2],
    eliminated: [bool; 2],
}

impl ObservationTracker {
    /// Fresh tracker where only `origin` is known to be hazard-free.
    pub fn new(grid: GridSpec, origin: Cell) -> Result<Self> {
        grid.check(origin)?;
        let mut tracker = Self {
            grid,
            vectors: [
                ObservationVector::new(grid.cell_count()),
                ObservationVector::new(grid.cell_count()),
            ],
            eliminated: [false; 2],
        };
        tracker.mark_safe(origin)?;
        Ok(tracker)
    }

    pub fn observations(&self, kind: HazardKind) -> &ObservationVector {
        &self.vectors[kind.index()]
    }

    /// Whether the hazard type has been ruled out everywhere.
    pub fn is_eliminated(&self, kind: HazardKind) -> bool {
        self.eliminated[kind.index()]
    }

    /// Record whether `kind`'s cue is present in `cell`.
    ///
    /// Ignored once the hazard type is eliminated: the cue may linger in the
    /// world but no longer carries information.
    pub fn record_cue(&mut self, cell: Cell, kind: HazardKind, present: bool) -> Result<()> {
        if self.is_eliminated(kind) {
            return Ok(());
        }
        self.assign(kind, Slot::Cue, cell, present)
    }

    /// Record that neither hazard type occupies `cell`.
    pub fn mark_safe(&mut self, cell: Cell) -> Result<()> {
        for kind in HazardKind::ALL {
            self.assign(kind, Slot::Hazard, cell, false)?;
        }
        Ok(())
    }

    /// Rule out the wumpus on every cell an unanswered attack passed through.
    pub fn eliminate_along_ray(&mut self, origin: Cell, heading: Heading) -> Result<()> {
        let kind = HazardKind::Wumpus;
        if self.is_eliminated(kind) {
            return Ok(());
        }
        self.grid.check(origin)?;
        let cells = self.grid.ray(origin, heading);
        tracing::debug!(
            "No {} along {} cells from {} heading {}",
            kind,
            cells.len(),
            origin,
            heading
        );
        for cell in cells {
            self.assign(kind, Slot::Hazard, cell, false)?;
        }
        Ok(())
    }

    /// Retire a hazard type entirely (its only instance is gone).
    pub fn eliminate_all(&mut self, kind: HazardKind) {
        tracing::info!("Eliminated {} from the belief", kind);
        self.vectors[kind.index()].clear_all();
        self.eliminated[kind.index()] = true;
    }

    fn assign(&mut self, kind: HazardKind, slot: Slot, cell: Cell, value: bool) -> Result<()> {
        self.grid.check(cell)?;
        let index = self.grid.to_index(cell);
        let vector = &mut self.vectors[kind.index()];
        match vector.get(slot, index) {
            Some(known) if known != value => Err(AnveshakError::ObservationConflict {
                cell,
                variable: match (kind, slot) {
                    (HazardKind::Pit, Slot::Hazard) => "pit",
                    (HazardKind::Wumpus, Slot::Hazard) => "wumpus",
                    (kind, Slot::Cue) => kind.cue_name(),
                },
                known,
                observed: value,
            }),
            Some(_) => Ok(()),
            None => {
                vector.set(slot, index, value);
                Ok(())
            }
        }
    }
}
