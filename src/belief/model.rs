//! Exact hazard inference over the cue-adjacency model.
//!
//! Each cell carries two binary variables: `H` (the cell holds the hazard)
//! with an independent prior, and `C` (the cell shows the cue) which is a
//! deterministic OR of the `H` variables of its 4-connected neighbours.
//!
//! A query only has to look at unknown `H` variables coupled to the target
//! through *known* cues. Unknown cues sum out to one for every parent
//! assignment, so the rest of the grid factorises away. The coupled
//! component is enumerated exhaustively:
//!
//! ```text
//! P(H_x = 1 | e) = Σ_{a: a_x=1} Π prior(a_i) Π table_c(a, e_c)
//!                  ---------------------------------------------
//!                  Σ_a        Π prior(a_i) Π table_c(a, e_c)
//! ```

use std::collections::VecDeque;

use crate::core::{Cell, GridSpec};
use crate::error::{AnveshakError, Result};

use super::HazardKind;
use super::observations::ObservationVector;

/// Conditional table of one cue given its neighbours.
///
/// Indexed by a bitmask: bit `i` is the hazard state of `parents[i]`, bit `k`
/// (one past the last parent) is the cue value.
#[derive(Clone, Debug)]
struct CueTable {
    parents: Vec<usize>,
    mass: Vec<f64>,
}

impl CueTable {
    /// Enumerate all `2^(k+1)` rows; a row is possible iff cue == OR(parents).
    fn build(parents: Vec<usize>) -> Self {
        let k = parents.len();
        let parent_mask = (1usize << k) - 1;
        let mass = (0..1usize << (k + 1))
            .map(|row| {
                let any_hazard = row & parent_mask != 0;
                let cue = (row >> k) & 1 == 1;
                if cue == any_hazard { 1.0 } else { 0.0 }
            })
            .collect();
        Self { parents, mass }
    }

    #[inline]
    fn mass(&self, parent_bits: usize, cue: bool) -> f64 {
        self.mass[parent_bits | (usize::from(cue) << self.parents.len())]
    }
}

/// Immutable belief model for one hazard type.
#[derive(Clone, Debug)]
pub struct HazardModel {
    kind: HazardKind,
    grid: GridSpec,
    prior: f64,
    /// Cue table for each cell, by flat index
    cue_tables: Vec<CueTable>,
    /// Cue cells whose table lists this cell as a parent
    children: Vec<Vec<usize>>,
    max_exact_variables: usize,
}

impl HazardModel {
    /// Build the model for a grid with a uniform per-cell prior.
    pub fn new(
        kind: HazardKind,
        grid: GridSpec,
        prior: f64,
        max_exact_variables: usize,
    ) -> Result<Self> {
        if !(prior > 0.0 && prior < 1.0) {
            return Err(AnveshakError::Config(format!(
                "{kind} prior must be in (0, 1), got {prior}"
            )));
        }

        let cue_tables: Vec<CueTable> = grid
            .cells()
            .map(|cell| {
                let parents = grid
                    .neighbors(cell)
                    .into_iter()
                    .map(|n| grid.to_index(n))
                    .collect();
                CueTable::build(parents)
            })
            .collect();

        let mut children = vec![Vec::new(); grid.cell_count()];
        for (cue_index, table) in cue_tables.iter().enumerate() {
            for &parent in &table.parents {
                children[parent].push(cue_index);
            }
        }

        tracing::debug!(
            "Built {} model: {} cells, prior {:.3}",
            kind,
            grid.cell_count(),
            prior
        );

        Ok(Self {
            kind,
            grid,
            prior,
            cue_tables,
            children,
            max_exact_variables,
        })
    }

    pub fn kind(&self) -> HazardKind {
        self.kind
    }

    pub fn prior(&self) -> f64 {
        self.prior
    }

    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    /// Posterior probability that `cell` holds this hazard.
    pub fn infer(&self, obs: &ObservationVector, cell: Cell) -> Result<f64> {
        self.grid.check(cell)?;
        debug_assert_eq!(obs.cell_count(), self.grid.cell_count());
        let target = self.grid.to_index(cell);

        if let Some(known) = obs.hazard(target) {
            return Ok(if known { 1.0 } else { 0.0 });
        }

        let (variables, cues) = self.coupled_component(obs, target);
        if cues.is_empty() {
            return Ok(self.prior);
        }
        if variables.len() > self.max_exact_variables {
            return Err(AnveshakError::InferenceTooLarge {
                variables: variables.len(),
                limit: self.max_exact_variables,
            });
        }

        // Bit position of each free variable within an assignment
        let mut position = vec![usize::MAX; self.grid.cell_count()];
        for (bit, &var) in variables.iter().enumerate() {
            position[var] = bit;
        }

        let mut total = 0.0;
        let mut target_mass = 0.0;
        for assignment in 0..1usize << variables.len() {
            let hazards = assignment.count_ones() as i32;
            let mut weight = self.prior.powi(hazards)
                * (1.0 - self.prior).powi(variables.len() as i32 - hazards);

            for &cue in &cues {
                let table = &self.cue_tables[cue];
                let mut parent_bits = 0;
                for (i, &parent) in table.parents.iter().enumerate() {
                    let present = match obs.hazard(parent) {
                        Some(known) => known,
                        None => (assignment >> position[parent]) & 1 == 1,
                    };
                    parent_bits |= usize::from(present) << i;
                }
                // Cues in the component are known by construction
                let observed = obs.cue(cue).unwrap_or(false);
                weight *= table.mass(parent_bits, observed);
                if weight == 0.0 {
                    break;
                }
            }

            total += weight;
            // The target is always bit 0
            if assignment & 1 == 1 {
                target_mass += weight;
            }
        }

        if total <= 0.0 {
            return Err(AnveshakError::InconsistentEvidence { kind: self.kind });
        }

        let posterior = target_mass / total;
        tracing::trace!(
            "P({} at {}) = {:.4} over {} variables, {} cues",
            self.kind,
            cell,
            posterior,
            variables.len(),
            cues.len()
        );
        Ok(posterior)
    }

    /// Posterior for every cell, in index order.
    pub fn posteriors(&self, obs: &ObservationVector) -> Result<Vec<f64>> {
        self.grid.cells().map(|cell| self.infer(obs, cell)).collect()
    }

    /// Most probable hazard location (lowest index wins ties).
    pub fn most_probable(&self, obs: &ObservationVector) -> Result<(Cell, f64)> {
        let mut best = (self.grid.to_cell(0), f64::NEG_INFINITY);
        for (index, p) in self.posteriors(obs)?.into_iter().enumerate() {
            if p > best.1 {
                best = (self.grid.to_cell(index), p);
            }
        }
        Ok(best)
    }

    /// Unknown hazard variables reachable from `target` through known cues,
    /// plus those cues. `target` is always the first variable.
    fn coupled_component(&self, obs: &ObservationVector, target: usize) -> (Vec<usize>, Vec<usize>) {
        let cells = self.grid.cell_count();
        let mut in_component = vec![false; cells];
        let mut cue_seen = vec![false; cells];
        let mut variables = Vec::new();
        let mut cues = Vec::new();
        let mut queue = VecDeque::new();

        in_component[target] = true;
        queue.push_back(target);

        while let Some(var) = queue.pop_front() {
            variables.push(var);
            for &cue in &self.children[var] {
                if cue_seen[cue] || obs.cue(cue).is_none() {
                    continue;
                }
                cue_seen[cue] = true;
                cues.push(cue);
                for &parent in &self.cue_tables[cue].parents {
                    if !in_component[parent] && obs.hazard(parent).is_none() {
                        in_component[parent] = true;
                        queue.push_back(parent);
                    }
                }
            }
        }

        (variables, cues)
    }
}
