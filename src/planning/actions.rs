//! Conversion of planned state sequences into action sequences.

use crate::core::{Action, State};
use crate::error::{AnveshakError, Result};

/// Actions that replay `path` from its first state, followed by `trailing`.
///
/// A change of cell is a forward move; a change of heading in place is a
/// quarter turn (`+1`/`-3` right, `-1`/`+3` left). Anything else cannot come
/// from a single graph edge and is rejected.
pub fn to_actions(path: &[State], trailing: &[Action]) -> Result<Vec<Action>> {
    let mut actions = Vec::with_capacity(path.len() + trailing.len());

    for pair in path.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let action = if from.cell != to.cell {
            if from.cell.manhattan_distance(&to.cell) != 1 {
                return Err(AnveshakError::InvalidPath { from, to });
            }
            Action::Forward
        } else {
            match from.heading.turn_delta(to.heading) {
                1 | -3 => Action::TurnRight,
                -1 | 3 => Action::TurnLeft,
                _ => return Err(AnveshakError::InvalidPath { from, to }),
            }
        };
        actions.push(action);
    }

    actions.extend_from_slice(trailing);
    Ok(actions)
}
