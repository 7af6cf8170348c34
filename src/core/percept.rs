//! Contract with the world that hosts the agent.
//!
//! The world owns the agent's body. Each step it hands the engine a
//! [`Percept`] plus a read-only [`AgentView`] and receives one action back.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, State};
use super::heading::Heading;

/// Local sensations at the agent's current cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percept {
    /// A pit is adjacent
    pub breeze: bool,
    /// The wumpus is adjacent
    pub stench: bool,
    /// The prize is in this cell
    pub glitter: bool,
    /// The last forward move hit the grid edge
    pub bump: bool,
    /// The last attack killed the wumpus
    pub scream: bool,
    /// Score change caused by the last action
    pub score_delta: i32,
}

/// Read-only view of the agent's runtime state.
pub trait AgentView {
    fn location(&self) -> Cell;

    fn heading(&self) -> Heading;

    /// Remaining ranged-attack charges
    fn attack_charges(&self) -> u32;

    fn is_dead(&self) -> bool;

    fn has_exited(&self) -> bool;

    fn score(&self) -> i64;

    /// Current `(cell, heading)` planning state.
    fn state(&self) -> State {
        State::new(self.location(), self.heading())
    }
}
