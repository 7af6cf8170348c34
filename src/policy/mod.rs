//! Decision policy.
//!
//! [`HuntAgent`] turns one percept into one action. It keeps a queue of
//! planned actions and only thinks again once the queue has drained.

mod agent;

pub use agent::HuntAgent;

/// Two frontier risks closer than this are treated as equal.
pub const RISK_TIE_EPSILON: f64 = 1e-9;

/// Why the last action was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecisionPhase {
    /// No action emitted yet
    Idle,
    /// Replaying a queued plan
    ExecutingPlan,
    /// Recording percepts; left set if that update fails
    Sensing,
    /// Picking up the prize before heading home
    Collecting,
    /// Turning towards or attacking the wumpus
    Hunting,
    /// Moving to the least risky frontier
    Exploring,
    /// Giving up and walking home
    Retreating,
    /// Leaving the world
    Exiting,
}
