//! Actions the agent can emit to the world.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnveshakError;

/// One action per step, from a fixed alphabet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Move one cell in the facing direction
    Forward,
    /// Quarter turn counter-clockwise
    TurnLeft,
    /// Quarter turn clockwise
    TurnRight,
    /// Fire the ranged attack along the facing direction
    Attack,
    /// Pick up the prize in the current cell
    Collect,
    /// Leave the world (only meaningful at the origin)
    Exit,
}

impl Action {
    /// Single character code used by text drivers.
    pub fn as_char(self) -> char {
        match self {
            Action::Forward => 'f',
            Action::TurnLeft => 'l',
            Action::TurnRight => 'r',
            Action::Attack => 's',
            Action::Collect => 'g',
            Action::Exit => 'c',
        }
    }

    /// Whether the action changes the agent's position or heading.
    #[inline]
    pub fn is_motion(self) -> bool {
        matches!(self, Action::Forward | Action::TurnLeft | Action::TurnRight)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Forward => "move-forward",
            Action::TurnLeft => "turn-left",
            Action::TurnRight => "turn-right",
            Action::Attack => "attack",
            Action::Collect => "collect",
            Action::Exit => "exit",
        };
        f.write_str(name)
    }
}

impl FromStr for Action {
    type Err = AnveshakError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "f" | "move-forward" => Ok(Action::Forward),
            "l" | "turn-left" => Ok(Action::TurnLeft),
            "r" | "turn-right" => Ok(Action::TurnRight),
            "s" | "attack" => Ok(Action::Attack),
            "g" | "collect" => Ok(Action::Collect),
            "c" | "exit" => Ok(Action::Exit),
            other => Err(AnveshakError::Config(format!("unrecognized action '{other}'"))),
        }
    }
}
