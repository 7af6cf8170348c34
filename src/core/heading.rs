//! Compass headings and relative bearings.
//!
//! Headings are numbered clockwise starting at East, so a right turn adds one
//! and a left turn subtracts one (mod 4). Rows grow towards North and columns
//! grow towards East, which puts the origin cell `(0, 0)` in the bottom-left
//! corner.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::cell::Cell;

/// One of the four compass directions the agent can face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Heading {
    /// Facing increasing columns
    East = 0,
    /// Facing decreasing rows
    South = 1,
    /// Facing decreasing columns
    West = 2,
    /// Facing increasing rows
    North = 3,
}

impl Heading {
    /// All headings in clockwise order starting at East.
    pub const ALL: [Heading; 4] = [Heading::East, Heading::South, Heading::West, Heading::North];

    /// Heading from its numeric value (taken mod 4).
    #[inline]
    pub fn from_index(value: usize) -> Self {
        Self::ALL[value % 4]
    }

    /// Numeric value in `0..4`.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Heading after a clockwise quarter turn.
    #[inline]
    pub fn turn_right(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Heading after a counter-clockwise quarter turn.
    #[inline]
    pub fn turn_left(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    #[inline]
    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// `(row, col)` step taken by a forward move.
    #[inline]
    pub fn offset(self) -> (i64, i64) {
        match self {
            Heading::East => (0, 1),
            Heading::South => (-1, 0),
            Heading::West => (0, -1),
            Heading::North => (1, 0),
        }
    }

    /// Signed number of quarter turns from `self` to `other`, in `-3..=3`.
    #[inline]
    pub fn turn_delta(self, other: Heading) -> i64 {
        other.index() as i64 - self.index() as i64
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Heading::East => "east",
            Heading::South => "south",
            Heading::West => "west",
            Heading::North => "north",
        };
        f.write_str(name)
    }
}

/// Direction of one cell as seen from another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bearing {
    /// Both cells are the same
    Same,
    /// The target shares a row or column and lies in this direction
    Toward(Heading),
    /// The target shares neither row nor column (no line of sight)
    OffAxis,
}

impl Bearing {
    /// Bearing of `to` as seen from `from`.
    ///
    /// Cells sharing a row or column get a heading regardless of distance.
    pub fn between(from: Cell, to: Cell) -> Self {
        if from == to {
            return Bearing::Same;
        }
        let d_row = to.row as i64 - from.row as i64;
        let d_col = to.col as i64 - from.col as i64;
        match (d_row, d_col) {
            (r, 0) if r > 0 => Bearing::Toward(Heading::North),
            (r, 0) if r < 0 => Bearing::Toward(Heading::South),
            (0, c) if c > 0 => Bearing::Toward(Heading::East),
            (0, c) if c < 0 => Bearing::Toward(Heading::West),
            _ => Bearing::OffAxis,
        }
    }

    /// Heading if the target is in line of sight.
    pub fn heading(self) -> Option<Heading> {
        match self {
            Bearing::Toward(heading) => Some(heading),
            Bearing::Same | Bearing::OffAxis => None,
        }
    }
}
