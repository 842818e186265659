//! Orientation of words in the grid

use std::fmt;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use self::Direction::{Across, Down};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    pub fn perpendicular(self) -> Direction {
        match self {
            Across => Down,
            Down => Across,
        }
    }

    /// The (row, col) step between consecutive letters
    pub fn delta(self) -> (isize, isize) {
        match self {
            Across => (0, 1),
            Down => (1, 0),
        }
    }

    /// Position of the letter `offset` steps from `(row, col)`. Negative offsets walk backwards.
    pub fn advance(self, row: isize, col: isize, offset: isize) -> (isize, isize) {
        let (d_row, d_col) = self.delta();
        (row + d_row * offset, col + d_col * offset)
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Across => "Across",
            Down => "Down",
        };
        write!(f, "{}", label)
    }
}
