use std::fmt;

use super::board::Cell;

/// One of the two sides. `X` always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    X,
    O,
}

impl Side {
    /// Get the other side
    pub fn other(self) -> Side {
        match self {
            Side::X => Side::O,
            Side::O => Side::X,
        }
    }

    /// Convert side to the cell it occupies
    pub fn to_cell(self) -> Cell {
        match self {
            Side::X => Cell::X,
            Side::O => Cell::O,
        }
    }

    /// Marker used when printing boards
    pub fn symbol(self) -> char {
        match self {
            Side::X => 'x',
            Side::O => 'o',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
