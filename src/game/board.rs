use std::fmt;
use std::str::FromStr;

use super::side::Side;
use crate::error::{MoveError, ParseBoardError};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Number of pieces in a row needed to win.
pub const WIN_LENGTH: usize = 4;

/// Window directions as (row step, column step): horizontal, vertical,
/// diagonal rising to the right, diagonal falling to the right.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    X,
    O,
}

/// A 6x7 grid snapshot. Row 0 is the bottom, row 5 is the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the bottom, row 5 is the top
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// A column is legal while its top cell is empty
    pub fn is_legal(&self, col: usize) -> bool {
        col < COLS && self.cells[ROWS - 1][col] == Cell::Empty
    }

    /// Legal columns in ascending order
    pub fn legal_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..COLS).filter(move |&col| self.is_legal(col))
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| !self.is_legal(col))
    }

    /// Number of pieces stacked in a column
    pub fn column_height(&self, col: usize) -> usize {
        (0..ROWS)
            .take_while(|&row| self.cells[row][col] != Cell::Empty)
            .count()
    }

    /// Total number of pieces on the board
    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, side: Side) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col));
        }
        if !self.is_legal(col) {
            return Err(MoveError::ColumnFull(col));
        }

        let row = self.column_height(col);
        self.cells[row][col] = side.to_cell();
        Ok(row)
    }

    /// Return a new board with `side` dropped into `col`. `self` is untouched.
    pub fn apply(&self, col: usize, side: Side) -> Result<Board, MoveError> {
        let mut next = *self;
        next.drop_piece(col, side)?;
        Ok(next)
    }

    /// Count every (cell, direction) pair from which `length` consecutive
    /// cells all belong to `side`.
    ///
    /// Windows overlap: a run of five yields two windows of length four.
    pub fn count_streaks(&self, side: Side, length: usize) -> usize {
        if length == 0 {
            return 0;
        }
        let cell = side.to_cell();
        let mut count = 0;
        for row in 0..ROWS {
            for col in 0..COLS {
                for &direction in &DIRECTIONS {
                    if self.window_matches(row, col, direction, length, cell) {
                        count += 1;
                    }
                }
            }
        }
        count
    }

    /// True if `side` has a run of at least `length` pieces in any direction
    pub fn has_streak(&self, side: Side, length: usize) -> bool {
        self.count_streaks(side, length) > 0
    }

    /// True once either side has four in a row. A full board without a
    /// winner is not terminal here.
    pub fn is_terminal(&self) -> bool {
        self.has_streak(Side::X, WIN_LENGTH) || self.has_streak(Side::O, WIN_LENGTH)
    }

    /// Every cell covered by a four-in-a-row of `side`, sorted by (row, col)
    pub fn winning_cells(&self, side: Side) -> Vec<(usize, usize)> {
        let cell = side.to_cell();
        let mut cells = Vec::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                for &direction in &DIRECTIONS {
                    if self.window_matches(row, col, direction, WIN_LENGTH, cell) {
                        cells.extend(window_cells(row, col, direction, WIN_LENGTH));
                    }
                }
            }
        }
        cells.sort_unstable();
        cells.dedup();
        cells
    }

    /// Left-right mirror image (column c becomes column 6 - c)
    pub fn mirrored(&self) -> Board {
        let mut cells = self.cells;
        for row in cells.iter_mut() {
            row.reverse();
        }
        Board { cells }
    }

    fn window_matches(
        &self,
        row: usize,
        col: usize,
        (dr, dc): (isize, isize),
        length: usize,
        cell: Cell,
    ) -> bool {
        let last = length as isize - 1;
        let end_row = row as isize + dr * last;
        let end_col = col as isize + dc * last;
        if !(0..ROWS as isize).contains(&end_row) || !(0..COLS as isize).contains(&end_col) {
            return false;
        }
        window_cells(row, col, (dr, dc), length).all(|(r, c)| self.cells[r][c] == cell)
    }
}

/// Positions of a window; the caller has checked that it fits on the board.
fn window_cells(
    row: usize,
    col: usize,
    (dr, dc): (isize, isize),
    length: usize,
) -> impl Iterator<Item = (usize, usize)> {
    (0..length as isize).map(move |i| {
        (
            (row as isize + dr * i) as usize,
            (col as isize + dc * i) as usize,
        )
    })
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Six lines, top row first: `.` empty, `x` and `o` for pieces.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..ROWS).rev() {
            for col in 0..COLS {
                let ch = match self.cells[row][col] {
                    Cell::Empty => '.',
                    Cell::X => 'x',
                    Cell::O => 'o',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines: Vec<&str> = s.lines().collect();
        // Blank framing lines around an indented literal; trailing first so
        // an all-empty top row is not mistaken for framing.
        while lines.len() > ROWS && lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        while lines.len() > ROWS && lines.first().is_some_and(|l| l.trim().is_empty()) {
            lines.remove(0);
        }
        if lines.len() != ROWS {
            return Err(ParseBoardError::RowCount(lines.len()));
        }

        let mut board = Board::new();
        for (i, line) in lines.iter().enumerate() {
            let row = ROWS - 1 - i;
            let line = strip_indent(line);
            let width = line.chars().count();
            if width != COLS {
                return Err(ParseBoardError::RowWidth { row, width });
            }
            for (col, ch) in line.chars().enumerate() {
                board.cells[row][col] = match ch {
                    '.' | ' ' => Cell::Empty,
                    'x' | 'X' => Cell::X,
                    'o' | 'O' => Cell::O,
                    _ => return Err(ParseBoardError::InvalidCell { ch, row, col }),
                };
            }
        }

        for col in 0..COLS {
            let height = board.column_height(col);
            if let Some(row) = (height..ROWS).find(|&row| board.cells[row][col] != Cell::Empty) {
                return Err(ParseBoardError::FloatingPiece { row, col });
            }
        }

        Ok(board)
    }
}

/// Drop whitespace indentation in front of a row wider than the board.
/// Spaces inside the last seven characters are empty cells and are kept.
fn strip_indent(line: &str) -> &str {
    let extra = line.chars().count().saturating_sub(COLS);
    match line.char_indices().nth(extra) {
        Some((at, _)) if line[..at].chars().all(char::is_whitespace) => &line[at..],
        _ => line,
    }
}
