//! Core Connect Four game logic: board snapshots, sides, and the game state
//! machine with immutable transitions.

mod board;
mod side;
mod state;

pub use board::{Board, Cell, COLS, ROWS, WIN_LENGTH};
pub use side::Side;
pub use state::{GameOutcome, GameState};
