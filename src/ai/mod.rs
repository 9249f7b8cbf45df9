//! Move selection: the [`Agent`] trait, the streak heuristic, and the
//! fixed-depth negamax search.

mod agent;
pub mod heuristic;
pub mod minimax;

pub use agent::Agent;
pub use heuristic::{evaluate, Score, LOSS};
pub use minimax::{minimax, optimal_move, scored_moves, MinimaxAgent, SearchResult};
