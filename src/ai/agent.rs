use crate::error::AgentError;
use crate::game::GameState;

/// Anything that can produce a move for the side to play.
pub trait Agent {
    /// Select a column for `state.current_side()`.
    fn select_move(&mut self, state: &GameState) -> Result<usize, AgentError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
