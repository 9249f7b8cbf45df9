//! A sequence of games between two seats, with a running scoreboard.
//!
//! The session owns the live [`GameState`] and is the only place moves are
//! applied. Computer seats ask their [`MinimaxAgent`] for a column; human
//! seats get their column from whichever front-end is driving the session.

use tracing::info;

use crate::ai::{Agent, MinimaxAgent};
use crate::config::{AppConfig, PlayerConfig, PlayerKind};
use crate::error::{AgentError, MoveError};
use crate::game::{GameOutcome, GameState, Side};

/// How a seat produces its moves.
pub enum Controller {
    Human,
    Computer(MinimaxAgent),
}

/// A named player. Its side follows from its position in the [`Session`].
pub struct Seat {
    name: String,
    controller: Controller,
}

impl Seat {
    pub fn human(name: impl Into<String>) -> Self {
        Seat {
            name: name.into(),
            controller: Controller::Human,
        }
    }

    pub fn computer(name: impl Into<String>, agent: MinimaxAgent) -> Self {
        Seat {
            name: name.into(),
            controller: Controller::Computer(agent),
        }
    }

    fn from_config(config: &PlayerConfig, seed: Option<u64>) -> Self {
        match config.kind {
            PlayerKind::Human => Seat::human(config.name.clone()),
            PlayerKind::Computer => {
                let depth = config.search_depth();
                let agent = match seed {
                    Some(seed) => MinimaxAgent::with_seed(depth, seed),
                    None => MinimaxAgent::new(depth),
                };
                Seat::computer(config.name.clone(), agent)
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_computer(&self) -> bool {
        matches!(self.controller, Controller::Computer(_))
    }

    /// Short label for headers, e.g. "Computer (depth 4)"
    pub fn label(&self) -> String {
        match &self.controller {
            Controller::Human => self.name.clone(),
            Controller::Computer(agent) => format!("{} (depth {})", self.name, agent.depth()),
        }
    }
}

/// Wins per seat and ties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub wins: [u32; 2],
    pub ties: u32,
}

impl Scoreboard {
    pub fn games(&self) -> u32 {
        self.wins[0] + self.wins[1] + self.ties
    }
}

pub struct Session {
    seats: [Seat; 2],
    state: GameState,
    scoreboard: Scoreboard,
}

fn seat_index(side: Side) -> usize {
    match side {
        Side::X => 0,
        Side::O => 1,
    }
}

impl Session {
    /// The first seat plays `X` and therefore always opens; the second plays `O`.
    pub fn new(first: Seat, second: Seat) -> Self {
        Session {
            seats: [first, second],
            state: GameState::initial(),
            scoreboard: Scoreboard::default(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let seed = config.search.seed;
        Session::new(
            Seat::from_config(&config.player_one, seed),
            Seat::from_config(&config.player_two, seed.map(|s| s.wrapping_add(1))),
        )
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn seats(&self) -> &[Seat; 2] {
        &self.seats
    }

    pub fn scoreboard(&self) -> Scoreboard {
        self.scoreboard
    }

    /// Seat playing `side`
    pub fn seat(&self, side: Side) -> &Seat {
        &self.seats[seat_index(side)]
    }

    /// Seat whose turn it is
    pub fn current_seat(&self) -> &Seat {
        self.seat(self.state.current_side())
    }

    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    /// Drop a piece for the side to move. Records the result once the game ends.
    pub fn play(&mut self, column: usize) -> Result<Option<GameOutcome>, MoveError> {
        self.state.apply_move_mut(column)?;

        let outcome = self.state.outcome();
        match outcome {
            Some(GameOutcome::Winner(side)) => {
                self.scoreboard.wins[seat_index(side)] += 1;
                info!(
                    winner = self.seats[seat_index(side)].name(),
                    round = self.state.round(),
                    "game won"
                );
            }
            Some(GameOutcome::Draw) => {
                self.scoreboard.ties += 1;
                info!(round = self.state.round(), "game drawn");
            }
            None => {}
        }
        Ok(outcome)
    }

    /// Let the current seat move if it is a computer.
    ///
    /// Returns the column played, or `None` when a human is to move.
    pub fn computer_move(&mut self) -> Result<Option<usize>, AgentError> {
        let idx = seat_index(self.state.current_side());
        let column = match &mut self.seats[idx].controller {
            Controller::Computer(agent) => agent.select_move(&self.state)?,
            Controller::Human => return Ok(None),
        };
        self.play(column)?;
        Ok(Some(column))
    }

    /// Seat that won the current game, if any
    pub fn winner(&self) -> Option<&Seat> {
        match self.state.outcome() {
            Some(GameOutcome::Winner(side)) => Some(&self.seats[seat_index(side)]),
            _ => None,
        }
    }

    /// Cells of the winning four(s), empty unless the game was won
    pub fn highlighted_cells(&self) -> Vec<(usize, usize)> {
        match self.state.outcome() {
            Some(GameOutcome::Winner(side)) => self.state.board().winning_cells(side),
            _ => Vec::new(),
        }
    }

    /// Start a fresh board; seats and scoreboard are kept
    pub fn new_game(&mut self) {
        self.state = GameState::initial();
    }

    /// e.g. "Ada: 2 wins, Computer: 1 wins, 0 ties"
    pub fn stats_line(&self) -> String {
        format!(
            "{}: {} wins, {}: {} wins, {} ties",
            self.seats[0].name,
            self.scoreboard.wins[0],
            self.seats[1].name,
            self.scoreboard.wins[1],
            self.scoreboard.ties
        )
    }
}
