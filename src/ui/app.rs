use crate::error::MoveError;
use crate::game::{GameOutcome, COLS};
use crate::session::Session;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use tracing::error;

pub struct App {
    session: Session,
    selected_column: usize,
    should_quit: bool,
    /// Set when a computer seat failed to move; cleared on restart
    halted: bool,
    message: Option<String>,
}

impl App {
    pub fn new(session: Session) -> Self {
        App {
            session,
            selected_column: 3, // Start in middle
            should_quit: false,
            halted: false,
            message: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.computer_to_move() {
                self.step_computer();
            } else {
                self.handle_events()?;
            }
        }
        Ok(())
    }

    fn computer_to_move(&self) -> bool {
        !self.halted && !self.session.is_over() && self.session.current_seat().is_computer()
    }

    /// Let the computer seat on turn play one move
    fn step_computer(&mut self) {
        match self.session.computer_move() {
            Ok(Some(column)) => {
                self.selected_column = column;
                self.announce_outcome();
            }
            Ok(None) => {}
            Err(err) => {
                error!(%err, "computer seat failed to move");
                self.halted = true;
                self.message = Some(format!("Computer error: {err}"));
            }
        }
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                }
            }
            KeyCode::Right => {
                if self.selected_column < COLS - 1 {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='7') => {
                self.selected_column = c as usize - '1' as usize;
                self.drop_piece();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.session.new_game();
                self.halted = false;
                self.selected_column = 3;
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    /// Drop piece in selected column for the human on turn
    fn drop_piece(&mut self) {
        if self.session.is_over() {
            self.message = Some("Game over! Press 'r' for a rematch.".to_string());
            return;
        }
        if self.session.current_seat().is_computer() {
            self.message = Some("Wait for the computer to move.".to_string());
            return;
        }

        match self.session.play(self.selected_column) {
            Ok(_) => self.announce_outcome(),
            Err(MoveError::ColumnFull(_)) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(MoveError::InvalidColumn(_)) => {
                self.message = Some("Invalid column!".to_string());
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game is over!".to_string());
            }
        }
    }

    fn announce_outcome(&mut self) {
        if let Some(outcome) = self.session.state().outcome() {
            self.message = Some(match outcome {
                GameOutcome::Winner(_) => {
                    let name = self.session.winner().map(|s| s.name()).unwrap_or_default();
                    format!("{name} wins! Press 'r' for a rematch.")
                }
                GameOutcome::Draw => "It's a draw! Press 'r' for a rematch.".to_string(),
            });
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.session, self.selected_column, &self.message);
    }
}
