//! Line-based front-end for terminals without the full-screen UI.

use std::io::{self, BufRead, Write};

use crate::ai::Agent;
use crate::config::{PlayerConfig, MAX_DIFFICULTY};
use crate::error::{AgentError, MoveError};
use crate::game::{Cell, GameState, COLS, ROWS};
use crate::session::Session;

/// Agent that asks a person for a column over a pair of streams.
pub struct HumanAgent<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> HumanAgent<'a, R, W> {
    pub fn new(input: &'a mut R, output: &'a mut W) -> Self {
        HumanAgent { input, output }
    }
}

impl<R: BufRead, W: Write> Agent for HumanAgent<'_, R, W> {
    /// Columns are entered 1-based. Fullness is left to the caller.
    fn select_move(&mut self, _state: &GameState) -> Result<usize, AgentError> {
        loop {
            write!(self.output, "Enter a move (by column number): ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(AgentError::InputClosed);
            }
            match line.trim().parse::<usize>() {
                Ok(n) if (1..=COLS).contains(&n) => return Ok(n - 1),
                Ok(_) => writeln!(self.output, "Invalid choice, try again.")?,
                Err(_) => writeln!(self.output, "Invalid input; please enter a number.")?,
            }
        }
    }

    fn name(&self) -> &str {
        "Human"
    }
}

/// Print `prompt` and read one trimmed line. End of input is an error.
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String, AgentError> {
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(AgentError::InputClosed);
    }
    Ok(line.trim().to_string())
}

/// Ask who sits in each seat: human or computer, a name, and for computers a
/// difficulty. Invalid answers are asked again.
pub fn configure_seats<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<[PlayerConfig; 2], AgentError> {
    let first = configure_seat(input, output, 1)?;
    let second = configure_seat(input, output, 2)?;
    Ok([first, second])
}

fn configure_seat<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    number: usize,
) -> Result<PlayerConfig, AgentError> {
    writeln!(output, "Configure Player {number}: Human or Computer?")?;
    let computer = loop {
        let choice = ask(input, output, "Choose 'H' for Human or 'C' for Computer: ")?;
        match choice.to_lowercase().as_str() {
            "h" | "human" => break false,
            "c" | "computer" => break true,
            _ => writeln!(output, "Sorry, that's not a valid option. Please try again.")?,
        }
    };

    let name = loop {
        let name = ask(input, output, &format!("Enter Player {number}'s name: "))?;
        if !name.is_empty() {
            break name;
        }
        writeln!(output, "Name must not be empty.")?;
    };

    let config = if computer {
        let difficulty = loop {
            let answer = ask(input, output, &format!("Set AI difficulty (1-{MAX_DIFFICULTY}): "))?;
            match answer.parse::<u8>() {
                Ok(d) if (1..=MAX_DIFFICULTY).contains(&d) => break d,
                _ => writeln!(output, "Difficulty must be a number from 1 to {MAX_DIFFICULTY}.")?,
            }
        };
        PlayerConfig::computer(name, difficulty)
    } else {
        PlayerConfig::human(name)
    };
    writeln!(output, "Player {number} is {}.", config.name)?;
    Ok(config)
}

/// Plays a session over plain text streams, game after game, until the
/// players decline a rematch.
pub struct Console<R, W> {
    session: Session,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(session: Session, input: R, output: W) -> Self {
        Console {
            session,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> Result<(), AgentError> {
        loop {
            self.play_game()?;
            writeln!(self.output, "{}", self.session.stats_line())?;
            if !self.ask_rematch()? {
                return Ok(());
            }
            self.session.new_game();
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn play_game(&mut self) -> Result<(), AgentError> {
        self.print_state()?;
        while !self.session.is_over() {
            let name = self.session.current_seat().name().to_string();
            let side = self.session.state().current_side();
            writeln!(self.output, "{name}'s turn. {name} is {side}")?;

            if self.session.computer_move()?.is_none() {
                let column = HumanAgent::new(&mut self.input, &mut self.output)
                    .select_move(self.session.state())?;
                match self.session.play(column) {
                    Ok(_) => {}
                    Err(MoveError::ColumnFull(_)) => {
                        writeln!(self.output, "Invalid move: column is full.")?;
                        continue;
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            self.print_state()?;
        }
        Ok(())
    }

    fn print_state(&mut self) -> io::Result<()> {
        let highlighted = self.session.highlighted_cells();
        let state = self.session.state();
        let out = &mut self.output;

        writeln!(out, "Connect Four! Round: {}", state.round())?;
        for row in (0..ROWS).rev() {
            write!(out, "\t")?;
            for col in 0..COLS {
                let lit = highlighted.contains(&(row, col));
                let ch = match (state.board().get(row, col), lit) {
                    (Cell::Empty, _) => ' ',
                    (Cell::X, false) => 'x',
                    (Cell::X, true) => 'X',
                    (Cell::O, false) => 'o',
                    (Cell::O, true) => 'O',
                };
                write!(out, "| {ch} ")?;
            }
            writeln!(out, "|")?;
        }
        writeln!(out, "\t  _   _   _   _   _   _   _ ")?;
        writeln!(out, "\t  1   2   3   4   5   6   7 ")?;

        if self.session.is_over() {
            writeln!(out, "Game Over!")?;
            match self.session.winner() {
                Some(seat) => writeln!(out, "{} is the winner!", seat.name())?,
                None => writeln!(out, "Game was a draw.")?,
            }
        }
        Ok(())
    }

    /// End of input counts as "no".
    fn ask_rematch(&mut self) -> Result<bool, AgentError> {
        loop {
            write!(self.output, "Would you like to play again? (yes/no): ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(false);
            }
            match line.trim().to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => {
                    writeln!(self.output, "Thanks for playing!")?;
                    return Ok(false);
                }
                _ => writeln!(self.output, "Please enter 'yes' or 'no'.")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MinimaxAgent;
    use crate::session::Seat;
    use std::io::Cursor;

    fn humans() -> Session {
        Session::new(Seat::human("Ada"), Seat::human("Grace"))
    }

    fn run(session: Session, input: &str) -> (Console<Cursor<Vec<u8>>, Vec<u8>>, String) {
        let mut console = Console::new(session, Cursor::new(input.as_bytes().to_vec()), Vec::new());
        console.run().unwrap();
        let text = String::from_utf8(console.output.clone()).unwrap();
        (console, text)
    }

    #[test]
    fn human_agent_retries_until_valid() {
        let mut input = Cursor::new(b"abc\n0\n8\n3\n".to_vec());
        let mut output = Vec::new();
        let column = HumanAgent::new(&mut input, &mut output)
            .select_move(&GameState::initial())
            .unwrap();
        assert_eq!(column, 2);

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Invalid input; please enter a number.").count(), 1);
        assert_eq!(text.matches("Invalid choice, try again.").count(), 2);
    }

    #[test]
    fn human_agent_reports_closed_input() {
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        let result = HumanAgent::new(&mut input, &mut output).select_move(&GameState::initial());
        assert!(matches!(result, Err(AgentError::InputClosed)));
    }

    #[test]
    fn vertical_win_is_announced_and_highlighted() {
        let (console, text) = run(humans(), "1\n2\n1\n2\n1\n2\n1\nno\n");
        assert!(text.contains("Ada is the winner!"));
        assert!(text.contains("| X | o |"));
        assert!(text.contains("Ada: 1 wins, Grace: 0 wins, 0 ties"));
        assert!(text.trim_end().ends_with("Thanks for playing!"));
        assert_eq!(console.session().scoreboard().games(), 1);
    }

    #[test]
    fn full_column_asks_again() {
        // Column 1 takes six pieces, the seventh attempt is rejected
        let input = "1\n1\n1\n1\n1\n1\n1\n2\n3\n2\n3\n2\n3\n2\nn\n";
        let (console, text) = run(humans(), input);
        assert!(text.contains("Invalid move: column is full."));
        assert_eq!(console.session().winner().map(Seat::name), Some("Ada"));
    }

    #[test]
    fn rematch_prompt_repeats_until_answered() {
        let input = "1\n2\n1\n2\n1\n2\n1\nmaybe\nyes\n2\n1\n2\n1\n2\n1\n2\nno\n";
        let (console, text) = run(humans(), input);
        assert!(text.contains("Please enter 'yes' or 'no'."));
        assert_eq!(console.session().scoreboard().wins, [2, 0]);
    }

    #[test]
    fn computers_play_without_input() {
        let session = Session::new(
            Seat::computer("One", MinimaxAgent::with_seed(2, 3)),
            Seat::computer("Two", MinimaxAgent::with_seed(2, 4)),
        );
        let (console, text) = run(session, "y\nn\n");
        assert_eq!(console.session().scoreboard().games(), 2);
        assert_eq!(text.matches("Game Over!").count(), 2);
    }

    #[test]
    fn configure_seats_reprompts_invalid_answers() {
        let mut input = Cursor::new(b"x\nh\n\nAda\ncomputer\nDeep\n9\nhard\n4\n".to_vec());
        let mut output = Vec::new();
        let [one, two] = configure_seats(&mut input, &mut output).unwrap();
        assert_eq!(one, PlayerConfig::human("Ada"));
        assert_eq!(two, PlayerConfig::computer("Deep", 4));
        assert_eq!(two.search_depth(), 5);

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Sorry, that's not a valid option. Please try again.").count(), 1);
        assert_eq!(text.matches("Name must not be empty.").count(), 1);
        assert_eq!(text.matches("Difficulty must be a number from 1 to 4.").count(), 2);
        assert!(text.contains("Configure Player 2: Human or Computer?"));
    }

    #[test]
    fn configure_seats_reports_closed_input() {
        let mut input = Cursor::new(b"c\nDeep\n".to_vec());
        let mut output = Vec::new();
        let result = configure_seats(&mut input, &mut output);
        assert!(matches!(result, Err(AgentError::InputClosed)));
    }

    #[test]
    fn configured_seats_play_a_session() {
        let mut input = Cursor::new(b"H\nAda\nC\nBot\n1\n".to_vec());
        let mut output = Vec::new();
        let [one, two] = configure_seats(&mut input, &mut output).unwrap();
        let mut config = crate::config::AppConfig::default();
        config.player_one = one;
        config.player_two = two;
        config.search.seed = Some(5);

        let session = Session::from_config(&config);
        assert!(!session.seats()[0].is_computer());
        assert_eq!(session.seats()[1].label(), "Bot (depth 2)");
    }
}
