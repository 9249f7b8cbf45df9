use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use super::agent::Agent;
use super::heuristic::{evaluate, Score};
use crate::error::{AgentError, MoveError, SearchError};
use crate::game::{Board, GameState, Side};

/// Column chosen by the search together with its score for the mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub column: usize,
    pub score: Score,
}

/// Negamax value of `board` for `side`, searching `depth` plies.
///
/// Terminal positions and the depth horizon are scored with [`evaluate`].
/// A full board without a winner scores 0.
pub fn minimax(depth: u32, board: &Board, side: Side) -> Result<Score, MoveError> {
    if depth == 0 || board.is_terminal() {
        return Ok(evaluate(board, side));
    }

    let mut best: Option<Score> = None;
    for col in board.legal_columns() {
        let child = board.apply(col, side)?;
        let value = -minimax(depth - 1, &child, side.other())?;
        best = Some(best.map_or(value, |b| b.max(value)));
    }

    Ok(best.unwrap_or(0))
}

/// Score of every legal column for `side`, in ascending column order.
pub fn scored_moves(depth: u32, board: &Board, side: Side) -> Result<Vec<(usize, Score)>, SearchError> {
    if depth == 0 {
        return Err(SearchError::ZeroDepth);
    }

    let mut scores = Vec::with_capacity(crate::game::COLS);
    for col in board.legal_columns() {
        let child = board.apply(col, side)?;
        let score = -minimax(depth - 1, &child, side.other())?;
        trace!(column = col, score, "scored candidate");
        scores.push((col, score));
    }
    Ok(scores)
}

/// Pick the best column for `side`, breaking ties uniformly at random.
///
/// Fails with [`SearchError::NoLegalMoves`] on a full board and
/// [`SearchError::ZeroDepth`] when `depth` is 0.
pub fn optimal_move<R: Rng>(
    depth: u32,
    board: &Board,
    side: Side,
    rng: &mut R,
) -> Result<SearchResult, SearchError> {
    let scores = scored_moves(depth, board, side)?;
    let best = scores
        .iter()
        .map(|&(_, score)| score)
        .max()
        .ok_or(SearchError::NoLegalMoves)?;

    let tied: Vec<usize> = scores
        .iter()
        .filter(|&&(_, score)| score == best)
        .map(|&(col, _)| col)
        .collect();
    let column = tied[rng.random_range(0..tied.len())];

    debug!(%side, depth, column, score = best, ties = tied.len(), "selected move");
    Ok(SearchResult {
        column,
        score: best,
    })
}

/// Agent that plays the move chosen by [`optimal_move`].
pub struct MinimaxAgent {
    depth: u32,
    rng: StdRng,
}

impl MinimaxAgent {
    pub fn new(depth: u32) -> Self {
        MinimaxAgent {
            depth,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Agent with a reproducible tie-break sequence
    pub fn with_seed(depth: u32, seed: u64) -> Self {
        MinimaxAgent {
            depth,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }
}

impl Agent for MinimaxAgent {
    fn select_move(&mut self, state: &GameState) -> Result<usize, AgentError> {
        if state.is_terminal() {
            return Err(MoveError::GameOver.into());
        }
        let result = optimal_move(self.depth, state.board(), state.current_side(), &mut self.rng)?;
        Ok(result.column)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::heuristic::LOSS;
    use crate::game::{COLS, ROWS};

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn midgame() -> Board {
        board(
            "
            ......o
            ......x
            ...o..o
            ..xxo.x
            .xoxo.o
            oxxoxox
            ",
        )
    }

    // --- minimax ---

    #[test]
    fn depth_zero_is_evaluation() {
        for b in [Board::new(), midgame(), midgame().mirrored()] {
            for side in [Side::X, Side::O] {
                assert_eq!(minimax(0, &b, side).unwrap(), evaluate(&b, side));
            }
        }
    }

    #[test]
    fn terminal_board_is_evaluated_without_search() {
        let b = board(
            "
            .......
            .......
            .......
            .......
            ooo....
            xxxx...
            ",
        );
        assert_eq!(minimax(3, &b, Side::O).unwrap(), LOSS);
        assert_eq!(minimax(3, &b, Side::X).unwrap(), evaluate(&b, Side::X));
    }

    #[test]
    fn full_board_without_winner_scores_zero() {
        let b = board(
            "
            ooxxoox
            xxooxxo
            ooxxoox
            xxooxxo
            ooxxoox
            xxooxxo
            ",
        );
        assert!(!b.is_terminal());
        assert_eq!(minimax(2, &b, Side::X).unwrap(), 0);
        assert_eq!(minimax(5, &b, Side::O).unwrap(), 0);
    }

    #[test]
    fn one_ply_is_best_negated_reply() {
        let b = midgame();
        let expected = b
            .legal_columns()
            .map(|col| -evaluate(&b.apply(col, Side::X).unwrap(), Side::O))
            .max()
            .unwrap();
        assert_eq!(minimax(1, &b, Side::X).unwrap(), expected);
    }

    // --- optimal_move ---

    #[test]
    fn completes_horizontal_four() {
        let b = board(
            "
            .......
            .......
            .......
            .......
            .......
            xxx....
            ",
        );
        for depth in 1..=3 {
            let scores = scored_moves(depth, &b, Side::X).unwrap();
            let (_, winning) = scores.iter().find(|(col, _)| *col == 3).copied().unwrap();
            for &(col, score) in &scores {
                if col != 3 {
                    assert!(winning > score, "depth {depth}: column {col} scored {score}");
                }
            }
            let result = optimal_move(depth, &b, Side::X, &mut rng(depth as u64)).unwrap();
            assert_eq!(result.column, 3);
            assert_eq!(result.score, -LOSS);
        }
    }

    #[test]
    fn blocks_open_three() {
        // o holds row 1 columns 2-4; (1,1) is playable now, (1,5) is not yet
        let b = board(
            "
            .......
            .......
            .......
            .......
            ..ooo..
            .xxox..
            ",
        );
        let result = optimal_move(2, &b, Side::X, &mut rng(7)).unwrap();
        assert_eq!(result.column, 1);
        assert!(result.score > LOSS);

        let scores = scored_moves(2, &b, Side::X).unwrap();
        for &(col, score) in &scores {
            if col != 1 {
                assert_eq!(score, LOSS, "column {col} should lose");
            }
        }
    }

    #[test]
    fn never_returns_illegal_column() {
        let b = midgame();
        for seed in 0..20 {
            let result = optimal_move(2, &b, Side::X, &mut rng(seed)).unwrap();
            assert!(b.is_legal(result.column), "column {} is full", result.column);
        }
    }

    #[test]
    fn tie_break_picks_among_best_columns() {
        let b = Board::new();
        let scores = scored_moves(1, &b, Side::X).unwrap();
        let best = scores.iter().map(|&(_, s)| s).max().unwrap();
        let tied: Vec<usize> = scores.iter().filter(|&&(_, s)| s == best).map(|&(c, _)| c).collect();
        assert_eq!(tied.len(), COLS);

        let mut seen = [false; COLS];
        for seed in 0..200 {
            let result = optimal_move(1, &b, Side::X, &mut rng(seed)).unwrap();
            assert!(tied.contains(&result.column));
            assert_eq!(result.score, best);
            seen[result.column] = true;
        }
        assert!(seen.iter().all(|&s| s), "every tied column should be chosen: {seen:?}");
    }

    #[test]
    fn same_seed_same_choice() {
        let b = Board::new();
        let a = optimal_move(2, &b, Side::O, &mut rng(11)).unwrap();
        let c = optimal_move(2, &b, Side::O, &mut rng(11)).unwrap();
        assert_eq!(a, c);
    }

    #[test]
    fn mirrored_board_mirrors_scores() {
        let b = midgame();
        let m = b.mirrored();
        let original = scored_moves(2, &b, Side::X).unwrap();
        let mirrored = scored_moves(2, &m, Side::X).unwrap();
        assert_eq!(original.len(), mirrored.len());
        for &(col, score) in &original {
            assert!(
                mirrored.contains(&(COLS - 1 - col, score)),
                "column {col} -> {} should score {score}",
                COLS - 1 - col
            );
        }

        let win = board(
            "
            .......
            .......
            .......
            .......
            .......
            xxx....
            ",
        );
        let left = optimal_move(2, &win, Side::X, &mut rng(1)).unwrap();
        let right = optimal_move(2, &win.mirrored(), Side::X, &mut rng(1)).unwrap();
        assert_eq!(left.column, COLS - 1 - right.column);
        assert_eq!(left.score, right.score);
    }

    #[test]
    fn full_board_is_a_precondition_error() {
        let mut b = Board::new();
        for col in 0..COLS {
            for row in 0..ROWS {
                let side = if (row + col / 2) % 2 == 0 { Side::X } else { Side::O };
                b.drop_piece(col, side).unwrap();
            }
        }
        assert_eq!(
            optimal_move(2, &b, Side::X, &mut rng(0)),
            Err(SearchError::NoLegalMoves)
        );
    }

    #[test]
    fn zero_depth_is_rejected() {
        assert_eq!(
            optimal_move(0, &Board::new(), Side::X, &mut rng(0)),
            Err(SearchError::ZeroDepth)
        );
    }

    // --- agent ---

    #[test]
    fn agent_selects_legal_action() {
        let mut agent = MinimaxAgent::new(3);
        let state = GameState::initial();
        let legal = state.legal_moves();
        let action = agent.select_move(&state).unwrap();
        assert!(legal.contains(&action), "Action {action} is not legal");
    }

    #[test]
    fn agent_takes_winning_move() {
        let mut state = GameState::initial();
        // X col0, O col0, X col1, O col1, X col2, O col2 → X to move, col 3 wins
        for col in 0..3 {
            state = state.apply_move(col).unwrap();
            state = state.apply_move(col).unwrap();
        }
        let mut agent = MinimaxAgent::with_seed(2, 5);
        assert_eq!(agent.select_move(&state).unwrap(), 3);
    }

    #[test]
    fn agent_refuses_finished_game() {
        let mut state = GameState::initial();
        for col in 0..3 {
            state = state.apply_move(col).unwrap();
            state = state.apply_move(col).unwrap();
        }
        state = state.apply_move(3).unwrap();
        let mut agent = MinimaxAgent::with_seed(2, 5);
        assert!(matches!(
            agent.select_move(&state),
            Err(AgentError::Move(MoveError::GameOver))
        ));
    }
}
