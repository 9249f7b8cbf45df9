use crate::game::{Board, Side, WIN_LENGTH};

/// Search score, from the perspective of the side being evaluated.
pub type Score = i64;

/// Value of a position in which the opponent has already connected four.
/// Finite so that negating it stays in range, and far below any streak sum.
pub const LOSS: Score = -1_000_000_000;

/// Streak lengths that contribute to the score, weighted 10^length.
const SCORED_LENGTHS: [u32; 3] = [2, 3, 4];

/// Score `board` for `side`.
///
/// Returns [`LOSS`] if the opponent has four in a row. Otherwise every
/// streak window of length 2, 3 and 4 is worth 100, 1000 and 10000 points
/// respectively, and the opponent's total is subtracted from `side`'s.
pub fn evaluate(board: &Board, side: Side) -> Score {
    let opponent = side.other();
    if board.has_streak(opponent, WIN_LENGTH) {
        return LOSS;
    }
    streak_score(board, side) - streak_score(board, opponent)
}

fn streak_score(board: &Board, side: Side) -> Score {
    SCORED_LENGTHS
        .iter()
        .map(|&k| board.count_streaks(side, k as usize) as Score * 10_i64.pow(k))
        .sum()
}
