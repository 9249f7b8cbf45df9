use std::path::PathBuf;

/// Errors raised when a piece cannot be placed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is outside the board")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("game is already over")]
    GameOver,
}

/// Errors returned by the search engine when its preconditions do not hold.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("no legal moves: the board is full")]
    NoLegalMoves,

    #[error("search depth must be at least 1")]
    ZeroDepth,

    #[error("illegal move during search: {0}")]
    IllegalMove(#[from] MoveError),
}

/// Errors an agent can hit while producing a move.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    #[error("move rejected: {0}")]
    Move(#[from] MoveError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input closed before a move was entered")]
    InputClosed,
}

/// Errors that can occur when parsing a board from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBoardError {
    #[error("expected 6 rows, found {0}")]
    RowCount(usize),

    #[error("row {row} has {width} cells, expected 7")]
    RowWidth { row: usize, width: usize },

    #[error("invalid cell {ch:?} at row {row}, column {col}")]
    InvalidCell { ch: char, row: usize, col: usize },

    #[error("floating piece at row {row}, column {col}")]
    FloatingPiece { row: usize, col: usize },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
