use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMoveReason {
    GameOver,
    WrongTurn,
    CellOccupied,
    EmptyMark,
    NoBotOpponent,
}

impl fmt::Display for InvalidMoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            InvalidMoveReason::GameOver => "game is already over",
            InvalidMoveReason::WrongTurn => "not this mark's turn",
            InvalidMoveReason::CellOccupied => "cell is already marked",
            InvalidMoveReason::EmptyMark => "cannot place an empty mark",
            InvalidMoveReason::NoBotOpponent => "session has no bot opponent",
        };
        write!(f, "{}", text)
    }
}

/// Every variant is recoverable; the operation that returned it changed nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid move: {0}")]
    InvalidMove(InvalidMoveReason),

    #[error("no move to undo or redo")]
    EmptyHistory,

    #[error("cell index {index} is outside a board of {cell_count} cells")]
    OutOfRange { index: usize, cell_count: usize },

    #[error("search requires at least one empty cell")]
    SearchPrecondition,

    #[error("search exceeded its budget after {nodes} nodes")]
    SearchTimeout { nodes: u64 },

    #[error("grid size {0} is not supported")]
    InvalidGridSize(usize),

    #[error("invalid session settings: {0}")]
    InvalidSettings(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(String),

    #[error("failed to deserialize config: {0}")]
    Deserialize(String),

    #[error("config validation error: {0}")]
    Validation(String),
}
