//! Error types for the board, the engine, and configuration.
//!
//! Three classes of failure exist:
//! - `BoardError`: a position outside the grid. The request itself is malformed.
//! - `RuleViolation`: a well-formed request the rules forbid. Never mutates state,
//!   so the caller can retry with corrected input.
//! - `PileError`: removing more tokens than a pile holds. The engine checks
//!   heights before every removal, so seeing this from the engine is a bug.
//!
//! `SnapshotError` rejects serialized state whose shape the engine cannot index.

use crate::core::color::Color;

/// Structural pile errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PileError {
    #[error("cannot remove {requested} tokens from a pile of height {height}")]
    Underflow { requested: usize, height: usize },
}

/// Board addressing errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("position ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },
}

/// A failed legality precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    #[error("the game is already over")]
    GameOver,

    #[error("the turn is already complete")]
    TurnComplete,

    #[error("the turn is not complete yet")]
    TurnNotComplete,

    #[error("a token was already placed this turn")]
    AlreadyPlaced,

    #[error("the pile is already at maximum height")]
    PileFull,

    #[error("the pile is topped by another color")]
    OpponentOnTop,

    #[error("no active pile to move from")]
    NoActivePile,

    #[error("target is not orthogonally adjacent to the active pile")]
    NotAdjacent,

    #[error("must move at least one token")]
    ZeroCount,

    #[error("the active pile does not hold that many tokens")]
    NotEnoughTokens,

    #[error("the selected tokens are not all the current player's color")]
    MixedColors,

    #[error("the target pile is too tall for the moved group")]
    WouldDigIn,
}

/// Errors returned by rule engine operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    OutOfBounds(#[from] BoardError),

    #[error("rule violation: {0}")]
    Rule(#[from] RuleViolation),
}

impl EngineError {
    /// Get the rule violation, if this is one.
    #[must_use]
    pub fn violation(&self) -> Option<RuleViolation> {
        match self {
            EngineError::Rule(v) => Some(*v),
            EngineError::OutOfBounds(_) => None,
        }
    }
}

/// Errors from decoding a serialized board or seat.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("seat {0} does not exist")]
    InvalidSeat(u8),

    #[error("board holds {found} piles, expected {expected}")]
    WrongPileCount { found: usize, expected: usize },
}

/// Errors from validating a `GameConfig`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} cannot be a player color")]
    InvalidFirstPlayer(Color),
}
