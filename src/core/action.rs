//! Action representation.
//!
//! A turn is a sequence of actions:
//! - `Place`: put one token of your color on a pile. Starts the turn.
//! - `Move`: carry the top `count` tokens of the active pile one step.
//!   May repeat while the moved group leaves your color showing behind it.
//! - `FinishTurn`: stop moving (voluntarily, or because nothing is legal).
//! - `EndTurn`: hand over to the other player once the turn is complete.

use serde::{Deserialize, Serialize};

use super::board::Position;

/// A single step of a turn.
///
/// ## Example
///
/// ```
/// use mesa_checkers::core::{Action, Position};
///
/// let place = Action::Place(Position::new(2, 2));
/// let hop = Action::Move { to: Position::new(2, 3), count: 1 };
///
/// assert!(place.is_mutating_board());
/// assert!(hop.is_mutating_board());
/// assert!(!Action::EndTurn.is_mutating_board());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Place a token of the current player's color.
    Place(Position),
    /// Move the top `count` tokens of the active pile to `to`.
    Move { to: Position, count: usize },
    /// Mark the current turn complete without moving further.
    FinishTurn,
    /// Pass play to the other player.
    EndTurn,
}

impl Action {
    /// Check if this action changes pile contents.
    #[must_use]
    pub const fn is_mutating_board(&self) -> bool {
        matches!(self, Action::Place(_) | Action::Move { .. })
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Place(pos) => write!(f, "place at {pos}"),
            Action::Move { to, count } => write!(f, "move {count} to {to}"),
            Action::FinishTurn => f.write_str("finish turn"),
            Action::EndTurn => f.write_str("end turn"),
        }
    }
}

/// A legal move target from the active pile.
///
/// Every count in `1..=max_count` is also legal for `target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidMove {
    pub target: Position,
    pub max_count: usize,
}

impl ValidMove {
    #[must_use]
    pub const fn new(target: Position, max_count: usize) -> Self {
        Self { target, max_count }
    }

    /// Expand into one `Action::Move` per legal count.
    pub fn actions(&self) -> impl Iterator<Item = Action> {
        let to = self.target;
        (1..=self.max_count).map(move |count| Action::Move { to, count })
    }
}

impl From<ValidMove> for (usize, usize, usize) {
    fn from(m: ValidMove) -> Self {
        (m.target.row, m.target.col, m.max_count)
    }
}
