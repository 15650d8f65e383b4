//! Player identification.
//!
//! ## PlayerId
//!
//! Seat index of one of the two players. Seat 0 moves first.
//!
//! ## Player
//!
//! A seat plus the color that seat plays. Both players are created once at
//! game start with complementary colors and never change.

use serde::{Deserialize, Serialize};

use super::color::Color;
use crate::error::SnapshotError;

/// Number of players in a game.
pub const PLAYER_COUNT: usize = 2;

/// Player seat: 0 or 1.
///
/// Serialized as the bare seat index; any other number fails to deserialize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

impl PlayerId {
    /// The player who moves first.
    pub const FIRST: PlayerId = PlayerId(0);
    /// The player who moves second.
    pub const SECOND: PlayerId = PlayerId(1);

    /// Create a player ID from a seat index.
    ///
    /// Returns `None` unless `index` is 0 or 1.
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < PLAYER_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Get the seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    #[must_use]
    pub const fn other(self) -> Self {
        Self(1 - self.0)
    }

    /// Both seats in turn order.
    ///
    /// ```
    /// use mesa_checkers::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all().collect();
    /// assert_eq!(players, vec![PlayerId::FIRST, PlayerId::SECOND]);
    /// ```
    pub fn all() -> impl Iterator<Item = PlayerId> {
        [Self::FIRST, Self::SECOND].into_iter()
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = SnapshotError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index).ok_or(SnapshotError::InvalidSeat(index))
    }
}

impl From<PlayerId> for u8 {
    fn from(id: PlayerId) -> Self {
        id.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A player: seat and color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    color: Color,
}

impl Player {
    pub(crate) const fn new(id: PlayerId, color: Color) -> Self {
        Self { id, color }
    }

    #[must_use]
    pub const fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }
}
