//! Token colors.
//!
//! Two colors belong to the players. The third, `Purple`, is a marker color
//! that no player owns; it can appear on a board built by hand but is never
//! placed by the engine.

use serde::{Deserialize, Serialize};

/// Color of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
    /// Marker color, never owned by a player.
    Purple,
}

impl Color {
    /// Both player colors, in seating order for a White-first game.
    pub const PLAYABLE: [Color; 2] = [Color::White, Color::Black];

    /// Check if a player can own this color.
    #[must_use]
    pub const fn is_playable(self) -> bool {
        matches!(self, Color::White | Color::Black)
    }

    /// Get the opposing player color.
    ///
    /// Returns `None` for the marker color.
    #[must_use]
    pub const fn complement(self) -> Option<Color> {
        match self {
            Color::White => Some(Color::Black),
            Color::Black => Some(Color::White),
            Color::Purple => None,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::White => "White",
            Color::Black => "Black",
            Color::Purple => "Purple",
        };
        f.write_str(name)
    }
}

/// A single token ("rock") sitting in a pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub color: Color,
}

impl Token {
    /// Create a token of the given color.
    #[must_use]
    pub const fn new(color: Color) -> Self {
        Self { color }
    }
}

impl From<Color> for Token {
    fn from(color: Color) -> Self {
        Self::new(color)
    }
}
