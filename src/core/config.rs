//! Game configuration.
//!
//! The board size and the height cap are fixed rules, not settings. The only
//! choice a game makes at startup is which color moves first; the second
//! player always gets the complement.

use serde::{Deserialize, Serialize};

use super::color::Color;
use crate::error::ConfigError;

/// Startup configuration for a game.
///
/// ```
/// use mesa_checkers::core::{Color, GameConfig};
///
/// let config = GameConfig::default().with_first_player(Color::Black);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.second_player(), Some(Color::White));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Color of the player who moves first.
    pub first_player: Color,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            first_player: Color::White,
        }
    }
}

impl GameConfig {
    /// Set the first player's color.
    #[must_use]
    pub fn with_first_player(mut self, color: Color) -> Self {
        self.first_player = color;
        self
    }

    /// Color of the player who moves second, if the config is valid.
    #[must_use]
    pub fn second_player(&self) -> Option<Color> {
        self.first_player.complement()
    }

    /// Check that the configured color can be played.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.first_player.is_playable() {
            Ok(())
        } else {
            Err(ConfigError::InvalidFirstPlayer(self.first_player))
        }
    }
}
