//! Rules engine trait.
//!
//! The direct operations on `MesaRules` (`place_token`, `move_tokens`, ...)
//! are the primary interface. `RulesEngine` wraps them in a uniform
//! enumerate/apply/terminal loop so a generic driver can play the game
//! without knowing its turn structure.

use crate::core::action::Action;
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::error::EngineError;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub winner: PlayerId,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == player
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Every returned action must succeed in `apply_action`
/// - `apply_action`: Must leave the state untouched when it returns `Err`
/// - `is_terminal`: Return None if the game continues
pub trait RulesEngine {
    /// Enumerate every action the current player may take.
    ///
    /// Empty once the game is over, or if the player is stuck.
    fn legal_actions(&self, state: &GameState) -> Vec<Action>;

    /// Apply an action for the current player.
    fn apply_action(&self, state: &mut GameState, action: Action) -> Result<(), EngineError>;

    /// Check if the game is over.
    ///
    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Check if `action` is currently legal.
    fn is_legal(&self, state: &GameState, action: Action) -> bool {
        self.legal_actions(state).contains(&action)
    }
}
