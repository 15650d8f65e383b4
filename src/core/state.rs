//! Game state: the board plus turn bookkeeping.
//!
//! ## Turn cursor
//!
//! - `active_pile`: the pile the current player moves from. `None` until the
//!   turn's placement, and again after `end_turn`.
//! - `turn_complete`: set once no further placement or move is accepted.
//! - `winner`: set when the game ends; every mutation is refused afterwards.
//!
//! `phase()` folds these into a `TurnPhase`.
//!
//! Only the rules engine mutates a `GameState`; drivers read it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::board::{Board, Position};
use super::color::Color;
use super::config::GameConfig;
use super::player::{Player, PlayerId, PLAYER_COUNT};
use crate::error::ConfigError;
use crate::rules::win;

/// Where the current turn stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// No token placed yet this turn.
    AwaitingPlacement,
    /// A pile is active and further moves are accepted.
    AwaitingMove,
    /// Nothing more is accepted until `end_turn`.
    TurnComplete,
    /// The game is over.
    Won(PlayerId),
}

/// Full game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    players: [Player; PLAYER_COUNT],
    current: PlayerId,
    active_pile: Option<Position>,
    turn_complete: bool,
    winner: Option<PlayerId>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::build(Board::new(), Color::White, Color::Black)
    }
}

impl GameState {
    /// Create a game on an empty board.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_board(config, Board::new())
    }

    /// Create a game starting from an arbitrary board.
    ///
    /// The first player's turn starts immediately, so if `board` already
    /// satisfies their corners the game is returned won.
    pub fn with_board(config: GameConfig, board: Board) -> Result<Self, ConfigError> {
        config.validate()?;
        let first = config.first_player;
        let second = config
            .second_player()
            .ok_or(ConfigError::InvalidFirstPlayer(first))?;
        let mut state = Self::build(board, first, second);
        if state.has_won(PlayerId::FIRST) {
            debug!(player = %PlayerId::FIRST, "corners already held at game start");
            state.declare_winner(PlayerId::FIRST);
        }
        Ok(state)
    }

    fn build(board: Board, first: Color, second: Color) -> Self {
        Self {
            board,
            players: [
                Player::new(PlayerId::FIRST, first),
                Player::new(PlayerId::SECOND, second),
            ],
            current: PlayerId::FIRST,
            active_pile: None,
            turn_complete: false,
            winner: None,
        }
    }

    // === Read Accessors ===

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get a player by seat.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// Both players in turn order.
    #[must_use]
    pub fn players(&self) -> &[Player; PLAYER_COUNT] {
        &self.players
    }

    #[must_use]
    pub fn current_player_id(&self) -> PlayerId {
        self.current
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    /// Color of the player whose turn it is.
    #[must_use]
    pub fn current_color(&self) -> Color {
        self.current_player().color()
    }

    /// The pile the current player must continue from, if any.
    #[must_use]
    pub fn active_pile(&self) -> Option<Position> {
        self.active_pile
    }

    #[must_use]
    pub fn is_turn_complete(&self) -> bool {
        self.turn_complete
    }

    /// The winner, once the game is over.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Current point in the turn lifecycle.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        match (self.winner, self.turn_complete, self.active_pile) {
            (Some(winner), _, _) => TurnPhase::Won(winner),
            (None, true, _) => TurnPhase::TurnComplete,
            (None, false, Some(_)) => TurnPhase::AwaitingMove,
            (None, false, None) => TurnPhase::AwaitingPlacement,
        }
    }

    /// Check if `player` satisfies the corner condition right now.
    #[must_use]
    pub fn has_won(&self, player: PlayerId) -> bool {
        win::has_won(&self.board, self.player(player).color())
    }

    // === Engine Mutation ===

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub(crate) fn set_active_pile(&mut self, pos: Position) {
        self.active_pile = Some(pos);
    }

    pub(crate) fn complete_turn(&mut self) {
        self.turn_complete = true;
    }

    pub(crate) fn declare_winner(&mut self, player: PlayerId) {
        self.winner = Some(player);
    }

    /// Hand play to the other player and clear the turn cursor.
    pub(crate) fn next_turn(&mut self) {
        self.current = self.current.other();
        self.active_pile = None;
        self.turn_complete = false;
    }
}
