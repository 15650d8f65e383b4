//! # mesa-checkers
//!
//! Rule engine for Mesa Checkers, a two-player stacking game on a 6x6 grid
//! of piles.
//!
//! ## The Game
//!
//! Each turn a player places one token of their color on a pile, then may
//! carry the top of that pile across the board one orthogonal step at a
//! time. A moved group must be entirely the mover's color and may only land
//! on a pile shorter than the height its lowest token starts from. A player
//! wins when every corner pile is full or shows their color.
//!
//! ## Design
//!
//! - `GameState` is a plain value owned by the caller. There is no global
//!   game instance.
//! - `MesaRules` is stateless. Every operation validates fully before it
//!   mutates, so a rejected request changes nothing and can be retried.
//! - Rendering and input handling are left to the driver.
//!
//! ## Example
//!
//! ```
//! use mesa_checkers::{GameState, MesaRules, Position, TurnPhase};
//!
//! let rules = MesaRules::new();
//! let mut state = GameState::default();
//!
//! rules.place_token(&mut state, Position::new(2, 2)).unwrap();
//! rules.move_tokens(&mut state, Position::new(2, 3), 1).unwrap();
//! assert_eq!(state.phase(), TurnPhase::TurnComplete);
//!
//! assert_eq!(rules.end_turn(&mut state).unwrap(), None);
//! assert_eq!(state.phase(), TurnPhase::AwaitingPlacement);
//! ```
//!
//! ## Modules
//!
//! - `core`: Tokens, piles, board, players, configuration, actions, state
//! - `rules`: Placement, moving, enumeration, turn lifecycle, win condition
//! - `error`: Error types

pub mod core;
pub mod rules;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    Action, Board, Color, Direction, GameConfig, GameState, Pile, Player, PlayerId, Position,
    Token, TurnPhase, ValidMove, BOARD_SIZE, MAX_PILE_HEIGHT,
};

pub use crate::rules::{GameResult, MesaRules, RulesEngine};

pub use crate::error::{BoardError, ConfigError, EngineError, PileError, RuleViolation, SnapshotError};
