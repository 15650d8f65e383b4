//! Core data model: tokens, piles, the board, players, state, actions.
//!
//! Nothing here enforces game rules beyond structure (bounds, pile
//! underflow). Legality lives in `rules`.

pub mod color;
pub mod pile;
pub mod board;
pub mod player;
pub mod config;
pub mod action;
pub mod state;

pub use color::{Color, Token};
pub use pile::Pile;
pub use board::{Board, Direction, Position, BOARD_SIZE, MAX_PILE_HEIGHT};
pub use player::{Player, PlayerId, PLAYER_COUNT};
pub use config::GameConfig;
pub use action::{Action, ValidMove};
pub use state::{GameState, TurnPhase};
