//! Rules: legality, mutation, move enumeration, and the win condition.
//!
//! - `MesaRules` validates and applies placements, moves, and turn changes
//! - `RulesEngine` exposes the same rules as an enumerate/apply loop
//! - `win` evaluates the corner condition

pub mod engine;
pub mod controller;
pub mod win;

pub use engine::{GameResult, RulesEngine};
pub use controller::MesaRules;
pub use win::has_won;
