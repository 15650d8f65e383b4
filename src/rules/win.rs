//! Win condition.
//!
//! A color has won when every corner pile is either full (height 4) or shows
//! that color on top. Evaluated on demand, never cached.

use crate::core::board::{Board, MAX_PILE_HEIGHT};
use crate::core::color::Color;
use crate::core::pile::Pile;

/// Check if a corner pile counts for `color`.
#[must_use]
pub fn corner_satisfied(pile: &Pile, color: Color) -> bool {
    pile.height() == MAX_PILE_HEIGHT || pile.top_color() == Some(color)
}

/// Check if `color` satisfies the corner condition on `board`.
///
/// Both colors can hold simultaneously (all four corners full); the engine
/// resolves that in favor of whoever's turn it is.
#[must_use]
pub fn has_won(board: &Board, color: Color) -> bool {
    board
        .corner_piles()
        .into_iter()
        .all(|pile| corner_satisfied(pile, color))
}
