//! The 6x6 grid of piles.
//!
//! ## Addressing
//!
//! Cells are addressed by `Position { row, col }`, both in `0..BOARD_SIZE`.
//! Row 0 is the top row. Lookups outside the grid fail with
//! `BoardError::OutOfBounds` rather than panicking, since positions usually
//! arrive straight from player input.
//!
//! ## Corners
//!
//! The four corner cells decide the game. `Board::CORNERS` lists them in the
//! fixed order top-left, top-right, bottom-left, bottom-right.

use serde::{Deserialize, Serialize};

use super::pile::Pile;
use crate::error::{BoardError, SnapshotError};

/// Width and height of the board.
pub const BOARD_SIZE: usize = 6;

/// Tallest pile the rules allow.
pub const MAX_PILE_HEIGHT: usize = 4;

/// A cell on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a position. Not bounds-checked.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Check if this position lies on the board.
    #[must_use]
    pub const fn in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Check if two positions are one orthogonal step apart.
    ///
    /// Symmetric and irreflexive.
    #[must_use]
    pub fn is_adjacent(self, other: Position) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }

    /// Step one cell in `direction`, if that stays on the board.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Position> {
        let (dr, dc) = direction.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let next = Position::new(row, col);
        next.in_bounds().then_some(next)
    }

    /// Iterate over every cell, row-major.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Orthogonal direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// All directions in move-enumeration order.
    pub const ALL: [Direction; 4] = [Direction::Right, Direction::Down, Direction::Left, Direction::Up];

    /// (row, col) offset of one step.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Up => (-1, 0),
        }
    }
}

/// Square grid of piles, stored row-major.
///
/// Serialized as the flat row-major pile list. Deserializing a list of any
/// length other than `BOARD_SIZE * BOARD_SIZE` fails.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Pile>", into = "Vec<Pile>")]
pub struct Board {
    piles: Vec<Pile>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<Pile>> for Board {
    type Error = SnapshotError;

    fn try_from(piles: Vec<Pile>) -> Result<Self, Self::Error> {
        let expected = BOARD_SIZE * BOARD_SIZE;
        if piles.len() != expected {
            return Err(SnapshotError::WrongPileCount {
                found: piles.len(),
                expected,
            });
        }
        Ok(Self { piles })
    }
}

impl From<Board> for Vec<Pile> {
    fn from(board: Board) -> Self {
        board.piles
    }
}

impl Board {
    /// Corner cells in fixed order.
    pub const CORNERS: [Position; 4] = [
        Position::new(0, 0),
        Position::new(0, BOARD_SIZE - 1),
        Position::new(BOARD_SIZE - 1, 0),
        Position::new(BOARD_SIZE - 1, BOARD_SIZE - 1),
    ];

    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            piles: vec![Pile::new(); BOARD_SIZE * BOARD_SIZE],
        }
    }

    /// Side length of the board.
    #[must_use]
    pub const fn size(&self) -> usize {
        BOARD_SIZE
    }

    fn index(pos: Position) -> Result<usize, BoardError> {
        if pos.in_bounds() {
            Ok(pos.row * BOARD_SIZE + pos.col)
        } else {
            Err(BoardError::OutOfBounds {
                row: pos.row,
                col: pos.col,
            })
        }
    }

    /// Get the pile at `pos`.
    pub fn pile(&self, pos: Position) -> Result<&Pile, BoardError> {
        Ok(&self.piles[Self::index(pos)?])
    }

    /// Get the pile at (`row`, `col`).
    pub fn get_pile(&self, row: usize, col: usize) -> Result<&Pile, BoardError> {
        self.pile(Position::new(row, col))
    }

    /// Mutable pile access is reserved for the rules engine.
    pub(crate) fn pile_mut(&mut self, pos: Position) -> Result<&mut Pile, BoardError> {
        Ok(&mut self.piles[Self::index(pos)?])
    }

    /// Replace the pile at `pos`, returning the old one.
    ///
    /// For setting up positions; no height cap is enforced here.
    pub fn set_pile(&mut self, pos: Position, pile: Pile) -> Result<Pile, BoardError> {
        let index = Self::index(pos)?;
        Ok(std::mem::replace(&mut self.piles[index], pile))
    }

    /// The four corner piles, in `CORNERS` order.
    #[must_use]
    pub fn corner_piles(&self) -> [&Pile; 4] {
        Self::CORNERS.map(|pos| &self.piles[pos.row * BOARD_SIZE + pos.col])
    }

    /// Check if two positions are orthogonally adjacent.
    #[must_use]
    pub fn orthogonally_adjacent(&self, a: Position, b: Position) -> bool {
        a.is_adjacent(b)
    }

    /// In-bounds orthogonal neighbors of `pos`: right, down, left, up.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> {
        Direction::ALL.into_iter().filter_map(move |d| pos.step(d))
    }

    /// Iterate over (position, pile) pairs, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Pile)> {
        Position::all().zip(self.piles.iter())
    }

    /// Total number of tokens on the board.
    #[must_use]
    pub fn total_tokens(&self) -> usize {
        self.piles.iter().map(Pile::height).sum()
    }
}
