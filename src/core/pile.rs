//! A stack of tokens at one board cell.
//!
//! Tokens are stored bottom-to-top. The pile itself does not enforce the
//! game's height cap; the rules engine does that before pushing.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::color::{Color, Token};
use crate::error::PileError;

/// Ordered stack of tokens, bottom first.
///
/// SmallVec keeps a legal pile (at most 4 tokens) off the heap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pile {
    tokens: SmallVec<[Token; 4]>,
}

impl Pile {
    /// Create an empty pile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pile from tokens listed bottom-to-top.
    #[must_use]
    pub fn from_tokens(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }

    /// Create a pile from colors listed bottom-to-top.
    #[must_use]
    pub fn from_colors(colors: &[Color]) -> Self {
        Self::from_tokens(colors.iter().copied().map(Token::new))
    }

    /// Number of tokens in the pile.
    #[must_use]
    pub fn height(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens bottom-to-top.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The topmost token, if any.
    #[must_use]
    pub fn top(&self) -> Option<&Token> {
        self.tokens.last()
    }

    /// Color of the topmost token, if any.
    #[must_use]
    pub fn top_color(&self) -> Option<Color> {
        self.top().map(|t| t.color)
    }

    /// Length of the run of `color` tokens counted down from the top.
    #[must_use]
    pub fn consecutive_from_top(&self, color: Color) -> usize {
        self.tokens
            .iter()
            .rev()
            .take_while(|t| t.color == color)
            .count()
    }

    /// Push a token onto the top.
    pub fn add_token(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Pop `count` tokens off the top.
    ///
    /// The removed group keeps its order: the former top token is last.
    pub fn remove_tokens(&mut self, count: usize) -> Result<SmallVec<[Token; 4]>, PileError> {
        let height = self.height();
        if count > height {
            return Err(PileError::Underflow {
                requested: count,
                height,
            });
        }
        Ok(self.tokens.drain(height - count..).collect())
    }
}
