//! Coordinate-notation move representation.

use crate::{PromotionPiece, Square};
use std::fmt;

/// A move as entered by a player: source, destination and, for a pawn
/// reaching the last rank, an optional replacement choice.
///
/// This is a request, not a verified move. The rules crate decides whether
/// it is legal.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PromotionPiece>,
}

impl Move {
    /// Creates a plain move.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    /// Creates a move that carries a promotion choice.
    #[inline]
    pub const fn with_promotion(from: Square, to: Square, choice: PromotionPiece) -> Self {
        Move {
            from,
            to,
            promotion: Some(choice),
        }
    }

    /// Returns the coordinate notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        match self.promotion {
            Some(choice) => format!("{}{}{}", self.from, self.to, choice.to_char()),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// Parses a move from coordinate notation.
    pub fn from_uci(s: &str) -> Option<Self> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let promotion = match s.chars().nth(4) {
            Some(c) => Some(PromotionPiece::from_char(c)?),
            None => None,
        };
        Some(Move {
            from,
            to,
            promotion,
        })
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
