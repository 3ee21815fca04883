//! Piece kinds and promotion choices.

use crate::Color;
use std::fmt;

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Returns the FEN character for this kind with the given color.
    pub const fn to_fen_char(self, color: Color) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a FEN character into a kind and color.
    pub const fn from_fen_char(c: char) -> Option<(PieceKind, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((kind, color))
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// The kinds a pawn may be replaced by on the last rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionPiece {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromotionPiece {
    /// All choices, in the order they are usually offered.
    pub const ALL: [PromotionPiece; 4] = [
        PromotionPiece::Queen,
        PromotionPiece::Rook,
        PromotionPiece::Bishop,
        PromotionPiece::Knight,
    ];

    /// Returns the piece kind this choice creates.
    #[inline]
    pub const fn kind(self) -> PieceKind {
        match self {
            PromotionPiece::Queen => PieceKind::Queen,
            PromotionPiece::Rook => PieceKind::Rook,
            PromotionPiece::Bishop => PieceKind::Bishop,
            PromotionPiece::Knight => PieceKind::Knight,
        }
    }

    /// Parses a promotion letter (`q`, `r`, `b`, `n`, either case).
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'q' => Some(PromotionPiece::Queen),
            'r' => Some(PromotionPiece::Rook),
            'b' => Some(PromotionPiece::Bishop),
            'n' => Some(PromotionPiece::Knight),
            _ => None,
        }
    }

    /// Returns the lowercase promotion letter.
    pub const fn to_char(self) -> char {
        match self {
            PromotionPiece::Queen => 'q',
            PromotionPiece::Rook => 'r',
            PromotionPiece::Bishop => 'b',
            PromotionPiece::Knight => 'n',
        }
    }
}

impl From<PromotionPiece> for PieceKind {
    fn from(choice: PromotionPiece) -> Self {
        choice.kind()
    }
}

impl fmt::Display for PromotionPiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_to_fen() {
        assert_eq!(PieceKind::Pawn.to_fen_char(Color::White), 'P');
        assert_eq!(PieceKind::Pawn.to_fen_char(Color::Black), 'p');
        assert_eq!(PieceKind::King.to_fen_char(Color::White), 'K');
        assert_eq!(PieceKind::Knight.to_fen_char(Color::Black), 'n');
    }

    #[test]
    fn kind_from_fen() {
        assert_eq!(
            PieceKind::from_fen_char('P'),
            Some((PieceKind::Pawn, Color::White))
        );
        assert_eq!(
            PieceKind::from_fen_char('q'),
            Some((PieceKind::Queen, Color::Black))
        );
        assert_eq!(PieceKind::from_fen_char('x'), None);
    }

    #[test]
    fn promotion_letters() {
        for choice in PromotionPiece::ALL {
            assert_eq!(PromotionPiece::from_char(choice.to_char()), Some(choice));
        }
        assert_eq!(PromotionPiece::from_char('K'), None);
        assert_eq!(PromotionPiece::from_char('p'), None);
    }

    #[test]
    fn promotion_never_yields_pawn_or_king() {
        for choice in PromotionPiece::ALL {
            let kind: PieceKind = choice.into();
            assert_ne!(kind, PieceKind::Pawn);
            assert_ne!(kind, PieceKind::King);
        }
    }
}
