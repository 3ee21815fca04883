//! FEN (Forsyth-Edwards Notation) parsing for board setup.
//!
//! Only the fields needed to set up a live game are interpreted: piece
//! placement, side to move, castling availability and the en passant square.
//! The two clock fields are optional; when present they must be numbers, but
//! their values are not kept.

use crate::square::BOARD_SIZE;
use crate::{Color, PieceKind, PlacedPiece, PlacementPolicy, Square};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 4 to 6 fields, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling availability: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// Which castles each side may still perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingAvailability {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingAvailability {
    pub const ALL: CastlingAvailability = CastlingAvailability {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    /// Returns true if `color` may castle toward the h-file.
    pub const fn kingside(self, color: Color) -> bool {
        match color {
            Color::White => self.white_kingside,
            Color::Black => self.black_kingside,
        }
    }

    /// Returns true if `color` may castle toward the a-file.
    pub const fn queenside(self, color: Color) -> bool {
        match color {
            Color::White => self.white_queenside,
            Color::Black => self.black_queenside,
        }
    }

    fn parse(field: &str) -> Result<Self, FenError> {
        let mut rights = CastlingAvailability::default();
        if field == "-" {
            return Ok(rights);
        }
        for c in field.chars() {
            match c {
                'K' => rights.white_kingside = true,
                'Q' => rights.white_queenside = true,
                'k' => rights.black_kingside = true,
                'q' => rights.black_queenside = true,
                _ => {
                    return Err(FenError::InvalidCastlingRights(format!(
                        "invalid character '{}'",
                        c
                    )))
                }
            }
        }
        Ok(rights)
    }
}

/// A parsed FEN record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    /// Every piece on the board, rank 8 first, a-file first within a rank.
    pub pieces: Vec<PlacedPiece>,
    /// The side to move.
    pub side_to_move: Color,
    /// Castling availability.
    pub castling: CastlingAvailability,
    /// Square a pawn just skipped over with a double advance, if any.
    pub en_passant: Option<Square>,
}

impl Fen {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if !(4..=6).contains(&parts.len()) {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let pieces = Self::parse_piece_placement(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = CastlingAvailability::parse(parts[2])?;
        let en_passant = Self::parse_en_passant(parts[3])?;

        if let Some(field) = parts.get(4) {
            if field.parse::<u32>().is_err() {
                return Err(FenError::InvalidHalfmoveClock(field.to_string()));
            }
        }
        if let Some(field) = parts.get(5) {
            if field.parse::<u32>().is_err() {
                return Err(FenError::InvalidFullmoveNumber(field.to_string()));
            }
        }

        Ok(Fen {
            pieces,
            side_to_move,
            castling,
            en_passant,
        })
    }

    fn parse_piece_placement(placement: &str) -> Result<Vec<PlacedPiece>, FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != BOARD_SIZE as usize {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut pieces = Vec::new();
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = BOARD_SIZE - 1 - i as i8;
            let mut file: u32 = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file += skip;
                } else if let Some((kind, color)) = PieceKind::from_fen_char(c) {
                    if file < BOARD_SIZE as u32 {
                        pieces.push(PlacedPiece::new(kind, color, Square::new(file as i8, rank)));
                    }
                    file += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        rank + 1
                    )));
                }
            }
            if file != BOARD_SIZE as u32 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} does not describe exactly 8 squares",
                    rank + 1
                )));
            }
        }

        Ok(pieces)
    }

    fn parse_en_passant(field: &str) -> Result<Option<Square>, FenError> {
        if field == "-" {
            return Ok(None);
        }
        match Square::from_algebraic(field) {
            Some(sq) if sq.rank() == 2 || sq.rank() == 5 => Ok(Some(sq)),
            _ => Err(FenError::InvalidEnPassantSquare(field.to_string())),
        }
    }
}

impl PlacementPolicy for Fen {
    fn placements(&self) -> Vec<PlacedPiece> {
        self.pieces.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_startpos() {
        let fen = Fen::parse(Fen::STARTPOS).unwrap();
        assert_eq!(fen.pieces.len(), 32);
        assert_eq!(fen.side_to_move, Color::White);
        assert_eq!(fen.castling, CastlingAvailability::ALL);
        assert_eq!(fen.en_passant, None);
    }

    #[test]
    fn startpos_matches_standard_placement() {
        use crate::StandardPlacement;
        use std::collections::HashSet;

        let from_fen: HashSet<_> = Fen::parse(Fen::STARTPOS).unwrap().pieces.into_iter().collect();
        let standard: HashSet<_> = StandardPlacement.placements().into_iter().collect();
        assert_eq!(from_fen, standard);
    }

    #[test]
    fn placement_coordinates() {
        let fen = Fen::parse("4k3/8/8/8/8/8/8/R3K3 w Q -").unwrap();
        assert_eq!(
            fen.pieces,
            vec![
                PlacedPiece::new(PieceKind::King, Color::Black, Square::E8),
                PlacedPiece::new(PieceKind::Rook, Color::White, Square::A1),
                PlacedPiece::new(PieceKind::King, Color::White, Square::E1),
            ]
        );
        assert!(fen.castling.queenside(Color::White));
        assert!(!fen.castling.kingside(Color::White));
    }

    #[test]
    fn parse_en_passant_square() {
        let fen = Fen::parse("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
            .unwrap();
        assert_eq!(fen.side_to_move, Color::Black);
        assert_eq!(fen.en_passant, Square::from_algebraic("e3"));
    }

    #[test]
    fn invalid_part_count() {
        assert_eq!(
            Fen::parse("invalid"),
            Err(FenError::InvalidPartCount(1))
        );
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - - 0 1 extra"),
            Err(FenError::InvalidPartCount(7))
        ));
    }

    #[test]
    fn invalid_active_color() {
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 x KQkq - 0 1"),
            Err(FenError::InvalidActiveColor(_))
        ));
    }

    #[test]
    fn invalid_piece_placement() {
        // Too few ranks
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        // Invalid character
        assert!(matches!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        // Nine squares in a rank
        assert!(matches!(
            Fen::parse("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        // Seven squares in a rank
        assert!(matches!(
            Fen::parse("7/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        // Zero is not a valid skip
        assert!(matches!(
            Fen::parse("08/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_castling_rights() {
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w XYZ - 0 1"),
            Err(FenError::InvalidCastlingRights(_))
        ));
    }

    #[test]
    fn invalid_en_passant() {
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - abc 0 1"),
            Err(FenError::InvalidEnPassantSquare(_))
        ));
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - e4 0 1"),
            Err(FenError::InvalidEnPassantSquare(_))
        ));
    }

    #[test]
    fn clock_fields_are_optional() {
        let full = Fen::parse("4k3/8/8/8/8/8/8/R3K3 w Q - 12 40").unwrap();
        let short = Fen::parse("4k3/8/8/8/8/8/8/R3K3 w Q -").unwrap();
        assert_eq!(full, short);
    }

    #[test]
    fn invalid_clocks() {
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - - abc 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - - 0 xyz"),
            Err(FenError::InvalidFullmoveNumber(_))
        ));
    }

    #[test]
    fn fen_error_display() {
        let err = FenError::InvalidPartCount(3);
        assert!(format!("{}", err).contains("3"));

        let err = FenError::InvalidEnPassantSquare("z9".to_string());
        assert!(format!("{}", err).contains("z9"));
    }
}
