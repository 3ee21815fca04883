//! Terminal-state rules.

use chess_core::Color;

use crate::check::is_king_in_check;
use crate::movegen::legal_moves;
use crate::{Board, PieceId};

/// State of a game from the point of view of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// The side to move has at least one legal move.
    Ongoing,
    /// The side to move is in check and has no legal move.
    Checkmate { winner: Color },
    /// The side to move is not in check and has no legal move.
    Stalemate,
}

impl GameStatus {
    /// Returns true once the game has ended.
    #[inline]
    pub const fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "ongoing"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// Returns true if `color`'s king is attacked.
#[inline]
pub fn is_in_check(board: &Board, color: Color) -> bool {
    is_king_in_check(board, color)
}

/// Returns true if any piece of `color` has a legal move.
///
/// Stops generating at the first piece that has one.
pub fn has_any_legal_move(board: &mut Board, color: Color) -> bool {
    let ids: Vec<PieceId> = board.pieces_of(color).collect();
    ids.into_iter().any(|id| !legal_moves(board, id).is_empty())
}

/// Classifies the position for `to_move`.
pub fn evaluate(board: &mut Board, to_move: Color) -> GameStatus {
    if has_any_legal_move(board, to_move) {
        GameStatus::Ongoing
    } else if is_in_check(board, to_move) {
        GameStatus::Checkmate {
            winner: to_move.opposite(),
        }
    } else {
        GameStatus::Stalemate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_is_ongoing() {
        let mut board = Board::standard();
        assert_eq!(evaluate(&mut board, Color::White), GameStatus::Ongoing);
        assert_eq!(evaluate(&mut board, Color::Black), GameStatus::Ongoing);
    }

    #[test]
    fn back_rank_mate() {
        let mut board = Board::from_fen("3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        assert!(is_in_check(&board, Color::Black));
        assert!(!has_any_legal_move(&mut board, Color::Black));
        assert_eq!(
            evaluate(&mut board, Color::Black),
            GameStatus::Checkmate {
                winner: Color::White
            }
        );
    }

    #[test]
    fn cornered_king_is_stalemated() {
        let mut board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(!is_in_check(&board, Color::Black));
        assert_eq!(evaluate(&mut board, Color::Black), GameStatus::Stalemate);
    }

    #[test]
    fn status_display() {
        assert_eq!(GameStatus::Stalemate.to_string(), "stalemate");
        assert_eq!(
            GameStatus::Checkmate {
                winner: Color::Black
            }
            .to_string(),
            format!("checkmate, {} wins", Color::Black)
        );
        assert!(!GameStatus::Ongoing.is_over());
    }
}
