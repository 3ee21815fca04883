//! Pawn pushes, captures and en passant.

use chess_core::{Color, PieceKind, Square};

use super::MoveList;
use crate::piece::EnPassant;
use crate::Board;

/// Pushes the pawn's destinations: single push, double push, captures
/// toward the a-file then the h-file side, and en passant.
pub(super) fn pawn_moves(board: &Board, from: Square, color: Color, out: &mut MoveList) {
    let direction = color.pawn_direction();

    let single = from.offset(0, direction);
    if is_vacant(board, single) {
        out.push(single);
        let double = single.offset(0, direction);
        if from.rank() == color.pawn_rank() && is_vacant(board, double) {
            out.push(double);
        }
    }

    for file_step in [-1, 1] {
        let to = from.offset(file_step, direction);
        if board.piece_on(to).is_some_and(|p| p.color() != color) {
            out.push(to);
        }
    }

    if let Some(capture) = en_passant(board, from, color) {
        out.push(capture.target);
    }
}

/// Returns the en passant capture open to a `color` pawn on `from`, if any.
///
/// Only available right after an enemy pawn advanced two ranks to land
/// beside `from`.
pub(crate) fn en_passant(board: &Board, from: Square, color: Color) -> Option<EnPassant> {
    let last = board.last_move()?;
    let mover = board.piece(last.piece_moved);
    if mover.kind() != PieceKind::Pawn || mover.color() == color {
        return None;
    }
    if (last.to.rank() - last.from.rank()).abs() != 2 {
        return None;
    }
    if last.to.rank() != from.rank() || (last.to.file() - from.file()).abs() != 1 {
        return None;
    }
    if board.piece_at(last.to) != Some(last.piece_moved) {
        return None;
    }

    let target = last.to.offset(0, color.pawn_direction());
    if !is_vacant(board, target) {
        return None;
    }
    Some(EnPassant {
        target,
        captured: last.to,
    })
}

/// Returns the square of the pawn an en passant move from `from` to `to`
/// would remove: a diagonal step onto an empty square.
pub(crate) fn en_passant_victim(board: &Board, from: Square, to: Square) -> Option<Square> {
    if to.file() == from.file() || board.piece_at(to).is_some() {
        return None;
    }
    let victim = Square::new(to.file(), from.rank());
    board
        .piece_on(victim)
        .filter(|p| p.kind() == PieceKind::Pawn)
        .map(|_| victim)
}

fn is_vacant(board: &Board, square: Square) -> bool {
    square.is_on_board() && board.piece_at(square).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::perform_move;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn moves(board: &Board, from: &str) -> Vec<String> {
        let piece = board.piece_on(sq(from)).unwrap();
        let mut list = MoveList::new();
        pawn_moves(board, sq(from), piece.color(), &mut list);
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn start_rank_pushes() {
        let board = Board::standard();
        assert_eq!(moves(&board, "e2"), ["e3", "e4"]);
        assert_eq!(moves(&board, "d7"), ["d6", "d5"]);
    }

    #[test]
    fn blocked_pawn_cannot_push() {
        let board = Board::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").unwrap();
        assert!(moves(&board, "e2").is_empty());

        let board = Board::from_fen("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").unwrap();
        assert_eq!(moves(&board, "e2"), ["e3"]);
    }

    #[test]
    fn captures_only_enemies() {
        let board = Board::from_fen("4k3/8/8/8/8/3p1N2/4P3/4K3 w - - 0 1").unwrap();
        assert_eq!(moves(&board, "e2"), ["e3", "e4", "d3"]);
    }

    #[test]
    fn en_passant_after_double_advance() {
        let mut board = Board::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1").unwrap();
        let _ = perform_move(&mut board, sq("d7"), sq("d5"));
        assert_eq!(moves(&board, "e5"), ["e6", "d6"]);
        assert_eq!(
            en_passant(&board, sq("e5"), Color::White),
            Some(EnPassant {
                target: sq("d6"),
                captured: sq("d5"),
            })
        );
    }

    #[test]
    fn no_en_passant_after_single_steps() {
        let mut board = Board::from_fen("4k3/8/3p4/4P3/8/8/8/4K3 b - - 0 1").unwrap();
        let _ = perform_move(&mut board, sq("d6"), sq("d5"));
        assert_eq!(en_passant(&board, sq("e5"), Color::White), None);
    }

    #[test]
    fn victim_lookup() {
        let board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        assert_eq!(en_passant_victim(&board, sq("e5"), sq("d6")), Some(sq("d5")));
        assert_eq!(en_passant_victim(&board, sq("e5"), sq("e6")), None);
    }
}
