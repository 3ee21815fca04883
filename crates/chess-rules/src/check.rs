//! Check detection.

use chess_core::{Color, PieceKind, Square};

use crate::movegen::attack_moves;
use crate::{Board, PieceId};

/// Returns the king of `color`, if it is on the board.
pub fn find_king(board: &Board, color: Color) -> Option<PieceId> {
    board.pieces_of(color).find(|&id| board.piece(id).kind() == PieceKind::King)
}

/// Returns true if any piece of `color`'s opponent attacks its king.
///
/// A side without a king is never in check.
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    match find_king(board, color) {
        Some(king) => is_square_attacked(board, board.piece(king).square(), color.opposite()),
        None => false,
    }
}

/// Returns true if a piece of color `by` has `square` in its raw move list.
///
/// Pawn diagonals only appear in that list when something stands there to
/// capture, so an empty square can be reported safe from a pawn. Stops at the
/// first attacker found.
pub fn is_square_attacked(board: &Board, square: Square, by: Color) -> bool {
    board
        .pieces_of(by)
        .any(|id| attack_moves(board, id).contains(square))
}
