//! Per-piece move generation.
//!
//! Every piece kind has two modes:
//! - [`attack_moves`] is raw geometry. It never looks at check and never
//!   touches the board, which is what lets the check oracle call it for
//!   every enemy piece without recursing.
//! - [`legal_moves`] filters the raw list through the move simulator, then
//!   adds castling for kings and records the en passant capture a pawn found.

mod castling;
mod list;
pub mod perft;
mod pawn;
mod rays;
mod steps;

use chess_core::{PieceKind, Square};

use crate::simulate::will_move_put_king_in_check;
use crate::{Board, PieceId};

pub use castling::CastleSide;
pub use list::MoveList;

pub(crate) use pawn::en_passant_victim;

/// Returns the squares `id` attacks or may move to, ignoring check.
///
/// A piece that is no longer on the board has no moves.
pub fn attack_moves(board: &Board, id: PieceId) -> MoveList {
    let mut list = MoveList::new();
    fill_attack_moves(board, id, &mut list);
    list
}

fn fill_attack_moves(board: &Board, id: PieceId, out: &mut MoveList) {
    let piece = board.piece(id);
    if !piece.is_on_board() {
        return;
    }
    let (from, color) = (piece.square(), piece.color());

    match piece.kind() {
        PieceKind::Pawn => pawn::pawn_moves(board, from, color, out),
        PieceKind::Knight => steps::step_moves(board, from, color, &steps::KNIGHT_OFFSETS, out),
        PieceKind::Bishop => rays::ray_moves(board, from, color, &rays::DIAGONALS, out),
        PieceKind::Rook => rays::ray_moves(board, from, color, &rays::ORTHOGONALS, out),
        PieceKind::Queen => {
            rays::ray_moves(board, from, color, &rays::DIAGONALS, out);
            rays::ray_moves(board, from, color, &rays::ORTHOGONALS, out);
        }
        PieceKind::King => steps::step_moves(board, from, color, &steps::KING_OFFSETS, out),
    }
}

/// Returns the squares `id` may legally move to.
///
/// Every candidate is tried on the board and dropped if it would leave the
/// mover's own king in check. A pawn remembers the en passant capture that
/// survived the filter, for the executor to carry out.
///
/// # Panics
///
/// Panics while a promotion is waiting to be resolved.
pub fn legal_moves(board: &mut Board, id: PieceId) -> MoveList {
    if let Some(square) = board.pending_promotion() {
        panic!("cannot generate moves while the pawn on {square} awaits promotion");
    }

    let mut list = attack_moves(board, id);
    list.retain(|&to| !will_move_put_king_in_check(board, id, to));

    let piece = board.piece(id);
    match piece.kind() {
        PieceKind::Pawn => {
            let memory = pawn::en_passant(board, piece.square(), piece.color())
                .filter(|capture| list.contains(capture.target));
            board.piece_mut(id).set_en_passant(memory);
        }
        PieceKind::King => castling::castling_moves(board, id, &mut list),
        _ => {}
    }

    list
}

/// Returns the legal moves of whatever stands on `square`.
///
/// Empty and off-board squares have no moves.
pub fn legal_moves_at(board: &mut Board, square: Square) -> MoveList {
    match board.piece_at(square) {
        Some(id) => legal_moves(board, id),
        None => MoveList::new(),
    }
}
