//! Castling: destinations for the king, and where the rook goes.

use chess_core::{Color, PieceKind, Square};

use super::MoveList;
use crate::check::is_king_in_check;
use crate::simulate::will_move_put_king_in_check;
use crate::{Board, PieceId};

/// The two castling directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    /// Toward the h-file.
    Kingside,
    /// Toward the a-file.
    Queenside,
}

impl CastleSide {
    /// Kingside first, as generated.
    pub const ALL: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// File step from the king toward this side's rook.
    #[inline]
    pub const fn file_step(self) -> i8 {
        match self {
            CastleSide::Kingside => 1,
            CastleSide::Queenside => -1,
        }
    }

    /// Files between the king's home square and this side's rook.
    #[inline]
    pub const fn rook_distance(self) -> i8 {
        match self {
            CastleSide::Kingside => 3,
            CastleSide::Queenside => 4,
        }
    }

    /// Returns the side a king move castles toward, if it is a two-file step.
    pub fn of_king_move(from: Square, to: Square) -> Option<Self> {
        if from.rank() != to.rank() {
            return None;
        }
        match to.file() - from.file() {
            2 => Some(CastleSide::Kingside),
            -2 => Some(CastleSide::Queenside),
            _ => None,
        }
    }

    /// Where this side's rook starts, for a king standing on `king_from`.
    #[inline]
    pub const fn rook_from(self, king_from: Square) -> Square {
        king_from.offset(self.file_step() * self.rook_distance(), 0)
    }

    /// Where this side's rook lands: beside the king, on the inner side.
    #[inline]
    pub const fn rook_to(self, king_to: Square) -> Square {
        king_to.offset(-self.file_step(), 0)
    }
}

/// Appends the castling destinations open to `king`.
pub(super) fn castling_moves(board: &mut Board, king: PieceId, out: &mut MoveList) {
    let piece = board.piece(king);
    if piece.kind() != PieceKind::King || piece.has_moved() || !piece.is_on_board() {
        return;
    }
    let (from, color) = (piece.square(), piece.color());
    if is_king_in_check(board, color) {
        return;
    }

    for side in CastleSide::ALL {
        if can_castle(board, king, from, color, side) {
            out.push(from.offset(2 * side.file_step(), 0));
        }
    }
}

fn can_castle(board: &mut Board, king: PieceId, from: Square, color: Color, side: CastleSide) -> bool {
    let rook_ready = board.piece_on(side.rook_from(from)).is_some_and(|rook| {
        rook.kind() == PieceKind::Rook && rook.color() == color && !rook.has_moved()
    });
    if !rook_ready {
        return false;
    }

    let step = side.file_step();
    let path_clear =
        (1..side.rook_distance()).all(|i| board.piece_at(from.offset(step * i, 0)).is_none());
    if !path_clear {
        return false;
    }

    // The king may not cross or land on an attacked square.
    (1..=2).all(|i| !will_move_put_king_in_check(board, king, from.offset(step * i, 0)))
}
