//! Single-step movers: knight and king.

use chess_core::{Color, Square};

use super::MoveList;
use crate::Board;

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];

/// Pushes every offset square that is on the board and not held by `color`.
pub(super) fn step_moves(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    out: &mut MoveList,
) {
    for &(file_step, rank_step) in offsets {
        let to = from.offset(file_step, rank_step);
        if !to.is_on_board() {
            continue;
        }
        if board.piece_on(to).is_some_and(|p| p.color() == color) {
            continue;
        }
        out.push(to);
    }
}
