//! Sliding movers: bishop, rook and queen.

use chess_core::{Color, Square};

use super::MoveList;
use crate::Board;

pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];

pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Walks each direction until the edge or the first occupied square.
///
/// An enemy blocker is included and ends the ray; an own blocker is not.
pub(super) fn ray_moves(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    out: &mut MoveList,
) {
    for &(file_step, rank_step) in directions {
        let mut to = from.offset(file_step, rank_step);
        while to.is_on_board() {
            match board.piece_on(to) {
                None => out.push(to),
                Some(blocker) => {
                    if blocker.color() != color {
                        out.push(to);
                    }
                    break;
                }
            }
            to = to.offset(file_step, rank_step);
        }
    }
}
