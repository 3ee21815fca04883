//! Hypothetical moves.
//!
//! A [`Simulation`] applies a move to the board and undoes it when dropped,
//! whether the caller returns normally or unwinds. It holds the board's only
//! mutable borrow for its whole life, so two simulations can never overlap.

use std::ops::Deref;

use chess_core::{PieceKind, Square};

use crate::check::is_king_in_check;
use crate::movegen::en_passant_victim;
use crate::{Board, PieceId};

/// A move applied for inspection only.
///
/// Dereferences to the board in its moved state. Dropping it restores the
/// exact prior state: occupants, cached piece squares and the last move.
#[must_use = "a simulation is reverted as soon as it is dropped"]
pub struct Simulation<'a> {
    board: &'a mut Board,
    piece: PieceId,
    from: Square,
    to: Square,
    displaced: Option<PieceId>,
    bypassed: Option<(Square, PieceId)>,
}

impl<'a> Simulation<'a> {
    /// Moves `piece` to `to` without capturing, recording, or notifying anything.
    ///
    /// An en passant step also lifts the bypassed pawn off the board.
    ///
    /// # Panics
    ///
    /// Panics if `piece` is not on the board or `to` is off it.
    pub fn new(board: &'a mut Board, piece: PieceId, to: Square) -> Self {
        let from = board.piece(piece).square();
        assert!(
            board.piece_at(from) == Some(piece),
            "cannot simulate a move for a piece that is not on the board"
        );
        assert!(to.is_on_board(), "cannot simulate a move to {to}");

        let displaced = board.piece_at(to);
        let bypassed = if board.piece(piece).kind() == PieceKind::Pawn {
            en_passant_victim(board, from, to)
                .and_then(|square| board.piece_at(square).map(|id| (square, id)))
        } else {
            None
        };

        if let Some((square, _)) = bypassed {
            board.set_piece_at(square, None);
        }
        board.set_piece_at(to, Some(piece));
        board.set_piece_at(from, None);

        Simulation {
            board,
            piece,
            from,
            to,
            displaced,
            bypassed,
        }
    }
}

impl Deref for Simulation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for Simulation<'_> {
    fn drop(&mut self) {
        self.board.set_piece_at(self.to, self.displaced);
        self.board.set_piece_at(self.from, Some(self.piece));
        if let Some((square, id)) = self.bypassed {
            self.board.set_piece_at(square, Some(id));
        }
    }
}

/// Returns true if moving `piece` to `to` would leave its own king in check.
///
/// The board is left exactly as it was.
pub fn will_move_put_king_in_check(board: &mut Board, piece: PieceId, to: Square) -> bool {
    let color = board.piece(piece).color();
    let simulation = Simulation::new(board, piece, to);
    let in_check = is_king_in_check(&simulation, color);
    tracing::trace!(
        from = %simulation.from,
        to = %to,
        in_check,
        "simulated move"
    );
    in_check
}
