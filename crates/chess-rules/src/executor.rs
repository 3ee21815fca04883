//! Committing moves.
//!
//! [`perform_move`] relocates a piece, records the move and runs the moved
//! piece's follow-up: the rook hop of a castle, the removal of a pawn taken
//! en passant, or the start of a promotion. A promotion is finished in a
//! second step with [`resolve_promotion`], once a choice is available.

use chess_core::{Color, PieceKind, PromotionPiece, Square};

use crate::movegen::CastleSide;
use crate::{Board, MoveRecord, PieceId};

/// A follow-up effect a committed move triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffect {
    /// The rook hopped over the castling king.
    Castle {
        rook: PieceId,
        from: Square,
        to: Square,
    },
    /// A pawn was taken en passant.
    EnPassant { captured: PieceId, square: Square },
    /// The pawn was replaced on the last rank.
    Promotion {
        pawn: PieceId,
        replacement: PieceId,
        kind: PromotionPiece,
    },
}

/// The result of a fully committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The primary move: for a castle, the king's.
    pub record: MoveRecord,
    pub effect: Option<SideEffect>,
}

/// A pawn that reached the last rank and waits for its replacement.
///
/// The board refuses all other moves until this is passed to
/// [`resolve_promotion`].
#[must_use = "a pending promotion blocks the board until it is resolved"]
#[derive(Debug, PartialEq, Eq)]
pub struct PendingPromotion {
    record: MoveRecord,
    pawn: PieceId,
    square: Square,
    color: Color,
}

impl PendingPromotion {
    /// The pawn move that reached the last rank.
    pub fn record(&self) -> MoveRecord {
        self.record
    }

    pub fn pawn(&self) -> PieceId {
        self.pawn
    }

    /// The square the pawn is waiting on.
    pub fn square(&self) -> Square {
        self.square
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// What [`perform_move`] produced.
#[must_use]
#[derive(Debug, PartialEq, Eq)]
pub enum Commit {
    Complete(MoveOutcome),
    Promotion(PendingPromotion),
}

/// Commits the move from `from` to `to`.
///
/// Does not check legality: callers pick `to` from
/// [`legal_moves`](crate::legal_moves), which is also what arms a pawn's
/// en passant capture.
///
/// # Panics
///
/// Panics if `from` is empty, `to` is off the board, or a promotion is
/// still pending.
pub fn perform_move(board: &mut Board, from: Square, to: Square) -> Commit {
    if let Some(square) = board.pending_promotion() {
        panic!("cannot commit {from}{to} while the pawn on {square} awaits promotion");
    }

    let record = relocate(board, from, to);
    let mover = record.piece_moved;
    tracing::debug!(%from, %to, captured = record.piece_captured.is_some(), "committed move");

    let effect = match board.piece(mover).kind() {
        PieceKind::King => {
            let had_moved = board.piece(mover).has_moved();
            board.piece_mut(mover).mark_moved();
            if had_moved {
                None
            } else {
                castle_rook(board, from, to)
            }
        }
        PieceKind::Rook => {
            board.piece_mut(mover).mark_moved();
            None
        }
        PieceKind::Pawn => return pawn_follow_up(board, record),
        _ => None,
    };

    Commit::Complete(MoveOutcome { record, effect })
}

/// Finishes a promotion.
///
/// With a choice the pawn leaves play and a fresh piece of the chosen kind
/// takes its square. Without one the pawn simply stays where it is.
///
/// # Panics
///
/// Panics if the board is not waiting on this promotion or the pawn is no
/// longer on its square.
pub fn resolve_promotion(
    board: &mut Board,
    pending: PendingPromotion,
    choice: Option<PromotionPiece>,
) -> MoveOutcome {
    let PendingPromotion {
        record,
        pawn,
        square,
        color,
    } = pending;

    assert_eq!(
        board.pending_promotion(),
        Some(square),
        "board is not waiting on a promotion at {square}"
    );
    assert_eq!(
        board.piece_at(square),
        Some(pawn),
        "no promoting pawn on {square}"
    );
    board.set_pending_promotion(None);

    let Some(kind) = choice else {
        tracing::warn!(%square, "promotion cancelled; pawn stays a pawn");
        return MoveOutcome {
            record,
            effect: None,
        };
    };

    board.retire(pawn);
    let replacement = board.spawn(kind.kind(), color, square);
    // A promoted rook must not be able to castle.
    board.piece_mut(replacement).mark_moved();
    tracing::debug!(%square, piece = %kind, "pawn promoted");

    MoveOutcome {
        record,
        effect: Some(SideEffect::Promotion {
            pawn,
            replacement,
            kind,
        }),
    }
}

/// Moves a piece, capturing whatever stood on `to`, and records the move.
fn relocate(board: &mut Board, from: Square, to: Square) -> MoveRecord {
    let moved = board
        .piece_at(from)
        .unwrap_or_else(|| panic!("no piece on {from} to move"));
    assert!(to.is_on_board(), "cannot move the piece on {from} to {to}");

    let captured = board.capture_at(to);
    board.set_piece_at(to, Some(moved));
    board.set_piece_at(from, None);

    let record = MoveRecord {
        piece_moved: moved,
        piece_captured: captured,
        from,
        to,
    };
    board.set_last_move(record);
    record
}

/// Brings the rook across after a two-file king step.
///
/// The rook hop is recorded as the last move in its own right but triggers
/// nothing further.
fn castle_rook(board: &mut Board, from: Square, to: Square) -> Option<SideEffect> {
    let side = CastleSide::of_king_move(from, to)?;
    let rook_from = side.rook_from(from);
    let rook_to = side.rook_to(to);

    let rook = relocate(board, rook_from, rook_to).piece_moved;
    board.piece_mut(rook).mark_moved();
    tracing::debug!(from = %rook_from, to = %rook_to, "castling rook relocated");

    Some(SideEffect::Castle {
        rook,
        from: rook_from,
        to: rook_to,
    })
}

fn pawn_follow_up(board: &mut Board, record: MoveRecord) -> Commit {
    let pawn = record.piece_moved;
    let color = board.piece(pawn).color();

    let mut effect = None;
    let armed = board
        .piece_mut(pawn)
        .take_en_passant()
        .filter(|capture| capture.target == record.to && record.piece_captured.is_none());
    if let Some(capture) = armed {
        if let Some(captured) = board.capture_at(capture.captured) {
            tracing::debug!(square = %capture.captured, "pawn captured en passant");
            effect = Some(SideEffect::EnPassant {
                captured,
                square: capture.captured,
            });
        }
    }

    if record.to.rank() == color.promotion_rank() {
        board.set_pending_promotion(Some(record.to));
        tracing::debug!(square = %record.to, "pawn awaits promotion");
        return Commit::Promotion(PendingPromotion {
            record,
            pawn,
            square: record.to,
            color,
        });
    }

    Commit::Complete(MoveOutcome { record, effect })
}
