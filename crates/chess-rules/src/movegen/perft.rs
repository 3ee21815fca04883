//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! Each promotion counts once per replacement piece.

use chess_core::{Color, Move, PieceKind, PromotionPiece};

use super::legal_moves;
use crate::executor::{perform_move, resolve_promotion, Commit};
use crate::{Board, PieceId};

/// Counts the number of leaf nodes at the given depth, `color` to move.
pub fn perft(board: &Board, color: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut current = board.clone();
    let moves = all_legal_moves(&mut current, color);

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|&m| perft(&play(&current, m), color.opposite(), depth - 1))
        .sum()
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(board: &Board, color: Color, depth: u32) -> Vec<(String, u64)> {
    let mut current = board.clone();
    let moves = all_legal_moves(&mut current, color);
    let mut results = Vec::with_capacity(moves.len());

    for m in moves {
        let nodes = if depth > 1 {
            perft(&play(&current, m), color.opposite(), depth - 1)
        } else {
            1
        };
        results.push((m.to_uci(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

/// Every legal move of `color`, with promotions expanded into each choice.
///
/// Generation arms en passant captures on `board`, so the moves must be
/// played on clones of that same board.
fn all_legal_moves(board: &mut Board, color: Color) -> Vec<Move> {
    let ids: Vec<PieceId> = board.pieces_of(color).collect();
    let mut moves = Vec::new();

    for id in ids {
        let from = board.piece(id).square();
        let promotes = board.piece(id).kind() == PieceKind::Pawn;
        for &to in legal_moves(board, id).iter() {
            if promotes && to.rank() == color.promotion_rank() {
                moves.extend(
                    PromotionPiece::ALL
                        .iter()
                        .map(|&piece| Move::with_promotion(from, to, piece)),
                );
            } else {
                moves.push(Move::new(from, to));
            }
        }
    }

    moves
}

fn play(board: &Board, m: Move) -> Board {
    let mut next = board.clone();
    if let Commit::Promotion(pending) = perform_move(&mut next, m.from, m.to) {
        let _ = resolve_promotion(&mut next, pending, m.promotion);
    }
    next
}
