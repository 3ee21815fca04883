//! Initial piece placement.

use crate::square::BOARD_SIZE;
use crate::{Color, PieceKind, Square};

/// One piece to put on the board at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacedPiece {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
}

impl PlacedPiece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        PlacedPiece {
            kind,
            color,
            square,
        }
    }
}

/// Supplies the pieces a board starts with.
pub trait PlacementPolicy {
    /// Returns every piece to place, in placement order.
    fn placements(&self) -> Vec<PlacedPiece>;
}

impl PlacementPolicy for [PlacedPiece] {
    fn placements(&self) -> Vec<PlacedPiece> {
        self.to_vec()
    }
}

impl PlacementPolicy for Vec<PlacedPiece> {
    fn placements(&self) -> Vec<PlacedPiece> {
        self.clone()
    }
}

/// The standard 32-piece starting layout.
///
/// Built from White's queenside half: rook, knight, bishop and four pawns are
/// mirrored across the board's vertical axis, queen and king are placed once,
/// and the whole set is mirrored across the horizontal axis for Black.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPlacement;

impl StandardPlacement {
    const MIRRORED: [(PieceKind, i8, i8); 7] = [
        (PieceKind::Rook, 0, 0),
        (PieceKind::Knight, 1, 0),
        (PieceKind::Bishop, 2, 0),
        (PieceKind::Pawn, 0, 1),
        (PieceKind::Pawn, 1, 1),
        (PieceKind::Pawn, 2, 1),
        (PieceKind::Pawn, 3, 1),
    ];

    const SINGLE: [(PieceKind, i8, i8); 2] = [(PieceKind::Queen, 3, 0), (PieceKind::King, 4, 0)];

    fn push_both_colors(out: &mut Vec<PlacedPiece>, kind: PieceKind, file: i8, rank: i8) {
        out.push(PlacedPiece::new(kind, Color::White, Square::new(file, rank)));
        out.push(PlacedPiece::new(
            kind,
            Color::Black,
            Square::new(file, BOARD_SIZE - rank - 1),
        ));
    }
}

impl PlacementPolicy for StandardPlacement {
    fn placements(&self) -> Vec<PlacedPiece> {
        let mut out = Vec::with_capacity(32);
        for (kind, file, rank) in Self::MIRRORED {
            Self::push_both_colors(&mut out, kind, file, rank);
            Self::push_both_colors(&mut out, kind, BOARD_SIZE - file - 1, rank);
        }
        for (kind, file, rank) in Self::SINGLE {
            Self::push_both_colors(&mut out, kind, file, rank);
        }
        out
    }
}
