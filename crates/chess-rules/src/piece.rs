//! Piece instances and their per-kind mutable state.

use chess_core::{Color, PieceKind, Square};

/// Handle to a piece owned by a [`Board`](crate::Board).
///
/// Handles stay valid after the piece leaves the board, so a
/// [`MoveRecord`](crate::MoveRecord) can always name what moved and what was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(u32);

impl PieceId {
    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        PieceId(u32::try_from(index).expect("piece arena index exceeds u32"))
    }

    /// Returns the arena index of this piece.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A pending en passant capture, remembered by the pawn that may make it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnPassant {
    /// The empty square the capturing pawn moves to.
    pub target: Square,
    /// The square of the pawn that gets removed.
    pub captured: Square,
}

/// Kind tag plus the state only some kinds carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Pawn { en_passant: Option<EnPassant> },
    Knight,
    Bishop,
    Rook { has_moved: bool },
    Queen,
    King { has_moved: bool },
}

impl Variant {
    /// Returns the initial state for a freshly created piece of `kind`.
    pub const fn new(kind: PieceKind) -> Self {
        match kind {
            PieceKind::Pawn => Variant::Pawn { en_passant: None },
            PieceKind::Knight => Variant::Knight,
            PieceKind::Bishop => Variant::Bishop,
            PieceKind::Rook => Variant::Rook { has_moved: false },
            PieceKind::Queen => Variant::Queen,
            PieceKind::King => Variant::King { has_moved: false },
        }
    }

    /// Returns the kind this variant belongs to.
    pub const fn kind(self) -> PieceKind {
        match self {
            Variant::Pawn { .. } => PieceKind::Pawn,
            Variant::Knight => PieceKind::Knight,
            Variant::Bishop => PieceKind::Bishop,
            Variant::Rook { .. } => PieceKind::Rook,
            Variant::Queen => PieceKind::Queen,
            Variant::King { .. } => PieceKind::King,
        }
    }
}

/// Whether a piece is still in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presence {
    OnBoard,
    Captured,
    /// A pawn replaced by the piece it promoted to.
    Promoted,
}

/// A single piece.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    color: Color,
    variant: Variant,
    square: Square,
    presence: Presence,
}

impl Piece {
    pub(crate) const fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Piece {
            color,
            variant: Variant::new(kind),
            square,
            presence: Presence::OnBoard,
        }
    }

    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.variant.kind()
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// The square the piece stands on, or last stood on if it left the board.
    #[inline]
    pub const fn square(&self) -> Square {
        self.square
    }

    #[inline]
    pub const fn presence(&self) -> Presence {
        self.presence
    }

    #[inline]
    pub const fn is_on_board(&self) -> bool {
        matches!(self.presence, Presence::OnBoard)
    }

    /// Returns true once a king or rook has moved. Always false for other kinds.
    pub const fn has_moved(&self) -> bool {
        match self.variant {
            Variant::Rook { has_moved } | Variant::King { has_moved } => has_moved,
            _ => false,
        }
    }

    /// The en passant capture found by this pawn's latest legal-move generation.
    pub const fn en_passant(&self) -> Option<EnPassant> {
        match self.variant {
            Variant::Pawn { en_passant } => en_passant,
            _ => None,
        }
    }

    /// Sets the moved flag of a king or rook. The flag never clears.
    pub(crate) fn mark_moved(&mut self) {
        match &mut self.variant {
            Variant::Rook { has_moved } | Variant::King { has_moved } => *has_moved = true,
            _ => {}
        }
    }

    pub(crate) fn set_en_passant(&mut self, memory: Option<EnPassant>) {
        if let Variant::Pawn { en_passant } = &mut self.variant {
            *en_passant = memory;
        }
    }

    pub(crate) fn take_en_passant(&mut self) -> Option<EnPassant> {
        match &mut self.variant {
            Variant::Pawn { en_passant } => en_passant.take(),
            _ => None,
        }
    }

    pub(crate) fn set_square(&mut self, square: Square) {
        self.square = square;
    }

    pub(crate) fn set_presence(&mut self, presence: Presence) {
        self.presence = presence;
    }
}
