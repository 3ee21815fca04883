//! Board storage: the 8×8 occupancy grid, the piece arena and the last move.
//!
//! The board never judges legality. It only answers "what stands here" and
//! performs the raw mutations the simulator and executor are built from.

use chess_core::{
    Color, Fen, FenError, PieceKind, PlacementPolicy, Square, StandardPlacement, BOARD_SIZE,
    SQUARE_COUNT,
};
use thiserror::Error;

use crate::piece::{Piece, PieceId, Presence};

/// Errors that can occur while setting up a board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("cannot place a piece on {0}: square is off the board")]
    OffBoard(Square),

    #[error("cannot place a piece on {0}: square is already occupied")]
    Occupied(Square),

    #[error("en passant square {0} has no pawn that just advanced past it")]
    EnPassantWithoutPawn(Square),
}

/// What happened in one committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub piece_moved: PieceId,
    pub piece_captured: Option<PieceId>,
    pub from: Square,
    pub to: Square,
}

/// The board: who stands where, plus the last committed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: [Option<PieceId>; SQUARE_COUNT],
    pieces: Vec<Piece>,
    last_move: Option<MoveRecord>,
    pending_promotion: Option<Square>,
}

impl Board {
    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Board {
            grid: [None; SQUARE_COUNT],
            pieces: Vec::with_capacity(32),
            last_move: None,
            pending_promotion: None,
        }
    }

    /// Creates the standard starting position.
    pub fn standard() -> Self {
        Self::from_policy(&StandardPlacement).expect("standard placement is valid")
    }

    /// Creates a board holding every piece the policy supplies.
    ///
    /// All pieces start out unmoved.
    pub fn from_policy<P>(policy: &P) -> Result<Self, SetupError>
    where
        P: PlacementPolicy + ?Sized,
    {
        let mut board = Board::empty();
        for placed in policy.placements() {
            board.add_piece(placed.kind, placed.color, placed.square)?;
        }
        Ok(board)
    }

    /// Creates a board from a FEN string. The side to move is ignored.
    pub fn from_fen(fen: &str) -> Result<Self, SetupError> {
        let parsed = Fen::parse(fen)?;
        Self::from_parsed_fen(&parsed)
    }

    /// Creates a board from a parsed FEN record.
    ///
    /// Castling availability becomes the moved flags of kings and corner rooks,
    /// and an en passant square becomes a synthetic last move (the double
    /// advance that produced it).
    pub fn from_parsed_fen(fen: &Fen) -> Result<Self, SetupError> {
        let mut board = Self::from_policy(fen)?;

        for index in 0..board.pieces.len() {
            let piece = &board.pieces[index];
            let color = piece.color();
            let square = piece.square();
            let home = square.rank() == color.back_rank();
            let unmoved = match piece.kind() {
                PieceKind::King => {
                    home && square.file() == 4
                        && (fen.castling.kingside(color) || fen.castling.queenside(color))
                }
                PieceKind::Rook => {
                    home && ((square.file() == BOARD_SIZE - 1 && fen.castling.kingside(color))
                        || (square.file() == 0 && fen.castling.queenside(color)))
                }
                _ => true,
            };
            if !unmoved {
                board.pieces[index].mark_moved();
            }
        }

        if let Some(target) = fen.en_passant {
            // Rank 3 targets belong to a White double advance, rank 6 to Black.
            let (color, step) = if target.rank() == 2 {
                (Color::White, 1)
            } else {
                (Color::Black, -1)
            };
            let landed = target.offset(0, step);
            let origin = target.offset(0, -step);
            let mover = board
                .piece_at(landed)
                .filter(|&id| {
                    let piece = board.piece(id);
                    piece.kind() == PieceKind::Pawn && piece.color() == color
                })
                .ok_or(SetupError::EnPassantWithoutPawn(target))?;
            board.last_move = Some(MoveRecord {
                piece_moved: mover,
                piece_captured: None,
                from: origin,
                to: landed,
            });
        }

        Ok(board)
    }

    /// Creates a new piece and puts it on `square`.
    pub fn add_piece(
        &mut self,
        kind: PieceKind,
        color: Color,
        square: Square,
    ) -> Result<PieceId, SetupError> {
        if !square.is_on_board() {
            return Err(SetupError::OffBoard(square));
        }
        if self.piece_at(square).is_some() {
            return Err(SetupError::Occupied(square));
        }
        Ok(self.spawn(kind, color, square))
    }

    /// Creates a piece on `square`, replacing whatever stood there in the grid.
    pub(crate) fn spawn(&mut self, kind: PieceKind, color: Color, square: Square) -> PieceId {
        let id = PieceId::new(self.pieces.len());
        self.pieces.push(Piece::new(kind, color, square));
        self.set_piece_at(square, Some(id));
        id
    }

    /// Returns the piece on `square`, or `None` if it is empty or off the board.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<PieceId> {
        square.index().and_then(|i| self.grid[i])
    }

    /// Returns the piece data on `square`, if any.
    #[inline]
    pub fn piece_on(&self, square: Square) -> Option<&Piece> {
        self.piece_at(square).map(|id| self.piece(id))
    }

    /// Overwrites the grid cell at `square`. Does nothing off the board.
    ///
    /// Placing a piece also moves its cached square, so the grid and the
    /// piece always agree.
    pub fn set_piece_at(&mut self, square: Square, piece: Option<PieceId>) {
        let Some(index) = square.index() else {
            return;
        };
        self.grid[index] = piece;
        if let Some(id) = piece {
            self.pieces[id.index()].set_square(square);
        }
    }

    /// Clears `square` and takes whatever stood there out of play.
    pub fn capture_at(&mut self, square: Square) -> Option<PieceId> {
        let captured = self.piece_at(square)?;
        self.set_piece_at(square, None);
        self.pieces[captured.index()].set_presence(Presence::Captured);
        Some(captured)
    }

    /// Removes a promoting pawn from the board for good.
    pub(crate) fn retire(&mut self, id: PieceId) {
        let square = self.pieces[id.index()].square();
        if self.piece_at(square) == Some(id) {
            self.set_piece_at(square, None);
        }
        self.pieces[id.index()].set_presence(Presence::Promoted);
    }

    /// Returns the piece behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle was issued by a different board.
    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    #[inline]
    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.index()]
    }

    /// Iterates over occupied squares, a1 first, rank by rank.
    pub fn occupants(&self) -> impl Iterator<Item = (Square, PieceId)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|id| (sq, id)))
    }

    /// Iterates over the pieces of `color` currently on the board.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = PieceId> + '_ {
        self.occupants()
            .filter(move |&(_, id)| self.piece(id).color() == color)
            .map(|(_, id)| id)
    }

    /// The most recent committed move, if any.
    #[inline]
    pub fn last_move(&self) -> Option<MoveRecord> {
        self.last_move
    }

    pub(crate) fn set_last_move(&mut self, record: MoveRecord) {
        self.last_move = Some(record);
    }

    /// The square of a pawn waiting for its promotion choice, if any.
    #[inline]
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }

    pub(crate) fn set_pending_promotion(&mut self, square: Option<Square>) {
        self.pending_promotion = square;
    }

    /// Returns the piece placement field of a FEN string for this board.
    pub fn placement_fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..BOARD_SIZE).rev() {
            let mut empty_count = 0;
            for file in 0..BOARD_SIZE {
                if let Some(piece) = self.piece_on(Square::new(file, rank)) {
                    if empty_count > 0 {
                        fen.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    fen.push(piece.kind().to_fen_char(piece.color()));
                } else {
                    empty_count += 1;
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
