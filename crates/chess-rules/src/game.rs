//! Game session: turn order, move validation and the game's outcome.
//!
//! The [`Game`] struct wraps a [`Board`] with everything a live session needs:
//! - whose turn it is, alternating after every completed move
//! - rejection of moves that are not in the piece's legal list
//! - the two-phase promotion, holding the game until a choice arrives
//! - the move history and the current [`GameStatus`]

use chess_core::{Color, Fen, Move, PieceKind, PlacementPolicy, PromotionPiece, Square};
use thiserror::Error;

use crate::board::SetupError;
use crate::executor::{self, Commit, MoveOutcome, PendingPromotion};
use crate::movegen::{legal_moves, MoveList};
use crate::rules::{self, GameStatus};
use crate::{Board, MoveRecord};

/// Error type for game operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("the piece on {square} belongs to {found}, but it is {expected}'s turn")]
    WrongSide {
        square: Square,
        expected: Color,
        found: Color,
    },

    #[error("illegal move: {0}")]
    IllegalMove(Move),

    #[error("invalid move notation: {0}")]
    InvalidNotation(String),

    #[error("the pawn on {0} is waiting for its promotion choice")]
    PromotionPending(Square),

    #[error("no promotion is pending")]
    NoPromotionPending,

    #[error("game has already ended: {0}")]
    GameOver(GameStatus),
}

/// Supplies the replacement piece when a pawn reaches the last rank.
///
/// Returning `None` cancels: the pawn stays a pawn.
pub trait PromotionChooser {
    fn choose(&mut self, square: Square, color: Color) -> Option<PromotionPiece>;
}

impl<F> PromotionChooser for F
where
    F: FnMut(Square, Color) -> Option<PromotionPiece>,
{
    fn choose(&mut self, square: Square, color: Color) -> Option<PromotionPiece> {
        self(square, color)
    }
}

/// A chooser that always gives the same answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedChoice(pub Option<PromotionPiece>);

impl PromotionChooser for FixedChoice {
    fn choose(&mut self, _square: Square, _color: Color) -> Option<PromotionPiece> {
        self.0
    }
}

/// What a call to [`Game::make_move`] led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveEvent {
    /// The move is done and the turn has passed.
    Completed(MoveOutcome),
    /// A pawn reached the last rank; call [`Game::resolve_promotion`].
    PromotionRequired { square: Square, color: Color },
}

/// A chess game in progress.
#[derive(Debug)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    status: GameStatus,
    history: Vec<MoveRecord>,
    pending: Option<PendingPromotion>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position, White to move.
    pub fn new() -> Self {
        Self::from_board(Board::standard(), Color::White)
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let parsed = Fen::parse(fen).map_err(SetupError::from)?;
        let board = Board::from_parsed_fen(&parsed)?;
        Ok(Self::from_board(board, parsed.side_to_move))
    }

    /// Creates a game from a placement policy. All pieces start unmoved.
    pub fn from_placement<P>(policy: &P, side_to_move: Color) -> Result<Self, GameError>
    where
        P: PlacementPolicy + ?Sized,
    {
        Ok(Self::from_board(Board::from_policy(policy)?, side_to_move))
    }

    fn from_board(mut board: Board, side_to_move: Color) -> Self {
        let status = rules::evaluate(&mut board, side_to_move);
        Game {
            board,
            side_to_move,
            status,
            history: Vec::new(),
            pending: None,
        }
    }

    /// Returns a reference to the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns every completed move, oldest first.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// The square of a pawn waiting for its promotion choice, if any.
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending.as_ref().map(PendingPromotion::square)
    }

    /// Returns true if `color`'s king is attacked.
    pub fn is_in_check(&self, color: Color) -> bool {
        rules::is_in_check(&self.board, color)
    }

    /// Returns true if `color` has at least one legal move.
    pub fn has_any_legal_move(&mut self, color: Color) -> bool {
        self.ensure_not_pending()
            .map(|()| rules::has_any_legal_move(&mut self.board, color))
            .unwrap_or(false)
    }

    /// Returns the legal destinations of the side to move's piece on `square`.
    pub fn legal_moves_from(&mut self, square: Square) -> Result<MoveList, GameError> {
        self.ensure_not_pending()?;
        let id = self.own_piece_at(square)?;
        Ok(legal_moves(&mut self.board, id))
    }

    /// Plays a move for the side to move.
    ///
    /// A pawn reaching the last rank stops the game at
    /// [`MoveEvent::PromotionRequired`] until
    /// [`resolve_promotion`](Self::resolve_promotion) is called.
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<MoveEvent, GameError> {
        self.ensure_playable()?;
        let id = self.own_piece_at(from)?;
        if !legal_moves(&mut self.board, id).contains(to) {
            return Err(GameError::IllegalMove(Move::new(from, to)));
        }

        match executor::perform_move(&mut self.board, from, to) {
            Commit::Complete(outcome) => {
                self.finish_move(outcome.record);
                Ok(MoveEvent::Completed(outcome))
            }
            Commit::Promotion(pending) => {
                let event = MoveEvent::PromotionRequired {
                    square: pending.square(),
                    color: pending.color(),
                };
                self.pending = Some(pending);
                Ok(event)
            }
        }
    }

    /// Plays a move, asking `chooser` right away if the pawn promotes.
    pub fn make_move_with<C>(
        &mut self,
        from: Square,
        to: Square,
        chooser: &mut C,
    ) -> Result<MoveOutcome, GameError>
    where
        C: PromotionChooser + ?Sized,
    {
        match self.make_move(from, to)? {
            MoveEvent::Completed(outcome) => Ok(outcome),
            MoveEvent::PromotionRequired { square, color } => {
                let choice = chooser.choose(square, color);
                self.resolve_promotion(choice)
            }
        }
    }

    /// Plays a move given in coordinate notation (`e2e4`, `e7e8q`).
    ///
    /// A promotion suffix resolves the promotion immediately; without one the
    /// game waits for [`resolve_promotion`](Self::resolve_promotion).
    pub fn make_move_uci(&mut self, uci: &str) -> Result<MoveEvent, GameError> {
        let m = Move::from_uci(uci).ok_or_else(|| GameError::InvalidNotation(uci.to_string()))?;

        if m.promotion.is_some() && !self.is_promotion_move(m.from, m.to) {
            return Err(GameError::IllegalMove(m));
        }

        match (self.make_move(m.from, m.to)?, m.promotion) {
            (MoveEvent::PromotionRequired { .. }, Some(choice)) => self
                .resolve_promotion(Some(choice))
                .map(MoveEvent::Completed),
            (event, _) => Ok(event),
        }
    }

    /// Finishes the pending promotion. `None` keeps the pawn.
    pub fn resolve_promotion(
        &mut self,
        choice: Option<PromotionPiece>,
    ) -> Result<MoveOutcome, GameError> {
        let pending = self.pending.take().ok_or(GameError::NoPromotionPending)?;
        let outcome = executor::resolve_promotion(&mut self.board, pending, choice);
        self.finish_move(outcome.record);
        Ok(outcome)
    }

    fn finish_move(&mut self, record: MoveRecord) {
        self.history.push(record);
        self.side_to_move = self.side_to_move.opposite();
        self.status = rules::evaluate(&mut self.board, self.side_to_move);

        if self.status.is_over() {
            tracing::info!(status = %self.status, plies = self.history.len(), "game over");
        }
    }

    fn is_promotion_move(&self, from: Square, to: Square) -> bool {
        self.board.piece_on(from).is_some_and(|piece| {
            piece.kind() == PieceKind::Pawn && to.rank() == piece.color().promotion_rank()
        })
    }

    fn own_piece_at(&self, square: Square) -> Result<crate::PieceId, GameError> {
        let id = self
            .board
            .piece_at(square)
            .ok_or(GameError::EmptySquare(square))?;
        let found = self.board.piece(id).color();
        if found != self.side_to_move {
            return Err(GameError::WrongSide {
                square,
                expected: self.side_to_move,
                found,
            });
        }
        Ok(id)
    }

    fn ensure_not_pending(&self) -> Result<(), GameError> {
        match self.pending_promotion() {
            Some(square) => Err(GameError::PromotionPending(square)),
            None => Ok(()),
        }
    }

    fn ensure_playable(&self) -> Result<(), GameError> {
        self.ensure_not_pending()?;
        if self.status.is_over() {
            return Err(GameError::GameOver(self.status));
        }
        Ok(())
    }
}
