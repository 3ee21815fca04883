//! Chess rules engine.
//!
//! This crate provides:
//! - [`Board`] - the 8×8 grid of pieces plus the last committed move
//! - [`Piece`] and [`PieceId`] - piece instances with their per-kind state
//! - Move generation in two modes: [`legal_moves`] and the raw [`attack_moves`]
//! - [`is_king_in_check`] and [`will_move_put_king_in_check`]
//! - [`perform_move`] and [`resolve_promotion`] for committing moves
//! - [`Game`] - a session with turn order, history and game-over detection
//!
//! # Example
//!
//! ```
//! use chess_core::Square;
//! use chess_rules::{Game, GameStatus, MoveEvent};
//!
//! let mut game = Game::new();
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//!
//! assert_eq!(game.legal_moves_from(e2).unwrap().len(), 2);
//! let event = game.make_move(e2, e4).unwrap();
//! assert!(matches!(event, MoveEvent::Completed(_)));
//! assert_eq!(game.status(), GameStatus::Ongoing);
//! ```

mod board;
pub mod check;
pub mod executor;
mod game;
pub mod movegen;
mod piece;
pub mod rules;
pub mod simulate;

pub use board::{Board, MoveRecord, SetupError};
pub use check::{find_king, is_king_in_check, is_square_attacked};
pub use executor::{
    perform_move, resolve_promotion, Commit, MoveOutcome, PendingPromotion, SideEffect,
};
pub use game::{FixedChoice, Game, GameError, MoveEvent, PromotionChooser};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{attack_moves, legal_moves, legal_moves_at, CastleSide, MoveList};
pub use piece::{EnPassant, Piece, PieceId, Presence, Variant};
pub use rules::{evaluate, has_any_legal_move, is_in_check, GameStatus};
pub use simulate::{will_move_put_king_in_check, Simulation};

/// Number of files and ranks on the board.
pub use chess_core::BOARD_SIZE;
