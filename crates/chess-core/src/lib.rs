//! Core types for chess.
//!
//! This crate provides the fundamental types shared by the rules crate and
//! its front ends:
//! - [`PieceKind`], [`PromotionPiece`] and [`Color`] for piece identity
//! - [`Square`] for (file, rank) coordinates, including the "no move" sentinel
//! - [`Move`] for coordinate-notation move requests
//! - [`PlacementPolicy`] and [`StandardPlacement`] for initial setup
//! - FEN parsing

mod color;
mod fen;
mod mov;
mod piece;
mod placement;
mod square;

pub use color::Color;
pub use fen::{CastlingAvailability, Fen, FenError};
pub use mov::Move;
pub use piece::{PieceKind, PromotionPiece};
pub use placement::{PlacedPiece, PlacementPolicy, StandardPlacement};
pub use square::{Square, BOARD_SIZE, SQUARE_COUNT};
