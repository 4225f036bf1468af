//! Move-legality engine boundary
//!
//! The engine is the single source of truth for the logical board: it
//! validates and applies moves and answers check/checkmate queries. The
//! controller never infers legality itself; it only mirrors what the engine
//! reports into the piece registry.
//!
//! # Rejection channels
//!
//! [`MoveEngine::apply_move`] can refuse a move two ways:
//! - `Ok(None)`: the move is not legal in the current position
//! - `Err(EngineError)`: the request itself was malformed or the engine failed
//!
//! Callers treat both as an illegal move and must not touch the registry.

pub mod shakmaty_engine;

pub use shakmaty_engine::ShakmatyEngine;

use crate::game::types::{BoardSnapshot, Move, MoveRequest, Piece, PieceColor, PieceKind, Square};

/// Errors raised by an engine implementation
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("engine rejected move: {message}")]
    Rejected { message: String },

    #[error("promotion to {kind:?} is not allowed")]
    InvalidPromotion { kind: PieceKind },

    #[error("invalid FEN: {message}")]
    Fen { message: String },

    #[error("illegal starting position: {message}")]
    Position { message: String },
}

/// Authoritative move-legality engine consumed by the controller
pub trait MoveEngine {
    /// Piece standing on `square`, if any
    fn piece_at(&self, square: Square) -> Option<Piece>;

    /// Every legal move starting from `square`, one entry per promotion kind
    fn legal_moves(&self, square: Square) -> Vec<Move>;

    /// Validate and apply a move, returning the committed record
    fn apply_move(&mut self, request: MoveRequest) -> Result<Option<Move>, EngineError>;

    fn is_in_check(&self) -> bool;

    fn is_checkmate(&self) -> bool;

    fn side_to_move(&self) -> PieceColor;

    /// Full board, row 0 = rank 8
    fn board_snapshot(&self) -> BoardSnapshot;
}
