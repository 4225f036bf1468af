//! Error types for game module
//!
//! Covers move rejection, engine synchronization and registry bookkeeping.
//! None of these are fatal: the controller logs them and reports a
//! `MoveRejected` event, leaving engine and registry untouched.

use crate::game::engine::EngineError;
use crate::game::types::{PieceKind, Square};

/// Errors that can occur in game logic
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The engine refused the move, either by returning nothing or by erroring
    #[error("Illegal move {from}{to}: {reason}")]
    IllegalMove {
        from: Square,
        to: Square,
        reason: String,
    },

    /// A piece the move needs is absent from the registry
    #[error("Expected piece missing at {square}")]
    MissingExpectedPiece { square: Square },

    /// Promotion choice outside queen/rook/bishop/knight
    #[error("Invalid promotion kind: {kind:?}")]
    InvalidPromotionKind { kind: PieceKind },

    /// The engine's answer does not correspond to what was asked. The engine
    /// has already advanced; the registry was rebuilt from its board.
    #[error("Engine synchronization failed: {message}")]
    EngineSync { message: String },

    /// Registry and engine disagree about a square
    #[error("Registry out of sync with engine at {square}: {message}")]
    Desync { square: Square, message: String },

    /// A handle was placed on a square that already holds one
    #[error("Square {square} already holds a piece handle")]
    SquareOccupied { square: Square },

    /// Square notation could not be parsed
    #[error("Invalid square notation: {notation:?}")]
    InvalidSquare { notation: String },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
