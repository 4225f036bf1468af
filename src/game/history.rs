//! Move history and captured-piece tallies
//!
//! In-memory record of committed moves for display (move list, last-move
//! highlight, captured pieces). Nothing here is persisted or undoable.

use crate::game::types::{Move, PieceColor, PieceKind};
use serde::Serialize;

/// A committed move as seen by the players
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    /// Full-move number, starting at 1 and advancing after black moves
    pub move_number: u32,
    pub side: PieceColor,
    pub mv: Move,
    pub is_check: bool,
    pub is_checkmate: bool,
}

/// Ordered list of committed moves
#[derive(Debug, Default, Clone)]
pub struct MoveHistory {
    moves: Vec<MoveRecord>,
    captured: CapturedPieces,
}

impl MoveHistory {
    /// Record a committed move and return the stored record
    pub fn push(&mut self, mv: Move, is_check: bool, is_checkmate: bool) -> MoveRecord {
        let move_number = self.next_move_number(mv.piece.color);
        let record = MoveRecord {
            move_number,
            side: mv.piece.color,
            mv,
            is_check,
            is_checkmate,
        };
        if let Some(captured) = mv.captured {
            self.captured.add_capture(mv.piece.color.opposite(), captured.kind);
        }
        self.moves.push(record);
        record
    }

    fn next_move_number(&self, side: PieceColor) -> u32 {
        match self.moves.last() {
            None => 1,
            Some(last) if side == PieceColor::White && last.side == PieceColor::Black => {
                last.move_number + 1
            }
            Some(last) => last.move_number,
        }
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.moves.last()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MoveRecord> {
        self.moves.iter()
    }

    pub fn captured(&self) -> &CapturedPieces {
        &self.captured
    }
}

/// Pieces taken by each side
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CapturedPieces {
    /// Pieces captured by white (black pieces taken)
    pub white_captured: Vec<PieceKind>,
    /// Pieces captured by black (white pieces taken)
    pub black_captured: Vec<PieceKind>,
}

impl CapturedPieces {
    pub fn add_capture(&mut self, captured_piece_color: PieceColor, kind: PieceKind) {
        match captured_piece_color {
            PieceColor::White => self.black_captured.push(kind),
            PieceColor::Black => self.white_captured.push(kind),
        }
    }

    /// Material difference in pawn units, positive when white is ahead
    pub fn material_advantage(&self) -> i32 {
        let white_score: i32 = self.white_captured.iter().map(|k| piece_value(*k)).sum();
        let black_score: i32 = self.black_captured.iter().map(|k| piece_value(*k)).sum();
        white_score - black_score
    }
}

fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight | PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King => 0,
    }
}
