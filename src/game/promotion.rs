//! Pawn promotion chooser
//!
//! When a pawn move into the last rank is legal, the move is held back and a
//! chooser column is shown on the destination file. The column starts on the
//! promotion square and stacks back toward the pawn's own side, so it never
//! runs off the board. Only one chooser can exist at a time.

use crate::game::registry::HandleId;
use crate::game::types::{PieceColor, PieceKind, Square};
use serde::Serialize;
use tracing::{debug, info};

/// A pawn move waiting for its promotion kind
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingPromotion {
    pub from: Square,
    pub to: Square,
    pub pawn: HandleId,
    pub color: PieceColor,
}

/// One selectable cell of the chooser
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ChooserOption {
    pub kind: PieceKind,
    pub square: Square,
}

/// Where the chooser is drawn
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChooserLayout {
    pub color: PieceColor,
    pub options: [ChooserOption; 4],
}

impl ChooserLayout {
    /// Queen on the promotion square, then rook, bishop, knight toward the
    /// pawn's own side
    pub fn for_promotion(to: Square, color: PieceColor) -> Self {
        debug_assert_eq!(to.rank, color.promotion_rank());
        let options = std::array::from_fn(|i| {
            let kind = PieceKind::PROMOTION_CHOICES[i];
            // promotion rank is 7 (white) or 0 (black), so four steps stay on the board
            let rank = match color {
                PieceColor::White => 7 - i as u8,
                PieceColor::Black => i as u8,
            };
            let square = Square::from_index_wrapping(rank * 8 + to.file.index());
            ChooserOption { kind, square }
        });
        Self { color, options }
    }

    /// Option drawn on `square`, if any
    pub fn option_at(&self, square: Square) -> Option<PieceKind> {
        self.options
            .iter()
            .find(|option| option.square == square)
            .map(|option| option.kind)
    }
}

/// Single-instance chooser state
#[derive(Debug, Default, Clone)]
pub struct PromotionChooser {
    pending: Option<(PendingPromotion, ChooserLayout)>,
}

impl PromotionChooser {
    /// Open the chooser. A trigger while one is already open is a no-op and
    /// returns `None`.
    pub fn open(&mut self, pending: PendingPromotion) -> Option<ChooserLayout> {
        if self.pending.is_some() {
            debug!(
                "[PROMOTION] Chooser already open, ignoring trigger for {}{}",
                pending.from, pending.to
            );
            return None;
        }
        let layout = ChooserLayout::for_promotion(pending.to, pending.color);
        info!(
            "[PROMOTION] Pawn {}{} awaiting promotion choice",
            pending.from, pending.to
        );
        self.pending = Some((pending, layout.clone()));
        Some(layout)
    }

    /// Close the chooser, returning the move it was holding
    pub fn close(&mut self) -> Option<PendingPromotion> {
        self.pending.take().map(|(pending, _)| pending)
    }

    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PendingPromotion> {
        self.pending.as_ref().map(|(pending, _)| pending)
    }

    pub fn layout(&self) -> Option<&ChooserLayout> {
        self.pending.as_ref().map(|(_, layout)| layout)
    }
}
