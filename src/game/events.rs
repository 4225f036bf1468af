//! Observable controller events
//!
//! The controller never drives a renderer directly. Each visual side effect
//! of an input is queued here, in order, and the presentation layer drains
//! the queue after dispatching the input. Animations requested through
//! [`BoardEvent::HandleMoved`] are purely visual: by the time the event is
//! queued the registry and engine already agree.

use crate::game::history::MoveRecord;
use crate::game::hints::HintSet;
use crate::game::promotion::ChooserLayout;
use crate::game::registry::{HandleId, PieceHandle};
use crate::game::types::{Piece, PieceColor, Square};

#[derive(Clone, Debug, PartialEq)]
pub enum BoardEvent {
    /// A handle was created (setup or registry resync)
    HandleSpawned(PieceHandle),
    /// A captured or stale handle was removed
    HandleDestroyed { handle: HandleId, square: Square },
    /// A handle changed piece kind in place (promotion)
    HandleRetextured { handle: HandleId, piece: Piece },
    /// Animate a handle from one square to another
    HandleMoved {
        handle: HandleId,
        from: Square,
        to: Square,
    },
    /// Selected square highlight and legal-move markers
    HintsShown(HintSet),
    HintsCleared,
    PromotionChooserShown(ChooserLayout),
    PromotionChooserDismissed,
    MoveCommitted(MoveRecord),
    /// A move attempt failed; nothing was changed
    MoveRejected {
        from: Square,
        to: Square,
        reason: String,
    },
    /// The engine played something other than the request. The registry was
    /// rebuilt from the engine's board and the turn has passed.
    PositionResynced {
        from: Square,
        to: Square,
        reason: String,
    },
    /// The side to move is in check (not mate)
    Check { side: PieceColor },
    /// Terminal: the side to move is checkmated
    Checkmate {
        winner: PieceColor,
        king: Option<HandleId>,
        king_square: Option<Square>,
        message: String,
    },
}

/// FIFO queue of events awaiting the presentation layer
#[derive(Debug, Default, Clone)]
pub struct EventQueue {
    pending: Vec<BoardEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: BoardEvent) {
        self.pending.push(event);
    }

    pub fn drain(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
