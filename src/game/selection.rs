//! Selection state machine
//!
//! ```text
//! Idle ──press own piece──▶ Selected(s)
//! Selected(s) ──press s──▶ Idle
//! Selected(s) ──press other own piece──▶ Selected(t)
//! Selected(s) ──press elsewhere──▶ move attempt ──▶ Idle | AwaitingPromotion
//! AwaitingPromotion ──pick──▶ Idle
//! ```
//!
//! The transition table lives in [`SelectionState::interpret`]; executing the
//! resulting [`Intent`] is the controller's job.

use crate::game::registry::HandleId;
use crate::game::types::{PieceColor, Square};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Idle,
    Selected(Square),
    AwaitingPromotion {
        from: Square,
        to: Square,
        pawn: HandleId,
    },
}

/// What a square press means in the current state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Nothing to do
    Ignore,
    Select(Square),
    Deselect,
    AttemptMove { from: Square, to: Square },
    /// Press landed on the board while the promotion chooser is open
    PromotionBoardPress(Square),
}

impl SelectionState {
    /// Map a press on `square` to an intent. `occupant` is the color of the
    /// piece on that square, `side_to_move` the engine's current side.
    pub fn interpret(
        &self,
        square: Square,
        occupant: Option<PieceColor>,
        side_to_move: PieceColor,
    ) -> Intent {
        let own_piece = occupant == Some(side_to_move);
        match *self {
            SelectionState::Idle if own_piece => Intent::Select(square),
            SelectionState::Idle => Intent::Ignore,
            SelectionState::Selected(selected) if selected == square => Intent::Deselect,
            SelectionState::Selected(_) if own_piece => Intent::Select(square),
            SelectionState::Selected(selected) => Intent::AttemptMove {
                from: selected,
                to: square,
            },
            SelectionState::AwaitingPromotion { .. } => Intent::PromotionBoardPress(square),
        }
    }

    pub fn selected(&self) -> Option<Square> {
        match *self {
            SelectionState::Selected(square) => Some(square),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, SelectionState::Idle)
    }

    pub fn is_awaiting_promotion(&self) -> bool {
        matches!(self, SelectionState::AwaitingPromotion { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    const WHITE: PieceColor = PieceColor::White;
    const BLACK: PieceColor = PieceColor::Black;

    #[test]
    fn test_idle_selects_only_side_to_move() {
        let idle = SelectionState::Idle;
        assert_eq!(idle.interpret(sq("e2"), Some(WHITE), WHITE), Intent::Select(sq("e2")));
        assert_eq!(idle.interpret(sq("e7"), Some(BLACK), WHITE), Intent::Ignore);
        assert_eq!(idle.interpret(sq("e4"), None, WHITE), Intent::Ignore);
    }

    #[test]
    fn test_selected_transitions() {
        let selected = SelectionState::Selected(sq("e2"));
        assert_eq!(selected.interpret(sq("e2"), Some(WHITE), WHITE), Intent::Deselect);
        assert_eq!(selected.interpret(sq("d2"), Some(WHITE), WHITE), Intent::Select(sq("d2")));
        assert_eq!(
            selected.interpret(sq("e4"), None, WHITE),
            Intent::AttemptMove {
                from: sq("e2"),
                to: sq("e4")
            }
        );
        assert_eq!(
            selected.interpret(sq("d7"), Some(BLACK), WHITE),
            Intent::AttemptMove {
                from: sq("e2"),
                to: sq("d7")
            }
        );
    }

    #[test]
    fn test_awaiting_promotion_routes_every_press() {
        let awaiting = SelectionState::AwaitingPromotion {
            from: sq("a7"),
            to: sq("a8"),
            pawn: HandleId::from_raw(7),
        };
        assert_eq!(
            awaiting.interpret(sq("b2"), Some(WHITE), WHITE),
            Intent::PromotionBoardPress(sq("b2"))
        );
        assert!(awaiting.selected().is_none());
        assert!(awaiting.is_awaiting_promotion());
    }
}
