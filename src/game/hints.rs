//! Legal-move hints for the selected piece
//!
//! Destinations come from the engine; this module only classifies them into
//! marker glyphs and tracks whether markers are currently on screen.

use crate::game::registry::PieceRegistry;
use crate::game::types::{Move, Square};
use serde::Serialize;
use tracing::debug;

/// Marker drawn on a destination square
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum HintGlyph {
    /// Quiet move: filled dot
    Dot,
    /// Capture or occupied destination: ring
    Ring,
    /// Castling: two dots
    DoubleDot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HintMarker {
    pub square: Square,
    pub glyph: HintGlyph,
}

/// Everything drawn for one selection
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HintSet {
    pub selected: Square,
    pub markers: Vec<HintMarker>,
}

impl HintSet {
    pub fn marker_at(&self, square: Square) -> Option<HintGlyph> {
        self.markers
            .iter()
            .find(|marker| marker.square == square)
            .map(|marker| marker.glyph)
    }
}

pub fn classify(mv: &Move, registry: &PieceRegistry) -> HintGlyph {
    if mv.is_castle() {
        HintGlyph::DoubleDot
    } else if mv.is_capture() || registry.is_occupied(mv.to) {
        HintGlyph::Ring
    } else {
        HintGlyph::Dot
    }
}

/// Tracks the markers currently shown
#[derive(Debug, Default, Clone)]
pub struct HintRenderer {
    active: Option<HintSet>,
}

impl HintRenderer {
    /// Compute markers for `selected`. Promotion moves arrive once per kind
    /// and collapse to a single marker per destination.
    pub fn compute(selected: Square, moves: &[Move], registry: &PieceRegistry) -> HintSet {
        let mut markers: Vec<HintMarker> = Vec::with_capacity(moves.len());
        for mv in moves {
            if markers.iter().any(|marker| marker.square == mv.to) {
                continue;
            }
            markers.push(HintMarker {
                square: mv.to,
                glyph: classify(mv, registry),
            });
        }
        HintSet { selected, markers }
    }

    /// Replace the active hints, returning the set to display
    pub fn show(&mut self, selected: Square, moves: &[Move], registry: &PieceRegistry) -> HintSet {
        let set = Self::compute(selected, moves, registry);
        debug!(
            "[HINTS] {} destinations for {}",
            set.markers.len(),
            selected
        );
        self.active = Some(set.clone());
        set
    }

    /// Drop the active hints; `true` when something was on screen
    pub fn clear(&mut self) -> bool {
        self.active.take().is_some()
    }

    pub fn active(&self) -> Option<&HintSet> {
        self.active.as_ref()
    }
}
