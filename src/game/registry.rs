//! Piece registry - square to visual handle mapping
//!
//! Mirrors the engine's occupied squares with controller-owned piece handles.
//! The controller is the only owner of handle lifecycle: handles are created
//! at setup, relocated on every committed move, retextured in place on
//! promotion and destroyed when captured. The engine never sees them.
//!
//! # Invariant
//!
//! Outside a single move commit, the occupied squares of the registry equal
//! the occupied squares of the engine's board, and each handle's piece kind
//! and color match what the engine reports. [`PieceRegistry::verify_against`]
//! checks this against a [`BoardSnapshot`].

use crate::game::error::{GameError, GameResult};
use crate::game::types::{BoardSnapshot, Piece, Square};
use std::fmt;
use tracing::{debug, warn};

/// Stable identity of a visual piece instance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(u32);

impl HandleId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
impl HandleId {
    pub(crate) fn from_raw(raw: u32) -> Self {
        HandleId(raw)
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of the controller that owns a set of handles
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ControllerId(pub u32);

/// A visual piece instance
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PieceHandle {
    pub id: HandleId,
    pub square: Square,
    pub piece: Piece,
    pub owner: ControllerId,
}

/// Square → handle mapping, at most one handle per square
#[derive(Debug, Clone)]
pub struct PieceRegistry {
    owner: ControllerId,
    squares: [Option<PieceHandle>; 64],
    next_id: u32,
}

impl PieceRegistry {
    pub fn new(owner: ControllerId) -> Self {
        Self {
            owner,
            squares: [None; 64],
            next_id: 0,
        }
    }

    /// Build a registry with one handle per occupied square of `snapshot`
    pub fn from_snapshot(owner: ControllerId, snapshot: &BoardSnapshot) -> Self {
        let mut registry = Self::new(owner);
        for square in Square::all() {
            if let Some(piece) = snapshot_piece(snapshot, square) {
                registry.squares[square.index()] = Some(registry.allocate(square, piece));
            }
        }
        debug!("[REGISTRY] Created {} handles", registry.len());
        registry
    }

    pub fn owner(&self) -> ControllerId {
        self.owner
    }

    fn allocate(&mut self, square: Square, piece: Piece) -> PieceHandle {
        let id = HandleId(self.next_id);
        self.next_id += 1;
        PieceHandle {
            id,
            square,
            piece,
            owner: self.owner,
        }
    }

    /// Create a new handle on an empty square
    pub fn spawn(&mut self, square: Square, piece: Piece) -> GameResult<PieceHandle> {
        if self.squares[square.index()].is_some() {
            return Err(GameError::SquareOccupied { square });
        }
        let handle = self.allocate(square, piece);
        self.squares[square.index()] = Some(handle);
        Ok(handle)
    }

    pub fn get(&self, square: Square) -> Option<&PieceHandle> {
        self.squares[square.index()].as_ref()
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.squares[square.index()].is_some()
    }

    /// Square currently holding the handle with `id`
    pub fn square_of(&self, id: HandleId) -> Option<Square> {
        self.iter().find(|handle| handle.id == id).map(|handle| handle.square)
    }

    /// Remove and return the handle on `square`
    pub fn take(&mut self, square: Square) -> Option<PieceHandle> {
        self.squares[square.index()].take()
    }

    /// Place a handle on an empty square, updating its recorded square
    pub fn place(&mut self, mut handle: PieceHandle, square: Square) -> GameResult<PieceHandle> {
        let slot = &mut self.squares[square.index()];
        if slot.is_some() {
            return Err(GameError::SquareOccupied { square });
        }
        handle.square = square;
        *slot = Some(handle);
        Ok(handle)
    }

    /// Change the piece a handle shows without changing its identity
    pub fn retexture(&mut self, square: Square, piece: Piece) -> GameResult<PieceHandle> {
        let handle = self.squares[square.index()]
            .as_mut()
            .ok_or(GameError::MissingExpectedPiece { square })?;
        handle.piece = piece;
        Ok(*handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PieceHandle> {
        self.squares.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Compare against the engine's board; the first disagreement is returned
    pub fn verify_against(&self, snapshot: &BoardSnapshot) -> GameResult<()> {
        for square in Square::all() {
            let expected = snapshot_piece(snapshot, square);
            let actual = self.get(square).map(|handle| handle.piece);
            if expected != actual {
                return Err(GameError::Desync {
                    square,
                    message: format!("engine has {expected:?}, registry has {actual:?}"),
                });
            }
        }
        Ok(())
    }

    /// Rebuild the registry from the engine's board, keeping handles whose
    /// square and piece still match. Returns the destroyed and created handles.
    pub fn resync(&mut self, snapshot: &BoardSnapshot) -> (Vec<PieceHandle>, Vec<PieceHandle>) {
        let mut destroyed = Vec::new();
        let mut created = Vec::new();
        for square in Square::all() {
            let expected = snapshot_piece(snapshot, square);
            let current = self.squares[square.index()];
            if current.map(|handle| handle.piece) == expected {
                continue;
            }
            if let Some(stale) = self.squares[square.index()].take() {
                destroyed.push(stale);
            }
            if let Some(piece) = expected {
                let handle = self.allocate(square, piece);
                self.squares[square.index()] = Some(handle);
                created.push(handle);
            }
        }
        if !destroyed.is_empty() || !created.is_empty() {
            warn!(
                "[REGISTRY] Resynced from engine: {} destroyed, {} created",
                destroyed.len(),
                created.len()
            );
        }
        (destroyed, created)
    }
}

fn snapshot_piece(snapshot: &BoardSnapshot, square: Square) -> Option<Piece> {
    snapshot[square.row() as usize][square.col() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::{PieceColor, PieceKind};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn white(kind: PieceKind) -> Piece {
        Piece::new(kind, PieceColor::White)
    }

    #[test]
    fn test_spawn_rejects_occupied_square() {
        let mut registry = PieceRegistry::new(ControllerId(0));
        registry.spawn(sq("e1"), white(PieceKind::King)).unwrap();
        assert!(matches!(
            registry.spawn(sq("e1"), white(PieceKind::Queen)),
            Err(GameError::SquareOccupied { .. })
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_take_and_place_keep_identity() {
        let mut registry = PieceRegistry::new(ControllerId(7));
        let spawned = registry.spawn(sq("g1"), white(PieceKind::Knight)).unwrap();
        let taken = registry.take(sq("g1")).unwrap();
        let placed = registry.place(taken, sq("f3")).unwrap();
        assert_eq!(placed.id, spawned.id);
        assert_eq!(placed.square, sq("f3"));
        assert_eq!(placed.owner, ControllerId(7));
        assert_eq!(registry.square_of(spawned.id), Some(sq("f3")));
        assert!(!registry.is_occupied(sq("g1")));
    }

    #[test]
    fn test_retexture_in_place() {
        let mut registry = PieceRegistry::new(ControllerId(0));
        let pawn = registry.spawn(sq("a8"), white(PieceKind::Pawn)).unwrap();
        let queen = registry.retexture(sq("a8"), white(PieceKind::Queen)).unwrap();
        assert_eq!(queen.id, pawn.id);
        assert_eq!(queen.piece.kind, PieceKind::Queen);
        assert!(registry.retexture(sq("b8"), white(PieceKind::Queen)).is_err());
    }

    #[test]
    fn test_verify_and_resync() {
        let mut snapshot: BoardSnapshot = [[None; 8]; 8];
        let e1 = sq("e1");
        snapshot[e1.row() as usize][e1.col() as usize] = Some(white(PieceKind::King));
        let mut registry = PieceRegistry::from_snapshot(ControllerId(0), &snapshot);
        assert!(registry.verify_against(&snapshot).is_ok());

        registry.spawn(sq("d4"), white(PieceKind::Rook)).unwrap();
        assert!(matches!(
            registry.verify_against(&snapshot),
            Err(GameError::Desync { .. })
        ));

        let king = *registry.get(e1).unwrap();
        let (destroyed, created) = registry.resync(&snapshot);
        assert_eq!(destroyed.len(), 1);
        assert!(created.is_empty());
        assert_eq!(registry.get(e1).map(|h| h.id), Some(king.id));
        assert!(registry.verify_against(&snapshot).is_ok());
    }
}
