//! Move executor - applies committed moves to the piece registry
//!
//! The engine validates and applies first; only an accepted move touches the
//! registry, in this order:
//!
//! 1. Capture: destroy the handle on the captured square
//! 2. Castle: king to `to`, rook from its fixed origin to its fixed target
//! 3. Promotion: retexture the pawn handle in place to the chosen kind
//! 4. Otherwise relocate the moving handle to `to`
//! 5. Registry entries for `from` and `to` are rewritten in every case
//! 6. Animation requests are queued after the registry is consistent
//! 7. If a captured or castling handle was missing, the registry is
//!    resynced from the engine's board
//!
//! A rejection from the engine returns before step 1, so a failed attempt is
//! a no-op for both engine and registry. [`GameError::EngineSync`] is the
//! exception: the engine has moved on and the registry is rebuilt to match.

use crate::game::engine::MoveEngine;
use crate::game::error::{GameError, GameResult};
use crate::game::events::{BoardEvent, EventQueue};
use crate::game::registry::{HandleId, PieceRegistry};
use crate::game::types::{Move, MoveRequest, Piece, Square};
use tracing::{debug, error, warn};

/// One handle relocation produced by a commit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Relocation {
    pub handle: HandleId,
    pub from: Square,
    pub to: Square,
}

/// Ask the engine to play `request` and mirror the result into `registry`
pub fn execute<E: MoveEngine>(
    engine: &mut E,
    registry: &mut PieceRegistry,
    events: &mut EventQueue,
    request: MoveRequest,
) -> GameResult<Move> {
    let Some(mover) = registry.get(request.from).copied() else {
        return Err(GameError::MissingExpectedPiece {
            square: request.from,
        });
    };

    let committed = match engine.apply_move(request) {
        Ok(Some(mv)) => mv,
        Ok(None) => {
            return Err(GameError::IllegalMove {
                from: request.from,
                to: request.to,
                reason: "rejected by engine".to_string(),
            })
        }
        Err(err) => {
            return Err(GameError::IllegalMove {
                from: request.from,
                to: request.to,
                reason: err.to_string(),
            })
        }
    };

    if !committed.matches(&request) || committed.piece != mover.piece {
        error!(
            "[MOVE] Engine answered {} with {:?}; rebuilding registry",
            request, committed
        );
        resync(engine, registry, events);
        return Err(GameError::EngineSync {
            message: format!("requested {request}, engine played {committed}"),
        });
    }

    match apply_side_effects(registry, events, &committed) {
        Ok(SideEffects {
            relocations,
            missing_handles,
        }) => {
            for relocation in relocations {
                events.push(BoardEvent::HandleMoved {
                    handle: relocation.handle,
                    from: relocation.from,
                    to: relocation.to,
                });
            }
            if missing_handles {
                resync(engine, registry, events);
            }
            debug!("[MOVE] Registry updated for {}", committed);
            Ok(committed)
        }
        Err(err) => {
            error!("[MOVE] Registry update for {} failed: {}", committed, err);
            resync(engine, registry, events);
            Err(GameError::EngineSync {
                message: err.to_string(),
            })
        }
    }
}

/// Outcome of steps 1-5
struct SideEffects {
    relocations: Vec<Relocation>,
    /// A captured or castling handle was absent; the registry needs a resync
    missing_handles: bool,
}

/// Steps 1-5 of a commit. Returns the relocations to animate.
fn apply_side_effects(
    registry: &mut PieceRegistry,
    events: &mut EventQueue,
    mv: &Move,
) -> GameResult<SideEffects> {
    let mut relocations = Vec::with_capacity(2);
    let mut missing_handles = false;

    if let Some(captured) = mv.captured {
        match registry.take(captured.square) {
            Some(victim) => events.push(BoardEvent::HandleDestroyed {
                handle: victim.id,
                square: captured.square,
            }),
            None => {
                warn!(
                    "[MOVE] {}",
                    GameError::MissingExpectedPiece {
                        square: captured.square
                    }
                );
                missing_handles = true;
            }
        }
    }

    let mut mover = registry
        .take(mv.from)
        .ok_or(GameError::MissingExpectedPiece { square: mv.from })?;

    if let Some(side) = mv.class.castle_side() {
        let rook_from = mv.to.with_file(side.rook_origin_file());
        let rook_to = mv.to.with_file(side.rook_target_file());
        match registry.take(rook_from) {
            Some(rook) => {
                let rook = registry.place(rook, rook_to)?;
                relocations.push(Relocation {
                    handle: rook.id,
                    from: rook_from,
                    to: rook_to,
                });
            }
            None => {
                warn!(
                    "[MOVE] {}; moving king only",
                    GameError::MissingExpectedPiece { square: rook_from }
                );
                missing_handles = true;
            }
        }
    }

    if let Some(kind) = mv.promotion {
        mover.piece = Piece::new(kind, mover.piece.color);
        events.push(BoardEvent::HandleRetextured {
            handle: mover.id,
            piece: mover.piece,
        });
    }

    let mover = registry.place(mover, mv.to)?;
    relocations.insert(
        0,
        Relocation {
            handle: mover.id,
            from: mv.from,
            to: mv.to,
        },
    );
    Ok(SideEffects {
        relocations,
        missing_handles,
    })
}

/// Rebuild the registry from the engine's board, reporting every handle
/// destroyed or created along the way
pub fn resync<E: MoveEngine>(engine: &E, registry: &mut PieceRegistry, events: &mut EventQueue) {
    let (destroyed, created) = registry.resync(&engine.board_snapshot());
    for handle in destroyed {
        events.push(BoardEvent::HandleDestroyed {
            handle: handle.id,
            square: handle.square,
        });
    }
    for handle in created {
        events.push(BoardEvent::HandleSpawned(handle));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::engine::ShakmatyEngine;
    use crate::game::registry::ControllerId;
    use crate::game::types::{MoveClass, PieceKind};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn setup(fen: Option<&str>) -> (ShakmatyEngine, PieceRegistry, EventQueue) {
        let engine = match fen {
            Some(fen) => ShakmatyEngine::from_fen(fen).unwrap(),
            None => ShakmatyEngine::new(),
        };
        let registry = PieceRegistry::from_snapshot(ControllerId(0), &engine.board_snapshot());
        (engine, registry, EventQueue::default())
    }

    #[test]
    fn test_normal_move_relocates_one_handle() {
        let (mut engine, mut registry, mut events) = setup(None);
        let knight = *registry.get(sq("g1")).unwrap();
        let mv = execute(&mut engine, &mut registry, &mut events, MoveRequest::new(sq("g1"), sq("f3")))
            .unwrap();
        assert_eq!(mv.class, MoveClass::Normal);
        assert_eq!(registry.get(sq("f3")).map(|h| h.id), Some(knight.id));
        assert!(!registry.is_occupied(sq("g1")));
        assert_eq!(
            events.drain(),
            vec![BoardEvent::HandleMoved {
                handle: knight.id,
                from: sq("g1"),
                to: sq("f3")
            }]
        );
        registry.verify_against(&engine.board_snapshot()).unwrap();
    }

    #[test]
    fn test_rejection_leaves_everything_untouched() {
        let (mut engine, mut registry, mut events) = setup(None);
        let before = engine.board_snapshot();
        let result = execute(&mut engine, &mut registry, &mut events, MoveRequest::new(sq("e2"), sq("e5")));
        assert!(matches!(result, Err(GameError::IllegalMove { .. })));
        assert!(events.is_empty());
        assert_eq!(engine.board_snapshot(), before);
        registry.verify_against(&before).unwrap();
    }

    #[test]
    fn test_empty_origin_is_rejected_before_engine() {
        let (mut engine, mut registry, mut events) = setup(None);
        let result = execute(&mut engine, &mut registry, &mut events, MoveRequest::new(sq("e4"), sq("e5")));
        assert!(matches!(result, Err(GameError::MissingExpectedPiece { .. })));
        assert_eq!(engine.side_to_move(), crate::game::types::PieceColor::White);
    }

    #[test]
    fn test_capture_destroys_before_relocating() {
        let (mut engine, mut registry, mut events) =
            setup(Some("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1"));
        let victim = *registry.get(sq("d5")).unwrap();
        let pawn = *registry.get(sq("e4")).unwrap();
        execute(&mut engine, &mut registry, &mut events, MoveRequest::new(sq("e4"), sq("d5"))).unwrap();
        assert_eq!(
            events.drain(),
            vec![
                BoardEvent::HandleDestroyed {
                    handle: victim.id,
                    square: sq("d5")
                },
                BoardEvent::HandleMoved {
                    handle: pawn.id,
                    from: sq("e4"),
                    to: sq("d5")
                },
            ]
        );
        registry.verify_against(&engine.board_snapshot()).unwrap();
    }

    #[test]
    fn test_queenside_castle_moves_rook() {
        let (mut engine, mut registry, mut events) =
            setup(Some("r3k3/8/8/8/8/8/8/4K3 b q - 0 1"));
        let rook = *registry.get(sq("a8")).unwrap();
        let mv = execute(&mut engine, &mut registry, &mut events, MoveRequest::new(sq("e8"), sq("c8")))
            .unwrap();
        assert_eq!(mv.class, MoveClass::CastleQueenside);
        assert_eq!(registry.get(sq("d8")).map(|h| h.id), Some(rook.id));
        assert_eq!(registry.get(sq("c8")).map(|h| h.piece.kind), Some(PieceKind::King));
        assert_eq!(events.drain().len(), 2);
        registry.verify_against(&engine.board_snapshot()).unwrap();
    }

    #[test]
    fn test_en_passant_removes_pawn_beside_destination() {
        let (mut engine, mut registry, mut events) =
            setup(Some("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1"));
        let victim = *registry.get(sq("d5")).unwrap();
        execute(&mut engine, &mut registry, &mut events, MoveRequest::new(sq("e5"), sq("d6"))).unwrap();
        assert!(events.drain().contains(&BoardEvent::HandleDestroyed {
            handle: victim.id,
            square: sq("d5")
        }));
        assert!(!registry.is_occupied(sq("d5")));
        registry.verify_against(&engine.board_snapshot()).unwrap();
    }

    #[test]
    fn test_promotion_keeps_handle_identity() {
        let (mut engine, mut registry, mut events) =
            setup(Some("8/P6k/8/8/8/8/8/K7 w - - 0 1"));
        let pawn = *registry.get(sq("a7")).unwrap();
        execute(
            &mut engine,
            &mut registry,
            &mut events,
            MoveRequest::with_promotion(sq("a7"), sq("a8"), PieceKind::Rook),
        )
        .unwrap();
        let promoted = registry.get(sq("a8")).unwrap();
        assert_eq!(promoted.id, pawn.id);
        assert_eq!(promoted.piece.kind, PieceKind::Rook);
        assert_eq!(
            events.drain()[0],
            BoardEvent::HandleRetextured {
                handle: pawn.id,
                piece: promoted.piece
            }
        );
        registry.verify_against(&engine.board_snapshot()).unwrap();
    }
}
