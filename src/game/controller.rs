//! Board controller - the single owned aggregate behind the board
//!
//! Owns the engine, the piece registry, the selection state, the hint and
//! promotion-chooser state and the outgoing event queue. Every pointer
//! interaction enters through [`BoardController::dispatch`], runs to
//! completion synchronously, and leaves its visual side effects in the event
//! queue for the presentation layer to drain.
//!
//! # Game over
//!
//! Checkmate is recorded as a [`GameOutcome`] and announced once through
//! [`BoardEvent::Checkmate`]. With `freeze_on_game_over` set, all further
//! input is ignored.

use crate::game::engine::{MoveEngine, ShakmatyEngine};
use crate::game::error::{GameError, GameResult};
use crate::game::events::{BoardEvent, EventQueue};
use crate::game::executor;
use crate::game::hints::HintRenderer;
use crate::game::history::MoveHistory;
use crate::game::promotion::{PendingPromotion, PromotionChooser};
use crate::game::registry::{ControllerId, HandleId, PieceRegistry};
use crate::game::selection::{Intent, SelectionState};
use crate::game::types::{Move, MoveRequest, Piece, PieceColor, PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{debug, info, warn};

static NEXT_CONTROLLER_ID: AtomicU32 = AtomicU32::new(0);

/// Behaviour switches for the controller
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    /// Show legal-move markers for the selected piece
    pub show_hints: bool,
    /// Ignore all input once the game is decided
    pub freeze_on_game_over: bool,
    /// A board press outside the chooser abandons a pending promotion
    pub cancel_promotion_on_board_click: bool,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            show_hints: true,
            freeze_on_game_over: true,
            cancel_promotion_on_board_click: false,
        }
    }
}

/// Pointer input, already mapped to the board by the input adapter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardInput {
    /// Press on a board square (background or marker)
    SquarePressed(Square),
    /// Press on a piece handle
    HandlePressed(HandleId),
    /// A kind was picked in the promotion chooser
    PromotionPicked(PieceKind),
    /// The promotion chooser was dismissed without a pick
    PromotionCancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GameOutcome {
    Checkmate { winner: PieceColor },
}

impl GameOutcome {
    pub fn winner(&self) -> Option<PieceColor> {
        match *self {
            GameOutcome::Checkmate { winner } => Some(winner),
        }
    }
}

/// Controller aggregate: engine + registry + selection
pub struct BoardController<E: MoveEngine = ShakmatyEngine> {
    engine: E,
    registry: PieceRegistry,
    selection: SelectionState,
    hints: HintRenderer,
    chooser: PromotionChooser,
    history: MoveHistory,
    events: EventQueue,
    settings: ControllerSettings,
    outcome: Option<GameOutcome>,
}

impl BoardController<ShakmatyEngine> {
    /// Hotseat game from the standard starting position
    pub fn standard(settings: ControllerSettings) -> Self {
        Self::new(ShakmatyEngine::new(), settings)
    }
}

impl<E: MoveEngine> BoardController<E> {
    /// Wrap `engine`, creating one handle per occupied square
    pub fn new(engine: E, settings: ControllerSettings) -> Self {
        let owner = ControllerId(NEXT_CONTROLLER_ID.fetch_add(1, Ordering::Relaxed));
        let registry = PieceRegistry::from_snapshot(owner, &engine.board_snapshot());
        let mut events = EventQueue::default();
        for handle in registry.iter() {
            events.push(BoardEvent::HandleSpawned(*handle));
        }
        info!(
            "[GAME] Controller {:?} ready, {} to move",
            owner,
            engine.side_to_move().name()
        );
        Self {
            engine,
            registry,
            selection: SelectionState::Idle,
            hints: HintRenderer::default(),
            chooser: PromotionChooser::default(),
            history: MoveHistory::default(),
            events,
            settings,
            outcome: None,
        }
    }

    /// Single input entry point
    pub fn dispatch(&mut self, input: BoardInput) {
        if self.outcome.is_some() && self.settings.freeze_on_game_over {
            debug!("[INPUT] Game over, ignoring {:?}", input);
            return;
        }
        match input {
            BoardInput::SquarePressed(square) => self.on_square_pressed(square),
            BoardInput::HandlePressed(id) => match self.registry.square_of(id) {
                Some(square) => self.on_square_pressed(square),
                None => warn!("[INPUT] Press on unknown handle {}", id),
            },
            BoardInput::PromotionPicked(kind) => self.on_promotion_picked(kind),
            BoardInput::PromotionCancelled => self.cancel_promotion(),
        }
    }

    fn on_square_pressed(&mut self, square: Square) {
        let occupant = self.engine.piece_at(square).map(|piece| piece.color);
        let intent = self
            .selection
            .interpret(square, occupant, self.engine.side_to_move());
        debug!("[INPUT] {} pressed in {:?} -> {:?}", square, self.selection, intent);

        match intent {
            Intent::Ignore => {}
            Intent::Select(square) => self.select(square),
            Intent::Deselect => {
                self.clear_hints();
                self.selection = SelectionState::Idle;
            }
            Intent::AttemptMove { from, to } => self.attempt_move(from, to),
            Intent::PromotionBoardPress(square) => {
                let picked = self.chooser.layout().and_then(|layout| layout.option_at(square));
                if let Some(kind) = picked {
                    self.on_promotion_picked(kind);
                } else if self.settings.cancel_promotion_on_board_click {
                    self.cancel_promotion();
                } else {
                    debug!("[INPUT] Promotion pending, ignoring press on {}", square);
                }
            }
        }
    }

    fn select(&mut self, square: Square) {
        self.clear_hints();
        self.selection = SelectionState::Selected(square);
        let moves = if self.settings.show_hints {
            self.engine.legal_moves(square)
        } else {
            Vec::new()
        };
        let set = self.hints.show(square, &moves, &self.registry);
        self.events.push(BoardEvent::HintsShown(set));
    }

    fn clear_hints(&mut self) {
        if self.hints.clear() {
            self.events.push(BoardEvent::HintsCleared);
        }
    }

    fn attempt_move(&mut self, from: Square, to: Square) {
        self.clear_hints();
        self.selection = SelectionState::Idle;

        let reaches_last_rank = self
            .engine
            .legal_moves(from)
            .iter()
            .any(|mv| mv.to == to && mv.is_promotion());
        if reaches_last_rank {
            self.open_promotion(from, to);
            return;
        }

        self.commit(MoveRequest::new(from, to));
    }

    fn open_promotion(&mut self, from: Square, to: Square) {
        let Some(pawn) = self.registry.get(from).copied() else {
            self.reject(from, to, GameError::MissingExpectedPiece { square: from });
            return;
        };
        let pending = PendingPromotion {
            from,
            to,
            pawn: pawn.id,
            color: pawn.piece.color,
        };
        if let Some(layout) = self.chooser.open(pending) {
            self.selection = SelectionState::AwaitingPromotion {
                from,
                to,
                pawn: pawn.id,
            };
            self.events.push(BoardEvent::PromotionChooserShown(layout));
        }
    }

    fn on_promotion_picked(&mut self, kind: PieceKind) {
        let Some(pending) = self.chooser.close() else {
            debug!("[PROMOTION] No chooser open, ignoring pick of {:?}", kind);
            return;
        };
        self.events.push(BoardEvent::PromotionChooserDismissed);
        self.selection = SelectionState::Idle;

        if !kind.is_promotion_choice() {
            self.reject(pending.from, pending.to, GameError::InvalidPromotionKind { kind });
            return;
        }
        if self.registry.get(pending.from).map(|handle| handle.id) != Some(pending.pawn) {
            self.reject(
                pending.from,
                pending.to,
                GameError::MissingExpectedPiece {
                    square: pending.from,
                },
            );
            return;
        }
        info!("[PROMOTION] {}{} promotes to {:?}", pending.from, pending.to, kind);
        self.commit(MoveRequest::with_promotion(pending.from, pending.to, kind));
    }

    fn cancel_promotion(&mut self) {
        if let Some(pending) = self.chooser.close() {
            info!("[PROMOTION] Promotion {}{} abandoned", pending.from, pending.to);
            self.events.push(BoardEvent::PromotionChooserDismissed);
            self.selection = SelectionState::Idle;
        }
    }

    fn commit(&mut self, request: MoveRequest) {
        match executor::execute(&mut self.engine, &mut self.registry, &mut self.events, request) {
            Ok(mv) => self.after_commit(mv),
            Err(err @ GameError::EngineSync { .. }) => {
                warn!("[MOVE] {}{} resynced: {}", request.from, request.to, err);
                self.events.push(BoardEvent::PositionResynced {
                    from: request.from,
                    to: request.to,
                    reason: err.to_string(),
                });
                self.signal_position();
            }
            Err(err) => self.reject(request.from, request.to, err),
        }
    }

    fn reject(&mut self, from: Square, to: Square, err: GameError) {
        warn!("[MOVE] {}{} not played: {}", from, to, err);
        self.events.push(BoardEvent::MoveRejected {
            from,
            to,
            reason: err.to_string(),
        });
    }

    fn after_commit(&mut self, mv: Move) {
        let record = self.history.push(
            mv,
            self.engine.is_in_check(),
            self.engine.is_checkmate(),
        );
        info!("[MOVE] {}. {} {}", record.move_number, record.side.name(), mv);
        self.events.push(BoardEvent::MoveCommitted(record));
        self.signal_position();
    }

    /// Check/checkmate signal for the position the engine now holds
    fn signal_position(&mut self) {
        if self.engine.is_checkmate() {
            self.declare_checkmate();
        } else if self.engine.is_in_check() {
            let side = self.engine.side_to_move();
            info!("[GAME] {} is in check", side.name());
            self.events.push(BoardEvent::Check { side });
        }
    }

    fn declare_checkmate(&mut self) {
        let loser = self.engine.side_to_move();
        let winner = loser.opposite();
        let king = self
            .registry
            .iter()
            .find(|handle| handle.piece == Piece::new(PieceKind::King, loser))
            .copied();
        if king.is_none() {
            warn!(
                "[GAME] {}",
                GameError::EngineSync {
                    message: format!("no {} king handle to mark", loser.name()),
                }
            );
        }
        let message = format!("Checkmate! {} wins!", winner.name());
        info!("[GAME] {}", message);
        self.outcome = Some(GameOutcome::Checkmate { winner });
        self.events.push(BoardEvent::Checkmate {
            winner,
            king: king.map(|handle| handle.id),
            king_square: king.map(|handle| handle.square),
            message,
        });
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        self.events.drain()
    }

    /// Check the registry against the engine's board
    pub fn verify_sync(&self) -> GameResult<()> {
        self.registry.verify_against(&self.engine.board_snapshot())
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn registry(&self) -> &PieceRegistry {
        &self.registry
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn hints(&self) -> &HintRenderer {
        &self.hints
    }

    pub fn chooser(&self) -> &PromotionChooser {
        &self.chooser
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn side_to_move(&self) -> PieceColor {
        self.engine.side_to_move()
    }
}
