//! Shared helpers for integration tests
#![allow(dead_code)]

use hotseat_board::game::engine::{EngineError, MoveEngine, ShakmatyEngine};
use hotseat_board::game::types::{
    BoardSnapshot, Move, MoveRequest, Piece, PieceColor, Square,
};
use hotseat_board::game::{BoardController, BoardEvent, BoardInput, ControllerSettings};

pub fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

/// How the scripted engine answers `apply_move`
#[derive(Clone, Debug, Default)]
pub enum Script {
    /// Delegate to shakmaty
    #[default]
    Honest,
    /// Refuse every move through the error channel
    Fail,
    /// Play the real move but report `reported` instead
    Misreport { reported: Move },
}

/// Shakmaty-backed engine that records requests and can misbehave on cue
#[derive(Clone, Debug, Default)]
pub struct ScriptedEngine {
    pub inner: ShakmatyEngine,
    pub script: Script,
    pub applied: Vec<MoveRequest>,
}

impl ScriptedEngine {
    pub fn from_fen(fen: &str) -> Self {
        Self {
            inner: ShakmatyEngine::from_fen(fen).unwrap(),
            ..Self::default()
        }
    }
}

impl MoveEngine for ScriptedEngine {
    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.inner.piece_at(square)
    }

    fn legal_moves(&self, square: Square) -> Vec<Move> {
        self.inner.legal_moves(square)
    }

    fn apply_move(&mut self, request: MoveRequest) -> Result<Option<Move>, EngineError> {
        match &self.script {
            Script::Honest => {
                let result = self.inner.apply_move(request)?;
                if result.is_some() {
                    self.applied.push(request);
                }
                Ok(result)
            }
            Script::Fail => Err(EngineError::Rejected {
                message: "scripted failure".to_string(),
            }),
            Script::Misreport { reported } => {
                let reported = *reported;
                let played = self.inner.apply_move(request)?;
                if played.is_some() {
                    self.applied.push(request);
                }
                Ok(played.map(|_| reported))
            }
        }
    }

    fn is_in_check(&self) -> bool {
        self.inner.is_in_check()
    }

    fn is_checkmate(&self) -> bool {
        self.inner.is_checkmate()
    }

    fn side_to_move(&self) -> PieceColor {
        self.inner.side_to_move()
    }

    fn board_snapshot(&self) -> BoardSnapshot {
        self.inner.board_snapshot()
    }
}

pub fn standard() -> BoardController {
    let mut controller = BoardController::standard(ControllerSettings::default());
    controller.drain_events();
    controller
}

pub fn from_fen<E: MoveEngine>(engine: E, settings: ControllerSettings) -> BoardController<E> {
    let mut controller = BoardController::new(engine, settings);
    controller.drain_events();
    controller
}

pub fn press<E: MoveEngine>(controller: &mut BoardController<E>, square: &str) -> Vec<BoardEvent> {
    controller.dispatch(BoardInput::SquarePressed(sq(square)));
    controller.drain_events()
}

/// Press the two squares of a coordinate move like `e2e4`
pub fn play<E: MoveEngine>(controller: &mut BoardController<E>, uci: &str) -> Vec<BoardEvent> {
    let (from, to) = uci.split_at(2);
    let mut events = press(controller, from);
    events.extend(press(controller, to));
    events
}

/// Play a sequence, asserting every move commits and the registry stays in sync
pub fn play_all<E: MoveEngine>(controller: &mut BoardController<E>, moves: &[&str]) -> Vec<BoardEvent> {
    let mut last = Vec::new();
    for uci in moves {
        last = play(controller, uci);
        assert!(
            last.iter()
                .any(|event| matches!(event, BoardEvent::MoveCommitted(_))),
            "{} did not commit: {:?}",
            uci,
            last
        );
        controller
            .verify_sync()
            .unwrap_or_else(|e| panic!("registry out of sync after {}: {}", uci, e));
    }
    last
}

pub fn moved_count(events: &[BoardEvent]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, BoardEvent::HandleMoved { .. }))
        .count()
}

pub fn handle_squares<E: MoveEngine>(controller: &BoardController<E>) -> Vec<(Square, Piece)> {
    controller
        .registry()
        .iter()
        .map(|handle| (handle.square, handle.piece))
        .collect()
}
