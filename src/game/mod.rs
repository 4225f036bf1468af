//! Board controller core - pure game logic with no rendering dependency
//!
//! Everything the interactive board needs short of drawing: square and move
//! types, the legality engine seam, the piece-handle registry kept in step
//! with the engine, and the controller aggregate that turns pointer presses
//! into committed moves.
//!
//! # Module Organization
//!
//! - `types` - squares, pieces, move descriptors
//! - `engine` - [`engine::MoveEngine`] trait and the shakmaty-backed engine
//! - `registry` - one visual handle per occupied square
//! - `selection` - selection state machine
//! - `hints` - legal-move marker computation
//! - `promotion` - promotion chooser state and layout
//! - `executor` - applies a committed move to engine and registry together
//! - `controller` - [`controller::BoardController`], the input entry point
//! - `events` - queue of visual side effects for the presentation layer
//! - `history` - committed moves and captured pieces
//!
//! # Data flow
//!
//! ```text
//! BoardInput ─▶ BoardController::dispatch ─▶ SelectionState::interpret
//!                         │
//!                         ├─▶ HintRenderer / PromotionChooser
//!                         └─▶ executor::execute ─▶ MoveEngine + PieceRegistry
//!                                                         │
//!                         presentation layer ◀── EventQueue
//! ```

pub mod controller;
pub mod engine;
pub mod error;
pub mod events;
pub mod executor;
pub mod hints;
pub mod history;
pub mod promotion;
pub mod registry;
pub mod selection;
pub mod types;

pub use controller::{BoardController, BoardInput, ControllerSettings, GameOutcome};
pub use engine::{EngineError, MoveEngine, ShakmatyEngine};
pub use error::{GameError, GameResult};
pub use events::BoardEvent;
