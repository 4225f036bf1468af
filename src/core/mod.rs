//! Core module - application infrastructure shared by both binaries
//!
//! - `error` - [`CoreError`] for settings I/O and logging setup
//! - `settings` - [`GameSettings`], persisted as JSON in the user's config dir
//! - `logging` - tracing subscriber installation

pub mod error;
pub mod logging;
pub mod settings;

pub use error::{CoreError, CoreResult};
pub use settings::GameSettings;
