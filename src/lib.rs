pub mod core;
pub mod game;

#[cfg(feature = "frontend")]
pub mod frontend;
