//! aliasbox-tui library
//!
//! Exports the UI state machine and rendering so they can be tested
//! without a terminal.

pub mod app;
pub mod error;
pub mod session;
pub mod terminal;
pub mod ui;

// Re-export commonly used types
pub use app::{reduce, Focus, UiAction, UiState};
pub use error::{Result, TuiError};
