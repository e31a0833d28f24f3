//! UI application module
//!
//! Wraps the core state machine from `libaliasbox` with what only the
//! terminal front end cares about: focus, selection, edit buffers, help.
//!
//! - Actions: key presses, editor text and forwarded core actions
//! - State: `UiState` around the core `AppState`
//! - Reducer: `(UiState, UiAction) -> (UiState, Vec<Effect>)`

pub mod actions;
pub mod event;
pub mod reducer;
pub mod state;

pub use actions::UiAction;
pub use reducer::reduce;
pub use state::{Focus, UiState};
