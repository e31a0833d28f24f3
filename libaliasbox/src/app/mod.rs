//! Application core
//!
//! - Actions: what can happen
//! - State: what is true right now
//! - Effects: what the outside world should do about it
//! - Reducer: `(State, Action) -> (State, Effects)`
//!
//! Front ends own an `AppState`, feed actions through `reduce` and hand the
//! resulting effects to `runtime::EffectRunner`.

pub mod actions;
pub mod effects;
pub mod reducer;
pub mod state;

pub use actions::Action;
pub use effects::Effect;
pub use reducer::reduce;
pub use state::AppState;
