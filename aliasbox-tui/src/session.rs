//! Glue between the UI reducer and the effect runtime
//!
//! The main loop feeds every action through `apply`, drains the runtime's
//! actions after each event, and hands the final state to `finish` on quit.

use libaliasbox::{AppState, EffectRunner};

use crate::app::{reduce, UiAction, UiState};

/// Reduce one action and queue its effects
pub fn apply(runner: &EffectRunner, state: UiState, action: UiAction) -> UiState {
    let (state, effects) = reduce(state, action);
    runner.run(effects);
    state
}

/// Fold in whatever the runtime has sent back so far (loads, commits)
pub fn drain(runner: &EffectRunner, mut state: UiState) -> UiState {
    while let Ok(action) = runner.actions().try_recv() {
        state = apply(runner, state, UiAction::Core(action));
    }
    state
}

/// Commit generations still waiting on a timestamp, then stop the runtime
///
/// Returns the final core state; every write it implies has landed.
pub fn finish(runner: EffectRunner, state: UiState) -> AppState {
    let core = runner.settle(state.core);
    tracing::info!(
        aliases = core.aliases.len(),
        pending = core.pending.len(),
        "session finished"
    );
    runner.shutdown();
    core
}
