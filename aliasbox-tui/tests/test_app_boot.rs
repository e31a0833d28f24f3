//! Test application boot and the runtime round trip
//!
//! Drives the UI reducer the way the main loop does, with the effect
//! runtime on an in-memory store.

use std::sync::Arc;

use aliasbox_tui::app::{reduce, Focus, UiAction, UiState};
use aliasbox_tui::session;
use chrono::{TimeZone, Utc};
use libaliasbox::clipboard::MemoryClipboard;
use libaliasbox::runtime::{EffectRunner, FixedClock};
use libaliasbox::{Alias, AppState, Settings, Store};

fn runner(store: Store, clipboard: Arc<MemoryClipboard>) -> EffectRunner {
    let created_at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    EffectRunner::with_store(store, clipboard, Arc::new(FixedClock(created_at))).unwrap()
}

/// One main-loop iteration without the terminal
fn step(runner: &EffectRunner, state: UiState, action: UiAction) -> UiState {
    let (mut state, effects) = reduce(state, action);
    runner.run(effects);
    runner.flush();
    while let Ok(action) = runner.actions().try_recv() {
        let (next, effects) = reduce(state, UiAction::Core(action));
        runner.run(effects);
        state = next;
    }
    state
}

#[test]
fn test_boot_defaults() {
    let state = UiState::default();

    assert_eq!(state.focus, Focus::Input);
    assert!(state.core.aliases.is_empty());
    assert!(state.status.is_none());
    assert_eq!(state.tick_rate_ms, 100);
}

#[test]
fn test_boot_loads_stored_state() {
    let store = Store::memory();
    let clipboard = Arc::new(MemoryClipboard::new());
    let runner = runner(store.clone(), clipboard);

    runner.block_on(async {
        store
            .save_alias_collection(&[Alias::new("a@x.io", Utc::now())])
            .await;
        store
            .save_settings(&Settings {
                auto_clipboard_enabled: false,
                base_domain: "x.io".to_string(),
            })
            .await;
    });

    runner.load_initial();
    let state = step(&runner, UiState::new(AppState::new(), 50), UiAction::Tick);

    assert_eq!(state.core.aliases.len(), 1);
    assert_eq!(state.core.settings.base_domain, "x.io");
}

#[test]
fn test_generate_selects_new_alias_and_copies() {
    let clipboard = Arc::new(MemoryClipboard::new());
    let runner = runner(Store::memory(), clipboard.clone());
    runner.load_initial();

    let state = step(&runner, UiState::default(), UiAction::TextChanged("a".to_string()));
    let state = step(&runner, state, UiAction::Key(enter()));
    let state = step(&runner, state, UiAction::Key(enter()));

    let ids: Vec<&str> = state.core.aliases.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a@disposable.io", "a-2@disposable.io"]);
    assert_eq!(state.selected, 1);
    assert_eq!(state.status.as_deref(), Some("Created a-2@disposable.io (copied)"));
    assert_eq!(clipboard.last().as_deref(), Some("a-2@disposable.io"));
}

#[test]
fn test_quit_commits_pending_generation() {
    let store = Store::memory();
    let clipboard = Arc::new(MemoryClipboard::new());
    let live = runner(store.clone(), clipboard);

    // Quit lands before the timestamp comes back
    let state = UiState::default();
    let state = session::apply(&live, state, UiAction::TextChanged("late".to_string()));
    let state = session::apply(&live, state, UiAction::Key(enter()));
    let state = session::apply(&live, state, UiAction::Quit);
    assert!(state.should_quit);
    assert_eq!(state.core.pending, vec!["late@disposable.io"]);

    let core = session::finish(live, state);

    assert!(core.pending.is_empty());
    assert_eq!(core.aliases.len(), 1);
    assert_eq!(core.aliases[0].id, "late@disposable.io");

    // A fresh runtime on the same store sees the committed alias
    let reader = runner(store.clone(), Arc::new(MemoryClipboard::new()));
    let stored = reader.block_on(store.load_aliases());
    let ids: Vec<&str> = stored.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["late@disposable.io"]);
}

fn enter() -> crossterm::event::KeyEvent {
    crossterm::event::KeyEvent::new(
        crossterm::event::KeyCode::Enter,
        crossterm::event::KeyModifiers::NONE,
    )
}
