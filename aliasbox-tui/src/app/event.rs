//! Event handling
//!
//! Polls crossterm for terminal events and decides which keys the text
//! editor should see before the reducer does.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};

use super::actions::UiAction;
use super::state::{Focus, UiState};

/// Terminal events the UI loop cares about
#[derive(Debug, Clone, PartialEq)]
pub enum TuiEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    /// No input within the tick rate
    Tick,
}

impl From<TuiEvent> for UiAction {
    fn from(event: TuiEvent) -> Self {
        match event {
            TuiEvent::Key(key) => UiAction::Key(key),
            TuiEvent::Resize(w, h) => UiAction::Resize(w, h),
            TuiEvent::Tick => UiAction::Tick,
        }
    }
}

/// Where a key press goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRoute {
    /// Into the focused text editor
    Editor,
    /// Into the reducer as `UiAction::Key`
    Reducer,
}

/// Route a key based on focus
///
/// Editors get everything except the keys that drive the UI itself
/// (submit, focus changes, help, quit).
pub fn route_key(state: &UiState, key: &KeyEvent) -> KeyRoute {
    if state.help_visible || !state.focus.accepts_text() {
        return KeyRoute::Reducer;
    }

    let reserved = matches!(
        (key.code, key.modifiers),
        (KeyCode::Enter, _)
            | (KeyCode::Tab, _)
            | (KeyCode::BackTab, _)
            | (KeyCode::Esc, _)
            | (KeyCode::F(_), _)
            | (KeyCode::Char('c'), KeyModifiers::CONTROL)
    );
    let leaves_input = state.focus == Focus::Input && key.code == KeyCode::Down;

    if reserved || leaves_input {
        KeyRoute::Reducer
    } else {
        KeyRoute::Editor
    }
}

/// Event handler that polls for terminal events
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Wait up to one tick for the next event
    pub fn next(&self) -> std::io::Result<TuiEvent> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) => Ok(TuiEvent::Key(key)),
                CrosstermEvent::Resize(w, h) => Ok(TuiEvent::Resize(w, h)),
                // Mouse, focus and paste events are ignored
                _ => Ok(TuiEvent::Tick),
            }
        } else {
            Ok(TuiEvent::Tick)
        }
    }
}
