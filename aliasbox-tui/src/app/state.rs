//! UI state
//!
//! The core `AppState` stays the source of truth for aliases, notes and
//! settings. Everything else here is view state.

use libaliasbox::{Alias, AppState};

/// Which widget receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Alias input field
    #[default]
    Input,
    /// Alias list
    List,
    /// Note editor for the selected alias
    Note,
    /// Base domain editor
    Domain,
}

impl Focus {
    /// Focus is on a text editor
    pub fn accepts_text(self) -> bool {
        !matches!(self, Focus::List)
    }

    /// Focus is on an editor opened from the list
    pub fn is_editing(self) -> bool {
        matches!(self, Focus::Note | Focus::Domain)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub core: AppState,

    pub focus: Focus,

    /// Index into `core.aliases`
    pub selected: usize,

    /// Buffer for the note and base domain editors
    pub draft: String,

    /// Alias whose note is being edited
    pub note_target: Option<String>,

    pub help_visible: bool,

    pub should_quit: bool,

    /// One-line feedback for the last operation
    pub status: Option<String>,

    /// Event poll interval
    pub tick_rate_ms: u64,
}

impl UiState {
    pub fn new(core: AppState, tick_rate_ms: u64) -> Self {
        Self {
            core,
            focus: Focus::default(),
            selected: 0,
            draft: String::new(),
            note_target: None,
            help_visible: false,
            should_quit: false,
            status: None,
            tick_rate_ms,
        }
    }

    pub fn selected_alias(&self) -> Option<&Alias> {
        self.core.aliases.get(self.selected)
    }

    /// Text the focused editor should show
    pub fn editor_text(&self) -> &str {
        match self.focus {
            Focus::Input => &self.core.input_value,
            Focus::Note | Focus::Domain => &self.draft,
            Focus::List => "",
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(AppState::new(), 100)
    }
}
