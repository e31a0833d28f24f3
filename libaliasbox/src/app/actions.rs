//! Actions for the reducer pattern
//!
//! Every state transition is triggered by an action. Actions come from the
//! user (through a front end) or from the effect runtime (loaded
//! collections, resolved timestamps).

use chrono::{DateTime, Utc};

use crate::types::{Alias, NoteEntry, Settings};

/// Actions that trigger state transitions
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // === Input ===
    /// Alias input field changed
    InputChanged(String),

    // === Generation ===
    /// Generate an alias from the current input
    GenerateRequested,

    /// Generate a sibling of an existing alias
    GenerateAdditionalRequested(String),

    /// Timestamp resolved for a pending candidate; commits the alias
    AliasCreated {
        alias_id: String,
        created_at: DateTime<Utc>,
    },

    // === Alias management ===
    /// Remove every alias
    ClearAll,

    /// Remove a single alias
    RemoveAlias(String),

    /// Aliases read from storage
    AliasesLoaded(Vec<Alias>),

    /// Copy arbitrary text (usually an alias id)
    CopyRequested(String),

    // === Notes ===
    /// Note text edited for an alias
    NoteChanged { id: String, text: String },

    /// Note explicitly cleared for an alias
    NoteCleared(String),

    /// Notes read from storage
    NotesLoaded(Vec<NoteEntry>),

    // === Settings ===
    AutoClipboardToggled(bool),

    BaseDomainSet(String),

    /// Settings read from storage, `None` when nothing was stored
    SettingsLoaded(Option<Settings>),
}

impl Action {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Action::InputChanged(_) => "input_changed",
            Action::GenerateRequested => "generate_requested",
            Action::GenerateAdditionalRequested(_) => "generate_additional_requested",
            Action::AliasCreated { .. } => "alias_created",
            Action::ClearAll => "clear_all",
            Action::RemoveAlias(_) => "remove_alias",
            Action::AliasesLoaded(_) => "aliases_loaded",
            Action::CopyRequested(_) => "copy_requested",
            Action::NoteChanged { .. } => "note_changed",
            Action::NoteCleared(_) => "note_cleared",
            Action::NotesLoaded(_) => "notes_loaded",
            Action::AutoClipboardToggled(_) => "auto_clipboard_toggled",
            Action::BaseDomainSet(_) => "base_domain_set",
            Action::SettingsLoaded(_) => "settings_loaded",
        }
    }
}
