//! Core data types for aliasbox

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Base domain used when neither the config nor the store provides one.
pub const DEFAULT_BASE_DOMAIN: &str = "disposable.io";

/// A generated disposable email address
///
/// The `id` is the address itself and is the unique key used for notes
/// and persistence. Aliases are immutable once created; they are only
/// ever removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alias {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

impl Alias {
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            created_at,
        }
    }

    /// Part before the `@`
    pub fn local_part(&self) -> &str {
        self.id.split_once('@').map(|(local, _)| local).unwrap_or(&self.id)
    }

    /// Part after the `@`, empty if the id has none
    pub fn host(&self) -> &str {
        self.id.split_once('@').map(|(_, host)| host).unwrap_or("")
    }
}

/// A user note attached to an alias
///
/// Notes are kept in a map keyed by alias id while the application runs;
/// this is the shape they are stored and loaded in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEntry {
    pub id: String,
    pub text: String,
}

impl NoteEntry {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

impl From<(String, String)> for NoteEntry {
    fn from((id, text): (String, String)) -> Self {
        Self { id, text }
    }
}

impl From<NoteEntry> for (String, String) {
    fn from(entry: NoteEntry) -> Self {
        (entry.id, entry.text)
    }
}

/// User settings, a singleton persisted on every change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub auto_clipboard_enabled: bool,
    pub base_domain: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_clipboard_enabled: true,
            base_domain: DEFAULT_BASE_DOMAIN.to_string(),
        }
    }
}
