//! Application state
//!
//! The single source of truth for a running session. All changes go
//! through the reducer (see `reducer.rs`).

use std::collections::HashMap;

use crate::types::{Alias, Settings};

/// Root application state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    /// Current contents of the alias input field
    pub input_value: String,

    /// Committed aliases, in insertion order
    pub aliases: Vec<Alias>,

    /// Notes keyed by alias id
    pub notes: HashMap<String, String>,

    pub settings: Settings,

    /// Candidate ids waiting for their creation timestamp
    pub pending: Vec<String>,

    /// Seed for the next random local part
    pub seed: u64,
}

impl AppState {
    /// Create state with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state seeded with initial settings (usually from config)
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Replace the random seed
    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.aliases.iter().any(|alias| alias.id == id)
    }

    pub fn note(&self, id: &str) -> Option<&str> {
        self.notes.get(id).map(String::as_str)
    }

    /// Ids a new candidate must not collide with: committed and pending
    pub fn taken_ids(&self) -> impl Iterator<Item = &str> {
        self.aliases
            .iter()
            .map(|alias| alias.id.as_str())
            .chain(self.pending.iter().map(String::as_str))
    }

    pub fn is_generating(&self) -> bool {
        !self.pending.is_empty()
    }
}
