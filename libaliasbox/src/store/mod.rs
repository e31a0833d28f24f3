//! Persistence for aliases, notes and settings
//!
//! Storage is split in two layers:
//!
//! - [`KvBackend`]: the injected key-value seam (`get`/`set`/`delete` on
//!   string blobs). Backends report failures.
//! - [`Store`]: the collection-level contract the runtime uses. It keeps
//!   each collection as a JSON blob under a fixed key and swallows every
//!   failure: loads come back empty or absent, writes are logged and
//!   dropped. Nothing from here ever reaches the reducer as an error.
//!
//! # Example
//!
//! ```no_run
//! use libaliasbox::store::Store;
//!
//! # async fn example() -> libaliasbox::Result<()> {
//! let store = Store::sqlite("~/.local/share/aliasbox/aliases.db").await?;
//! let aliases = store.load_aliases().await;
//! println!("{} aliases stored", aliases.len());
//! # Ok(())
//! # }
//! ```

pub mod memory;
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::app::Effect;
use crate::error::DbError;
use crate::types::{Alias, NoteEntry, Settings};

pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

pub const ALIASES_KEY: &str = "aliases";
pub const NOTES_KEY: &str = "notes";
pub const SETTINGS_KEY: &str = "settings";

/// Key-value storage backend
#[async_trait]
pub trait KvBackend: Send + Sync {
    /// Read the blob stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>, DbError>;

    /// Store `value` under `key`, replacing any previous blob
    async fn set(&self, key: &str, value: &str) -> Result<(), DbError>;

    /// Remove `key`; removing a missing key is not an error
    async fn delete(&self, key: &str) -> Result<(), DbError>;
}

/// Collection-level store over a [`KvBackend`]
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn KvBackend>,
}

impl Store {
    pub fn new<B: KvBackend + 'static>(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn from_backend(backend: Arc<dyn KvBackend>) -> Self {
        Self { backend }
    }

    /// In-process store, nothing survives the process
    pub fn memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// SQLite-backed store at `path` (`~` is expanded)
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub async fn sqlite(path: &str) -> crate::Result<Self> {
        let backend = SqliteBackend::open(path).await?;
        Ok(Self::new(backend))
    }

    pub async fn load_aliases(&self) -> Vec<Alias> {
        self.read_json(ALIASES_KEY).await.unwrap_or_default()
    }

    pub async fn save_alias_collection(&self, aliases: &[Alias]) {
        self.write_json(ALIASES_KEY, aliases).await;
    }

    pub async fn delete_alias(&self, id: &str) {
        let mut aliases = self.load_aliases().await;
        let before = aliases.len();
        aliases.retain(|alias| alias.id != id);
        if aliases.len() != before {
            self.save_alias_collection(&aliases).await;
        }
    }

    pub async fn delete_all_aliases(&self) {
        if let Err(e) = self.backend.delete(ALIASES_KEY).await {
            tracing::warn!(error = %e, "failed to delete aliases");
        }
    }

    pub async fn load_notes(&self) -> Vec<NoteEntry> {
        self.read_json(NOTES_KEY).await.unwrap_or_default()
    }

    pub async fn save_note(&self, id: &str, text: &str) {
        let mut notes = self.load_notes().await;
        match notes.iter_mut().find(|note| note.id == id) {
            Some(note) => note.text = text.to_string(),
            None => notes.push(NoteEntry::new(id, text)),
        }
        self.write_json(NOTES_KEY, &notes).await;
    }

    pub async fn delete_note(&self, id: &str) {
        let mut notes = self.load_notes().await;
        let before = notes.len();
        notes.retain(|note| note.id != id);
        if notes.len() != before {
            self.write_json(NOTES_KEY, &notes).await;
        }
    }

    pub async fn load_settings(&self) -> Option<Settings> {
        self.read_json(SETTINGS_KEY).await
    }

    pub async fn save_settings(&self, settings: &Settings) {
        self.write_json(SETTINGS_KEY, settings).await;
    }

    /// Carry out a persistence effect; other effects are ignored
    pub async fn apply(&self, effect: &Effect) {
        match effect {
            Effect::SaveAliases(aliases) => self.save_alias_collection(aliases).await,
            Effect::DeleteAlias(id) => self.delete_alias(id).await,
            Effect::DeleteAllAliases => self.delete_all_aliases().await,
            Effect::SaveNote { id, text } => self.save_note(id, text).await,
            Effect::DeleteNote(id) => self.delete_note(id).await,
            Effect::SaveSettings(settings) => self.save_settings(settings).await,
            Effect::CopyToClipboard(_) | Effect::RequestTimestamp { .. } => {}
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read from store");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "malformed stored value treated as empty");
                None
            }
        }
    }

    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to serialize value");
                return;
            }
        };

        if let Err(e) = self.backend.set(key, &raw).await {
            tracing::warn!(key, error = %e, "failed to write to store");
        }
    }
}
