//! Store contract tests
//!
//! Covers the collection-level operations on both backends and verifies
//! that backend failures and malformed blobs never escape the store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use libaliasbox::error::DbError;
use libaliasbox::store::{KvBackend, MemoryBackend, Store, ALIASES_KEY, NOTES_KEY, SETTINGS_KEY};
use libaliasbox::types::{Alias, NoteEntry, Settings};
use libaliasbox::Effect;
use tempfile::TempDir;

fn aliases() -> Vec<Alias> {
    let created_at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    vec![
        Alias::new("a@disposable.io", created_at),
        Alias::new("b@disposable.io", created_at),
        Alias::new("c@example.org", created_at),
    ]
}

/// Backend whose every operation fails
struct BrokenBackend;

#[async_trait]
impl KvBackend for BrokenBackend {
    async fn get(&self, _key: &str) -> Result<Option<String>, DbError> {
        Err(DbError::IoError(std::io::Error::other("disk on fire")))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), DbError> {
        Err(DbError::IoError(std::io::Error::other("disk on fire")))
    }

    async fn delete(&self, _key: &str) -> Result<(), DbError> {
        Err(DbError::IoError(std::io::Error::other("disk on fire")))
    }
}

#[tokio::test]
async fn test_alias_collection_round_trip() {
    let store = Store::memory();
    store.save_alias_collection(&aliases()).await;

    let loaded = store.load_aliases().await;
    assert_eq!(loaded, aliases());
}

#[tokio::test]
async fn test_sqlite_round_trip_across_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("aliases.db");
    let db_path = db_path.to_str().unwrap();

    {
        let store = Store::sqlite(db_path).await.unwrap();
        store.save_alias_collection(&aliases()).await;
        store.save_note("a@disposable.io", "shopping").await;
        store
            .save_settings(&Settings {
                auto_clipboard_enabled: false,
                base_domain: "example.org".to_string(),
            })
            .await;
    }

    let store = Store::sqlite(db_path).await.unwrap();
    let ids: Vec<String> = store.load_aliases().await.into_iter().map(|a| a.id).collect();
    assert_eq!(ids, vec!["a@disposable.io", "b@disposable.io", "c@example.org"]);
    assert_eq!(
        store.load_notes().await,
        vec![NoteEntry::new("a@disposable.io", "shopping")]
    );
    assert_eq!(
        store.load_settings().await.map(|s| s.base_domain),
        Some("example.org".to_string())
    );
}

#[tokio::test]
async fn test_empty_store_loads_empty() {
    let store = Store::memory();

    assert!(store.load_aliases().await.is_empty());
    assert!(store.load_notes().await.is_empty());
    assert_eq!(store.load_settings().await, None);
}

#[tokio::test]
async fn test_delete_alias_and_all() {
    let store = Store::memory();
    store.save_alias_collection(&aliases()).await;

    store.delete_alias("b@disposable.io").await;
    let ids: Vec<String> = store.load_aliases().await.into_iter().map(|a| a.id).collect();
    assert_eq!(ids, vec!["a@disposable.io", "c@example.org"]);

    store.delete_all_aliases().await;
    assert!(store.load_aliases().await.is_empty());
}

#[tokio::test]
async fn test_notes_upsert_and_delete() {
    let store = Store::memory();
    store.save_note("a@x.io", "first").await;
    store.save_note("b@x.io", "other").await;
    store.save_note("a@x.io", "second").await;

    assert_eq!(
        store.load_notes().await,
        vec![NoteEntry::new("a@x.io", "second"), NoteEntry::new("b@x.io", "other")]
    );

    store.delete_note("a@x.io").await;
    store.delete_note("missing@x.io").await;
    assert_eq!(store.load_notes().await, vec![NoteEntry::new("b@x.io", "other")]);
}

#[tokio::test]
async fn test_malformed_blobs_load_as_empty() {
    let backend = Arc::new(MemoryBackend::new());
    backend.set(ALIASES_KEY, "{not json").await.unwrap();
    backend.set(NOTES_KEY, "42").await.unwrap();
    backend.set(SETTINGS_KEY, "[]").await.unwrap();

    let store = Store::from_backend(backend);
    assert!(store.load_aliases().await.is_empty());
    assert!(store.load_notes().await.is_empty());
    assert_eq!(store.load_settings().await, None);
}

#[tokio::test]
async fn test_backend_failures_are_swallowed() {
    let store = Store::new(BrokenBackend);

    store.save_alias_collection(&aliases()).await;
    store.save_note("a@x.io", "text").await;
    store.save_settings(&Settings::default()).await;
    store.delete_alias("a@x.io").await;
    store.delete_all_aliases().await;
    store.delete_note("a@x.io").await;

    assert!(store.load_aliases().await.is_empty());
    assert!(store.load_notes().await.is_empty());
    assert_eq!(store.load_settings().await, None);
}

#[tokio::test]
async fn test_apply_dispatches_persistence_effects() {
    let backend = Arc::new(MemoryBackend::new());
    let store = Store::from_backend(backend.clone());

    store.apply(&Effect::SaveAliases(aliases())).await;
    store.apply(&Effect::SaveSettings(Settings::default())).await;
    store
        .apply(&Effect::SaveNote {
            id: "a@disposable.io".to_string(),
            text: "note".to_string(),
        })
        .await;
    store.apply(&Effect::CopyToClipboard("ignored".to_string())).await;

    let snapshot = backend.snapshot().await;
    assert_eq!(snapshot.len(), 3);
    assert!(snapshot[SETTINGS_KEY].contains("baseDomain"));

    store.apply(&Effect::DeleteAllAliases).await;
    assert!(!backend.snapshot().await.contains_key(ALIASES_KEY));
}
