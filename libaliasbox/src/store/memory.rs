//! In-process key-value backend
//!
//! Used by tests and `--ephemeral` runs. Contents die with the process.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::KvBackend;
use crate::error::DbError;

#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored blob
    pub async fn snapshot(&self) -> HashMap<String, String> {
        self.entries.lock().await.clone()
    }
}

#[async_trait]
impl KvBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, DbError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DbError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), DbError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}
