//! In-memory `KeyValueStore` for tests and development.
//!
//! Keeps values as raw JSON text so tests can plant corrupt payloads and
//! verify they read back as absent.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::warn;

use crate::error::StoreError;
use crate::store::traits::KeyValueStore;

/// In-memory key/value store. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write raw text under `key`, bypassing serialization.
    ///
    /// Lets tests simulate a corrupted durable payload.
    pub async fn insert_raw(&self, key: &str, text: &str) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), text.to_string());
    }

    /// Number of stored keys (test helper).
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Clear all entries (test helper).
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn put(&self, key: &str, value: &serde_json::Value) -> Result<(), StoreError> {
        let text =
            serde_json::to_string(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.entries.write().await.insert(key.to_string(), text);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(text) => match serde_json::from_str(text) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    warn!(key, error = %e, "Stored payload is not valid JSON");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    async fn remove(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.entries.write().await.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn roundtrip_and_overwrite() {
        let store = MemoryStore::new();
        store
            .put("companyInfo", &serde_json::json!({"name": "Acme"}))
            .await
            .unwrap();
        store
            .put("companyInfo", &serde_json::json!({"name": "Globex"}))
            .await
            .unwrap();

        let loaded = store.get("companyInfo").await.unwrap().unwrap();
        assert_eq!(loaded["name"], "Globex");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn unwritten_key_is_absent() {
        let store = MemoryStore::new();
        assert_eq!(store.get("chatbotConfig").await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_payload_is_absent() {
        let store = MemoryStore::new();
        store.insert_raw("chatbotConfig", "{definitely not json").await;
        assert_eq!(store.get("chatbotConfig").await.unwrap(), None);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();

        store
            .put("testChatbotMessageCount", &serde_json::json!(7))
            .await
            .unwrap();

        assert_eq!(
            other.get("testChatbotMessageCount").await.unwrap(),
            Some(serde_json::json!(7))
        );
    }
}
