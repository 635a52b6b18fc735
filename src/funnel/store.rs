//! ConfigurationStore — domain wrapper over the key/value store holding the
//! durable wizard aggregates.
//!
//! Reads degrade every failure to absence: a missing key, a corrupt payload,
//! and a backend error all hydrate as `None`, which callers treat as "not
//! ready". Writes are write-through on every edit; a failed write is logged
//! and otherwise silent.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::funnel::model::{ChatbotConfig, CompanyInfo, storage_keys};
use crate::store::KeyValueStore;

/// The hydrated pair of durable aggregates.
///
/// The recap step must not render interactive content unless
/// [`is_ready`](Self::is_ready) holds.
#[derive(Debug, Clone, Default)]
pub struct WizardSnapshot {
    pub config: Option<ChatbotConfig>,
    pub company: Option<CompanyInfo>,
}

impl WizardSnapshot {
    pub fn is_ready(&self) -> bool {
        self.config.is_some() && self.company.is_some()
    }
}

/// Sole writer of the durable wizard aggregates.
#[derive(Clone)]
pub struct ConfigurationStore {
    store: Arc<dyn KeyValueStore>,
}

impl ConfigurationStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load and deserialize one key, degrading any failure to `None`.
    async fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = match self.store.get(key).await {
            Ok(Some(value)) => value,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "Failed to read wizard state");
                return None;
            }
        };
        match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(key, error = %e, "Stored wizard state does not match its schema");
                None
            }
        }
    }

    /// Serialize and write one key. Failures are logged and swallowed:
    /// persistence problems are silent to the user.
    async fn save<T: serde::Serialize>(&self, key: &str, value: &T) {
        let json = match serde_json::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                warn!(key, error = %e, "Failed to serialize wizard state");
                return;
            }
        };
        if let Err(e) = self.store.put(key, &json).await {
            warn!(key, error = %e, "Failed to persist wizard state");
        }
    }

    /// Write through the chatbot configuration.
    pub async fn save_config(&self, config: &ChatbotConfig) {
        self.save(storage_keys::CHATBOT_CONFIG, config).await;
    }

    /// Write through the company information.
    pub async fn save_company(&self, company: &CompanyInfo) {
        self.save(storage_keys::COMPANY_INFO, company).await;
    }

    /// Write through the trial message counter.
    pub async fn save_trial_count(&self, count: u32) {
        self.save(storage_keys::TRIAL_MESSAGE_COUNT, &count).await;
    }

    /// Load the persisted trial counter; absent means the trial has not
    /// started.
    pub async fn load_trial_count(&self) -> u32 {
        self.load(storage_keys::TRIAL_MESSAGE_COUNT)
            .await
            .unwrap_or(0)
    }

    /// Load both aggregates, called once per page mount. Absence of either
    /// means "not ready", never an error.
    pub async fn hydrate(&self) -> WizardSnapshot {
        WizardSnapshot {
            config: self.load(storage_keys::CHATBOT_CONFIG).await,
            company: self.load(storage_keys::COMPANY_INFO).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn acme() -> CompanyInfo {
        CompanyInfo {
            name: "Acme".to_string(),
            industry: "Retail".to_string(),
            description: "Everything store".to_string(),
            contact_email: "hello@acme.test".to_string(),
            website: Some("https://acme.test".to_string()),
        }
    }

    #[tokio::test]
    async fn hydrate_fresh_store_is_not_ready() {
        let store = ConfigurationStore::new(Arc::new(MemoryStore::new()));
        let snapshot = store.hydrate().await;
        assert!(snapshot.config.is_none());
        assert!(snapshot.company.is_none());
        assert!(!snapshot.is_ready());
    }

    #[tokio::test]
    async fn config_roundtrips_structurally_equal() {
        let store = ConfigurationStore::new(Arc::new(MemoryStore::new()));
        let config = ChatbotConfig {
            title: "Acme Bot".to_string(),
            ..Default::default()
        };

        store.save_config(&config).await;
        let snapshot = store.hydrate().await;

        assert_eq!(snapshot.config, Some(config));
    }

    #[tokio::test]
    async fn snapshot_ready_once_both_present() {
        let store = ConfigurationStore::new(Arc::new(MemoryStore::new()));

        store.save_config(&ChatbotConfig::default()).await;
        assert!(!store.hydrate().await.is_ready());

        store.save_company(&acme()).await;
        assert!(store.hydrate().await.is_ready());
    }

    #[tokio::test]
    async fn corrupt_config_hydrates_as_absent() {
        let memory = MemoryStore::new();
        memory
            .insert_raw(storage_keys::CHATBOT_CONFIG, "{broken")
            .await;
        let store = ConfigurationStore::new(Arc::new(memory));

        let snapshot = store.hydrate().await;
        assert!(snapshot.config.is_none());
    }

    #[tokio::test]
    async fn schema_mismatch_hydrates_as_absent() {
        let memory = MemoryStore::new();
        // Valid JSON, wrong shape.
        memory
            .insert_raw(storage_keys::CHATBOT_CONFIG, "[1, 2, 3]")
            .await;
        let store = ConfigurationStore::new(Arc::new(memory));

        assert!(store.hydrate().await.config.is_none());
    }

    #[tokio::test]
    async fn trial_count_defaults_to_zero() {
        let store = ConfigurationStore::new(Arc::new(MemoryStore::new()));
        assert_eq!(store.load_trial_count().await, 0);
    }

    #[tokio::test]
    async fn trial_count_roundtrips() {
        let store = ConfigurationStore::new(Arc::new(MemoryStore::new()));
        store.save_trial_count(13).await;
        assert_eq!(store.load_trial_count().await, 13);
    }

    #[tokio::test]
    async fn company_survives_rehydration() {
        let memory = Arc::new(MemoryStore::new());
        {
            let store = ConfigurationStore::new(memory.clone());
            store.save_company(&acme()).await;
        }

        // A fresh store over the same backing state, as on a new page load.
        let store = ConfigurationStore::new(memory);
        let snapshot = store.hydrate().await;
        assert_eq!(snapshot.company.unwrap().name, "Acme");
    }
}
