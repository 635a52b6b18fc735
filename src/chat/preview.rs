//! PreviewBridge — mediates one trial message at a time to the chatbot
//! backend.
//!
//! Quota policy: exactly one guard increment per *initiated* user send,
//! recorded and persisted before the network round-trip. Attempts count,
//! not replies: a backend failure is surfaced inline, keeps the quota it
//! consumed, and leaves the trial retryable. Assistant replies and system
//! output never touch the counter.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::chat::{ChatBackend, ChatReply, ChatRequest};
use crate::error::PreviewError;
use crate::funnel::store::ConfigurationStore;
use crate::funnel::trial::TrialSessionGuard;

/// Bridges the trial chat UI to the backend, driving the trial guard.
pub struct PreviewBridge {
    backend: Arc<dyn ChatBackend>,
    store: ConfigurationStore,
    guard: Arc<RwLock<TrialSessionGuard>>,
    in_flight: AtomicBool,
}

impl PreviewBridge {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        store: ConfigurationStore,
        guard: Arc<RwLock<TrialSessionGuard>>,
    ) -> Self {
        Self {
            backend,
            store,
            guard,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a send is currently in flight (the input must be disabled
    /// while this is true).
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Send one user message to the chatbot backend.
    ///
    /// Rejects overlapping sends, rejects once the quota is exhausted, and
    /// rejects when the wizard state is not fully hydrated. The reply is
    /// returned to the caller rather than applied anywhere, so a caller
    /// whose page has since been torn down can simply drop it.
    pub async fn send(&self, message: &str) -> Result<ChatReply, PreviewError> {
        // Single in-flight send: flip the flag or bail.
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(PreviewError::SendInFlight);
        }

        let result = self.send_inner(message).await;
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn send_inner(&self, message: &str) -> Result<ChatReply, PreviewError> {
        if self.guard.read().await.is_exhausted() {
            return Err(PreviewError::QuotaExhausted);
        }

        let snapshot = self.store.hydrate().await;
        let (config, company) = match (snapshot.config, snapshot.company) {
            (Some(config), Some(company)) => (config, company),
            _ => return Err(PreviewError::NotReady),
        };

        // Consume quota for the attempt, before the round-trip, and write
        // the counter through.
        let count = {
            let mut guard = self.guard.write().await;
            guard.record_message();
            guard.count()
        };
        self.store.save_trial_count(count).await;
        debug!(count, "Trial message recorded");

        let request = ChatRequest {
            message: message.to_string(),
            chatbot_config: config,
            company_info: company,
        };

        match self.backend.complete(request).await {
            Ok(reply) => Ok(reply),
            Err(e) => {
                // Inline, retryable; no quota refund.
                warn!(backend = self.backend.name(), error = %e, "Preview send failed");
                Err(PreviewError::Chat(e))
            }
        }
    }
}
