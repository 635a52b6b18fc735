//! Chatbot backend integration.
//!
//! The inference backend is an external collaborator; only its
//! request/response contract lives here. Requests carry the user message
//! plus the current chatbot configuration and company information, replies
//! carry the assistant text.

mod http;
mod mock;
mod preview;

pub use http::HttpChatBackend;
pub use mock::MockChatBackend;
pub use preview::PreviewBridge;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::ChatError;
use crate::funnel::model::{ChatbotConfig, CompanyInfo};

/// Request sent to the chatbot backend for one preview turn.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub chatbot_config: ChatbotConfig,
    pub company_info: CompanyInfo,
}

/// Reply from the chatbot backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Abstraction over the chatbot inference backend.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Run one completion round-trip.
    async fn complete(&self, request: ChatRequest) -> Result<ChatReply, ChatError>;

    /// Backend name, for logging.
    fn name(&self) -> &str;
}

/// Configuration for the HTTP chatbot backend.
#[derive(Debug, Clone)]
pub struct ChatBackendConfig {
    pub endpoint: String,
    pub api_key: Option<SecretString>,
    pub timeout: Duration,
}

/// Create the production chatbot backend from configuration.
pub fn create_backend(config: &ChatBackendConfig) -> Result<Arc<dyn ChatBackend>, ChatError> {
    let backend = HttpChatBackend::new(config)?;
    tracing::info!(endpoint = %config.endpoint, "Using HTTP chatbot backend");
    Ok(Arc::new(backend))
}
