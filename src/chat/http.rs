//! HTTP chatbot backend — posts preview turns to the inference service.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::chat::{ChatBackend, ChatBackendConfig, ChatReply, ChatRequest};
use crate::error::ChatError;

/// reqwest-based `ChatBackend`.
pub struct HttpChatBackend {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<SecretString>,
}

impl HttpChatBackend {
    pub fn new(config: &ChatBackendConfig) -> Result<Self, ChatError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ChatError::RequestFailed {
                reason: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn complete(&self, request: ChatRequest) -> Result<ChatReply, ChatError> {
        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(ref key) = self.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ChatError::RequestFailed {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Backend {
                status: status.as_u16(),
                reason: body.chars().take(200).collect(),
            });
        }

        response
            .json::<ChatReply>()
            .await
            .map_err(|e| ChatError::InvalidResponse {
                reason: e.to_string(),
            })
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn constructs_without_api_key() {
        let backend = HttpChatBackend::new(&ChatBackendConfig {
            endpoint: "http://localhost:9000/v1/chat".to_string(),
            api_key: None,
            timeout: Duration::from_secs(5),
        });
        assert!(backend.is_ok());
        assert_eq!(backend.unwrap().name(), "http");
    }

    #[test]
    fn request_wire_format() {
        let request = ChatRequest {
            message: "Hello".to_string(),
            chatbot_config: crate::funnel::model::ChatbotConfig::default(),
            company_info: crate::funnel::model::CompanyInfo {
                name: "Acme".to_string(),
                industry: "Retail".to_string(),
                description: String::new(),
                contact_email: "a@b.c".to_string(),
                website: None,
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["message"], "Hello");
        assert!(json.get("chatbotConfig").is_some());
        assert!(json.get("companyInfo").is_some());
    }
}
