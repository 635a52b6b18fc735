//! Wizard aggregates: chatbot configuration and company information.

use serde::{Deserialize, Serialize};

use crate::error::FunnelError;

/// How the chatbot should come across in conversation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChatTone {
    Friendly,
    Professional,
    Playful,
}

impl Default for ChatTone {
    fn default() -> Self {
        Self::Friendly
    }
}

impl std::fmt::Display for ChatTone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Friendly => write!(f, "friendly"),
            Self::Professional => write!(f, "professional"),
            Self::Playful => write!(f, "playful"),
        }
    }
}

/// Color overrides applied when the embedding page is in dark mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DarkModeColors {
    pub primary_color: String,
    pub background_color: String,
}

/// Configuration of a single chatbot instance.
///
/// Created during the customization step, mutated in place during the recap
/// step, and persisted under [`storage_keys::CHATBOT_CONFIG`] on every
/// mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatbotConfig {
    pub title: String,
    pub welcome_message: String,
    pub primary_color: String,
    pub font_family: String,
    #[serde(default)]
    pub tone: ChatTone,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<DarkModeColors>,
}

impl Default for ChatbotConfig {
    fn default() -> Self {
        Self {
            title: "Assistant".to_string(),
            welcome_message: "Hi! How can I help you today?".to_string(),
            primary_color: "#4f46e5".to_string(),
            font_family: "Inter".to_string(),
            tone: ChatTone::default(),
            avatar_url: None,
            dark_mode: None,
        }
    }
}

/// Company information collected on the first funnel step.
///
/// Read-only after submission within this core; editing happens in a
/// separate flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub name: String,
    pub industry: String,
    pub description: String,
    pub contact_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl CompanyInfo {
    /// Validate fields where form input enters the core.
    pub fn validate(&self) -> Result<(), FunnelError> {
        if self.name.trim().is_empty() {
            return Err(FunnelError::ValidationFailed {
                field: "name".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.industry.trim().is_empty() {
            return Err(FunnelError::ValidationFailed {
                field: "industry".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        let email = self.contact_email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(FunnelError::ValidationFailed {
                field: "contactEmail".to_string(),
                reason: "must be a valid email address".to_string(),
            });
        }
        Ok(())
    }
}

/// Durable storage keys for wizard state.
pub mod storage_keys {
    /// Key for the ChatbotConfig JSON blob.
    pub const CHATBOT_CONFIG: &str = "chatbotConfig";
    /// Key for the CompanyInfo JSON blob.
    pub const COMPANY_INFO: &str = "companyInfo";
    /// Key for the trial message counter (plain integer).
    pub const TRIAL_MESSAGE_COUNT: &str = "testChatbotMessageCount";
}
