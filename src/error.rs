//! Error types for the funnel service.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Chat backend error: {0}")]
    Chat(#[from] ChatError),

    #[error("Preview error: {0}")]
    Preview(#[from] PreviewError),

    #[error("Funnel error: {0}")]
    Funnel(#[from] FunnelError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Durable-store errors.
///
/// These never reach funnel logic directly: `ConfigurationStore` degrades
/// them to absence and logs a warning.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to open store: {0}")]
    Open(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Chatbot backend errors.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Request to chatbot backend failed: {reason}")]
    RequestFailed { reason: String },

    #[error("Chatbot backend returned status {status}: {reason}")]
    Backend { status: u16, reason: String },

    #[error("Invalid response from chatbot backend: {reason}")]
    InvalidResponse { reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from the live trial preview.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// A send is already in flight; the input must stay disabled until it
    /// resolves.
    #[error("A preview message is already in flight")]
    SendInFlight,

    /// The trial quota is spent. Not a failure from the user's point of
    /// view — the remedy is advancing the funnel, not retrying.
    #[error("Trial message quota exhausted")]
    QuotaExhausted,

    /// Wizard state is not fully hydrated; the preview must not run.
    #[error("Wizard state is not ready for the preview")]
    NotReady,

    #[error(transparent)]
    Chat(#[from] ChatError),
}

/// Funnel progression errors.
#[derive(Debug, thiserror::Error)]
pub enum FunnelError {
    #[error("Invalid value for {field}: {reason}")]
    ValidationFailed { field: String, reason: String },

    #[error("Trial not exhausted: {count} of {max} messages used")]
    TrialNotExhausted { count: u32, max: u32 },

    #[error("Already at the terminal funnel step")]
    AtTerminalStep,

    #[error("Unknown subscription plan: {name}")]
    UnknownPlan { name: String },
}

/// Result type alias for the funnel service.
pub type Result<T> = std::result::Result<T, Error>;
