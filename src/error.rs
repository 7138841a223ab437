// ABOUTME: Defines all error types for hello-phoenix using thiserror.
// ABOUTME: Each submodule has its own error enum, unified under PhoenixError.

/// Top-level error type for the hello-phoenix library.
#[derive(Debug, thiserror::Error)]
pub enum PhoenixError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Action error: {0}")]
    Action(#[from] ActionError),

    #[error("Trace store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors from LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Errors from validating, looking up, or executing an action.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Action '{0}' is already registered")]
    Duplicate(String),

    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),

    #[error("{0}")]
    Remote(#[from] StoreError),

    #[error("Error: {0}")]
    Execution(#[source] anyhow::Error),
}

impl ActionError {
    /// Shorthand for a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Shorthand for a missing action or remote entity.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

/// Errors from the trace store's GraphQL API.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("Unexpected response shape: {0}")]
    Shape(String),

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Errors raised while loading configuration at process start.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}
