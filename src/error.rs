//! Error types for Ready Intake.

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// LLM provider errors.
///
/// These are always non-fatal for the chat and guide paths: callers degrade
/// to deterministic output and log at `warn`.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Provider {provider} returned empty content")]
    EmptyResponse { provider: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// PDF rendering errors.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("Failed to drain PDF buffer: {0}")]
    Buffer(String),
}

/// Email delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Email provider request failed: {0}")]
    RequestFailed(String),

    #[error("Email provider rejected the send: status {status}, body {body}")]
    Rejected { status: u16, body: String },
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
