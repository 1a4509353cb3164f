//! Environment-driven configuration.
//!
//! Everything is read once at startup. Optional subsystems (LLM, email
//! provider) build to `None` when their key variable is absent, which turns
//! the whole service into its deterministic/no-op mode — useful for local
//! development without live credentials.

use secrecy::SecretString;

/// Default OpenAI model when `OPENAI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default listening port when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 8000;

/// LLM provider configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: SecretString,
    pub model: String,
}

impl LlmConfig {
    /// Build from environment variables.
    /// Returns `None` if `OPENAI_API_KEY` is not set (LLM calls disabled,
    /// all logic falls back to deterministic paths).
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty())?;
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Some(Self {
            api_key: SecretString::from(api_key),
            model,
        })
    }
}

/// Email provider (Maropost) configuration.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_key: SecretString,
    pub account_id: String,
    /// Optional tag applied to the contact record.
    pub tag_id: Option<String>,
    /// Verified sender address. Optional at startup; its absence is a fatal
    /// configuration error at delivery time.
    pub from_address: Option<String>,
}

impl EmailConfig {
    /// Build from environment variables.
    /// Returns `None` unless both `MAROPOST_API_KEY` and
    /// `MAROPOST_ACCOUNT_ID` are set (delivery disabled, dispatcher reports
    /// skipped).
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("MAROPOST_API_KEY").ok().filter(|k| !k.is_empty())?;
        let account_id = std::env::var("MAROPOST_ACCOUNT_ID")
            .ok()
            .filter(|a| !a.is_empty())?;
        let tag_id = std::env::var("MAROPOST_TAG_ID").ok().filter(|t| !t.is_empty());
        let from_address = std::env::var("MAROPOST_FROM_EMAIL")
            .ok()
            .filter(|f| !f.is_empty());
        Some(Self {
            api_key: SecretString::from(api_key),
            account_id,
            tag_id,
            from_address,
        })
    }
}

/// Complete application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub llm: Option<LlmConfig>,
    pub email: Option<EmailConfig>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        Self {
            port,
            llm: LlmConfig::from_env(),
            email: EmailConfig::from_env(),
        }
    }
}
