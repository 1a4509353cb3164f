//! Guide delivery over the Maropost HTTP API.
//!
//! Unconfigured credentials turn the dispatcher into a no-op that reports
//! `Skipped`, which lets the whole guide pipeline run without a live
//! provider. A configured provider without a verified sender address is a
//! configuration error caught before any network I/O.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::ExposeSecret;

use crate::config::EmailConfig;
use crate::error::{ConfigError, DeliveryError};

const SENDER_NAME: &str = "The Ready Network";
const EMAIL_SUBJECT: &str = "Your Personalized Preparedness Guide";
const ATTACHMENT_NAME: &str = "preparedness-guide.pdf";

/// Per-request timeouts; a timed-out send is a delivery failure.
const CONTACT_TIMEOUT: Duration = Duration::from_secs(15);
const SEND_TIMEOUT: Duration = Duration::from_secs(20);

/// Outcome of a delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The provider accepted the email.
    Sent,
    /// No provider configured; nothing was sent.
    Skipped,
}

/// Sends the rendered guide as an email attachment.
pub struct EmailDispatcher {
    client: reqwest::Client,
    config: Option<EmailConfig>,
}

impl EmailDispatcher {
    pub fn new(config: Option<EmailConfig>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Send `pdf` to `email`. The caller has already validated the address.
    pub async fn deliver(&self, email: &str, pdf: &[u8]) -> Result<DeliveryOutcome, DeliveryError> {
        let Some(config) = &self.config else {
            tracing::info!("Email provider not configured, skipping delivery");
            return Ok(DeliveryOutcome::Skipped);
        };

        let from_address = config
            .from_address
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("MAROPOST_FROM_EMAIL".to_string()))?;

        self.upsert_contact(config, email).await;
        self.send_guide(config, from_address, email, pdf).await?;

        tracing::info!(to = email, "Guide delivered");
        Ok(DeliveryOutcome::Sent)
    }

    /// Create or update the contact record. A contact failure is logged but
    /// does not abort the send.
    async fn upsert_contact(&self, config: &EmailConfig, email: &str) {
        let url = format!(
            "https://api.maropost.com/accounts/{}/contacts",
            config.account_id
        );
        let result = self
            .client
            .post(&url)
            .timeout(CONTACT_TIMEOUT)
            .bearer_auth(config.api_key.expose_secret())
            .json(&contact_payload(email, config.tag_id.as_deref()))
            .send()
            .await;

        match result {
            Ok(response) => {
                tracing::info!(status = %response.status(), "Contact upsert response");
            }
            Err(e) => {
                tracing::warn!("Contact upsert failed: {e}");
            }
        }
    }

    async fn send_guide(
        &self,
        config: &EmailConfig,
        from_address: &str,
        email: &str,
        pdf: &[u8],
    ) -> Result<(), DeliveryError> {
        let url = format!(
            "https://api.maropost.com/accounts/{}/emails",
            config.account_id
        );
        let response = self
            .client
            .post(&url)
            .timeout(SEND_TIMEOUT)
            .bearer_auth(config.api_key.expose_secret())
            .json(&email_payload(from_address, email, pdf))
            .send()
            .await
            .map_err(|e| DeliveryError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

fn contact_payload(email: &str, tag_id: Option<&str>) -> serde_json::Value {
    let tags: Vec<i64> = tag_id.and_then(|t| t.parse().ok()).into_iter().collect();
    serde_json::json!({
        "contact": {
            "email": email,
            "first_name": "Preparedness",
            "last_name": "Guide",
            "tags": tags,
        }
    })
}

fn email_payload(from_address: &str, email: &str, pdf: &[u8]) -> serde_json::Value {
    serde_json::json!({
        "email": {
            "from": { "email": from_address, "name": SENDER_NAME },
            "to": [{ "email": email }],
            "subject": EMAIL_SUBJECT,
            "html_body": "<p>Your personalized preparedness guide is attached.</p>",
            "attachments": [{
                "file_name": ATTACHMENT_NAME,
                "content": BASE64.encode(pdf),
            }],
        }
    })
}
