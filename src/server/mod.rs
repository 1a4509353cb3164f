//! HTTP surface — `/chat`, `/guide`, `/health`.

use std::sync::{Arc, LazyLock};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::delivery::EmailDispatcher;
use crate::guide::{Composer, GUIDE_TITLE, pdf};
use crate::intake::{Profile, Responder};
use crate::llm::ChatMessage;

/// local-part@domain with at least one dot in the domain.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Syntactic email validation, checked before the delivery pipeline runs.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub responder: Arc<Responder>,
    pub composer: Arc<Composer>,
    pub dispatcher: Arc<EmailDispatcher>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat))
        .route("/guide", post(guide))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub profile: Profile,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    pub profile: Profile,
    pub ready_for_email: bool,
}

#[derive(Debug, Deserialize)]
pub struct GuideRequest {
    pub email: String,
    #[serde(default)]
    pub profile: Profile,
}

// ── Handlers ────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}

async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> impl IntoResponse {
    let outcome = state.responder.respond(&req.messages, req.profile).await;
    Json(ChatResponse {
        reply: outcome.reply,
        profile: outcome.profile,
        ready_for_email: outcome.ready_for_email,
    })
}

async fn guide(State(state): State<AppState>, Json(req): Json<GuideRequest>) -> Response {
    // Validation happens before any composing, rendering, or dispatching.
    if !is_valid_email(&req.email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Please provide a valid email address." })),
        )
            .into_response();
    }

    let text = state.composer.compose(&req.profile).await;

    let document = match pdf::render(GUIDE_TITLE, &text, &req.profile) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("Guide rendering failed: {e}");
            return internal_error();
        }
    };

    match state.dispatcher.deliver(&req.email, &document).await {
        Ok(outcome) => {
            tracing::info!(?outcome, "Guide pipeline completed");
            Json(serde_json::json!({ "ok": true })).into_response()
        }
        Err(e) => {
            tracing::error!("Guide delivery failed: {e}");
            internal_error()
        }
    }
}

/// Generic 500 body; internal detail stays in the logs.
fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "Something went wrong generating your guide." })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation_requires_dot_in_domain() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@sub.example.co"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("bad-email"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn chat_request_tolerates_missing_fields() {
        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(req.messages.is_empty());
        assert_eq!(req.profile, Profile::default());
    }

    #[test]
    fn chat_response_uses_camel_case() {
        let response = ChatResponse {
            reply: "hi".into(),
            profile: Profile::default(),
            ready_for_email: false,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["readyForEmail"], false);
        assert_eq!(json["profile"]["preparingFor"], "");
    }
}
