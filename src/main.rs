use std::sync::Arc;

use ready_intake::config::AppConfig;
use ready_intake::delivery::EmailDispatcher;
use ready_intake::guide::Composer;
use ready_intake::intake::Responder;
use ready_intake::llm::create_provider;
use ready_intake::server::{AppState, router};

#[tokio::main]
async fn main() -> ready_intake::error::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env();

    let llm = match &config.llm {
        Some(llm_config) => Some(create_provider(llm_config)?),
        None => {
            tracing::warn!(
                "OPENAI_API_KEY not set — chat and guide composition use deterministic fallbacks"
            );
            None
        }
    };

    eprintln!("🏕  Ready Intake v{}", env!("CARGO_PKG_VERSION"));
    eprintln!(
        "   LLM: {}",
        config
            .llm
            .as_ref()
            .map(|c| c.model.clone())
            .unwrap_or_else(|| "disabled (scripted replies)".to_string())
    );
    eprintln!(
        "   Email: {}",
        if config.email.is_some() {
            "enabled (Maropost)"
        } else {
            "disabled (delivery skipped)"
        }
    );
    eprintln!("   API: http://0.0.0.0:{}\n", config.port);

    let state = AppState {
        responder: Arc::new(Responder::new(llm.clone())),
        composer: Arc::new(Composer::new(llm)),
        dispatcher: Arc::new(EmailDispatcher::new(config.email.clone())),
    };

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(port = config.port, "HTTP server started");
    axum::serve(listener, router(state)).await?;

    Ok(())
}
