mod cart;
mod catalog;
mod chat;
mod config;
mod llm;
mod rate_limit;
mod routes;
mod services;
mod state;
mod view;

use std::sync::Arc;

use llm::LlmChat;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::StoreConfig::from_env();

    // Initialize LLM client (non-fatal: assistant and insights fall back to canned text).
    let llm: Option<Arc<dyn LlmChat>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured, AI features disabled");
            None
        }
    };

    let rate_limiter = rate_limit::RateLimiter::new(rate_limit::RateLimitConfig::from_env());
    let state = state::AppState::new(llm, config, rate_limiter);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "liwisi storefront listening");
    axum::serve(listener, app).await.expect("server failed");
}
