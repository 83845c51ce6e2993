//! LLM — Gemini adapter for the storefront's model features.
//!
//! DESIGN
//! ======
//! Configured from environment variables. `LlmClient` binds a
//! [`gemini::GeminiClient`] to the configured model; services only see the
//! provider-neutral [`LlmChat`] trait, which keeps them mockable in tests.

pub mod config;
pub mod gemini;
pub mod types;

use config::LlmConfig;
pub use types::LlmChat;
use types::{ChatResponse, LlmError, Message};

/// Concrete LLM client: one Gemini HTTP client plus the model it targets.
pub struct LlmClient {
    inner: gemini::GeminiClient,
    model: String,
}

impl LlmClient {
    /// Build an LLM client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let inner = gemini::GeminiClient::new(config.api_key, config.base_url, config.timeouts)?;
        Ok(Self { inner, model: config.model })
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn chat(&self, max_tokens: u32, system: &str, messages: &[Message]) -> Result<ChatResponse, LlmError> {
        self.inner.chat(&self.model, max_tokens, system, messages).await
    }

    fn model(&self) -> &str {
        &self.model
    }
}
