//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the optional LLM client and a map of live visitor states. Each
//! visitor has its own cart, view flags, chat transcript and assistant
//! client; nothing is persisted and everything is lost on restart.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::cart::Cart;
use crate::catalog::ALL_CATEGORIES;
use crate::chat::Transcript;
use crate::config::StoreConfig;
use crate::llm::LlmChat;
use crate::rate_limit::RateLimiter;
use crate::services::assistant::AssistantClient;
use crate::services::insight::InsightCache;

// =============================================================================
// VISITOR STATE
// =============================================================================

/// One shopper's in-memory storefront.
pub struct VisitorState {
    pub cart: Cart,
    /// Selected category filter; [`ALL_CATEGORIES`] selects everything.
    pub active_category: String,
    pub cart_open: bool,
    pub chat_open: bool,
    pub transcript: Transcript,
    /// `None` while a chat message is awaiting its reply.
    pub assistant: Option<AssistantClient>,
}

impl VisitorState {
    #[must_use]
    pub fn new(assistant: AssistantClient) -> Self {
        Self {
            cart: Cart::new(),
            active_category: ALL_CATEGORIES.to_string(),
            cart_open: false,
            chat_open: false,
            transcript: Transcript::new(),
            assistant: Some(assistant),
        }
    }

    /// Whether the assistant is composing a reply.
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.assistant.is_none()
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub visitors: Arc<RwLock<HashMap<Uuid, VisitorState>>>,
    /// Optional LLM client. `None` if LLM env vars are not configured.
    pub llm: Option<Arc<dyn LlmChat>>,
    pub config: StoreConfig,
    /// Per-product insight memo.
    pub insights: InsightCache,
    /// Throttle for insight model calls.
    pub rate_limiter: RateLimiter,
}

impl AppState {
    #[must_use]
    pub fn new(llm: Option<Arc<dyn LlmChat>>, config: StoreConfig, rate_limiter: RateLimiter) -> Self {
        Self {
            visitors: Arc::new(RwLock::new(HashMap::new())),
            llm,
            config,
            insights: InsightCache::default(),
            rate_limiter,
        }
    }

    /// A fresh assistant client bound to this state's LLM.
    #[must_use]
    pub fn assistant_client(&self) -> AssistantClient {
        AssistantClient::new(self.llm.clone(), self.config.max_tokens)
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visitor_state_new_is_empty() {
        let visitor = VisitorState::new(AssistantClient::new(None, 16));
        assert!(visitor.cart.is_empty());
        assert_eq!(visitor.active_category, ALL_CATEGORIES);
        assert!(!visitor.cart_open);
        assert!(!visitor.chat_open);
        assert_eq!(visitor.transcript.messages().len(), 1);
        assert!(!visitor.is_typing());
    }

    #[test]
    fn visitor_without_assistant_is_typing() {
        let mut visitor = VisitorState::new(AssistantClient::new(None, 16));
        let _checked_out = visitor.assistant.take();
        assert!(visitor.is_typing());
    }

    #[tokio::test]
    async fn seed_visitor_registers_state() {
        let state = test_helpers::test_app_state();
        let id = test_helpers::seed_visitor(&state).await;
        assert!(state.visitors.read().await.contains_key(&id));
    }
}
