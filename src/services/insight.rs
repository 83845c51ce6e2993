//! Insight service — one-line marketing hooks for product cards.
//!
//! DESIGN
//! ======
//! [`generate_insight`] is a stateless one-shot call: no session, no
//! history, one completion per product. [`product_insight`] wraps it in the
//! invocation policy used by the catalog:
//!
//! 1. A product's outcome is memoized for the process lifetime, so repeated
//!    renders of the same card are stable and never re-bill the model. The
//!    first request claims the product before calling the model; requests
//!    arriving meanwhile see it pending and get no insight.
//! 2. The first time a product is seen it is sampled with probability
//!    `insight_sample_rate`; unsampled products are memoized as skipped.
//! 3. Sampled products must also pass the global rate limiter. A throttled
//!    product gets no insight and is *not* memoized, so a later render may
//!    try again.
//!
//! Like the assistant, the generator never fails: model errors and empty
//! completions map to fixed sentences.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rand::Rng;
use tracing::{debug, info, warn};

use crate::catalog::Product;
use crate::llm::LlmChat;
use crate::llm::types::LlmError;
use crate::state::AppState;

pub const EMPTY_INSIGHT_FALLBACK: &str = "Experience premium quality.";
pub const FAILED_INSIGHT_FALLBACK: &str = "Timeless design for your home.";

fn insight_prompt(name: &str, description: &str) -> String {
    format!(
        "Write a very short, 1-sentence punchy marketing hook (max 15 words) for a product named \"{name}\" \
         with description: \"{description}\". It's for a Black Friday sale."
    )
}

/// Drop one leading and one trailing double quote, if present.
fn strip_quotes(text: &str) -> &str {
    let text = text.strip_prefix('"').unwrap_or(text);
    text.strip_suffix('"').unwrap_or(text)
}

// =============================================================================
// GENERATOR
// =============================================================================

/// Ask the model for a marketing sentence about one product.
pub async fn generate_insight(llm: Option<&dyn LlmChat>, max_tokens: u32, name: &str, description: &str) -> String {
    match try_generate(llm, max_tokens, name, description).await {
        Ok(text) if text.is_empty() => EMPTY_INSIGHT_FALLBACK.to_string(),
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, product = name, "insight: model call failed");
            FAILED_INSIGHT_FALLBACK.to_string()
        }
    }
}

async fn try_generate(
    llm: Option<&dyn LlmChat>,
    max_tokens: u32,
    name: &str,
    description: &str,
) -> Result<String, LlmError> {
    let llm = llm.ok_or(LlmError::NotConfigured)?;
    let messages = [crate::llm::types::Message::user(insight_prompt(name, description))];
    let response = llm.chat(max_tokens, "", &messages).await?;
    debug!(
        model = %response.model,
        stop_reason = %response.stop_reason,
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "insight: LLM response"
    );
    Ok(strip_quotes(&response.text()).to_string())
}

// =============================================================================
// MEMO
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightEntry {
    /// A request is generating this product's insight.
    Pending,
    /// The product lost the sampling draw; it never gets an insight.
    Skipped,
    Ready(String),
}

impl InsightEntry {
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Pending | Self::Skipped => None,
            Self::Ready(text) => Some(text),
        }
    }
}

/// Per-product insight outcomes, keyed by product id.
#[derive(Clone, Default)]
pub struct InsightCache {
    entries: Arc<Mutex<HashMap<&'static str, InsightEntry>>>,
}

impl InsightCache {
    #[must_use]
    pub fn get(&self, product_id: &str) -> Option<InsightEntry> {
        self.lock().get(product_id).cloned()
    }

    /// Mark `product_id` as pending if nothing is recorded for it yet.
    ///
    /// Returns the existing entry when another request got there first.
    pub fn claim(&self, product_id: &'static str) -> Result<(), InsightEntry> {
        let mut entries = self.lock();
        match entries.get(product_id) {
            Some(existing) => Err(existing.clone()),
            None => {
                entries.insert(product_id, InsightEntry::Pending);
                Ok(())
            }
        }
    }

    /// Record the final outcome for a claimed product.
    pub fn resolve(&self, product_id: &'static str, entry: InsightEntry) {
        self.lock().insert(product_id, entry);
    }

    /// Drop a claim without an outcome, so a later request may try again.
    pub fn release(&self, product_id: &str) {
        let mut entries = self.lock();
        if entries.get(product_id) == Some(&InsightEntry::Pending) {
            entries.remove(product_id);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<&'static str, InsightEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

// =============================================================================
// POLICY
// =============================================================================

/// Draw whether a product gets an insight at all.
fn sampled(rate: f64) -> bool {
    rand::rng().random_bool(rate.clamp(0.0, 1.0))
}

/// Insight for a product card under the sampling, memo and throttling policy.
///
/// Returns `None` when the product has no insight to show, including while
/// another request is still generating it.
pub async fn product_insight(state: &AppState, product: &'static Product) -> Option<String> {
    if let Err(entry) = state.insights.claim(product.id) {
        return entry.text().map(str::to_string);
    }

    if !sampled(state.config.insight_sample_rate) {
        debug!(product_id = product.id, "insight: not sampled");
        state.insights.resolve(product.id, InsightEntry::Skipped);
        return None;
    }

    if let Err(e) = state.rate_limiter.check_and_record() {
        info!(product_id = product.id, error = %e, "insight: throttled");
        state.insights.release(product.id);
        return None;
    }

    // Generation is detached so the claim is always resolved.
    let task_state = state.clone();
    let generation = tokio::spawn(async move {
        let text = generate_insight(
            task_state.llm.as_deref(),
            task_state.config.max_tokens,
            product.name,
            product.description,
        )
        .await;
        task_state
            .insights
            .resolve(product.id, InsightEntry::Ready(text.clone()));
        text
    });
    match generation.await {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(product_id = product.id, error = %e, "insight: generation task failed");
            state.insights.release(product.id);
            None
        }
    }
}

#[cfg(test)]
#[path = "insight_test.rs"]
mod tests;
