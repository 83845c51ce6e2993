//! In-memory throttling for model calls made on behalf of product cards.
//!
//! DESIGN
//! ======
//! A single sliding-window counter backed by `VecDeque<Instant>`. Every
//! insight request that actually reaches the model is recorded; once the
//! window is full further requests are refused until old entries age out.
//! Defaults: 20 calls per 60 seconds, overridable via
//! `RATE_LIMIT_GLOBAL` and `RATE_LIMIT_GLOBAL_WINDOW_SECS`.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::llm::config::env_parse;

const DEFAULT_GLOBAL_LIMIT: usize = 20;
const DEFAULT_GLOBAL_WINDOW_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub limit: usize,
    pub window: Duration,
}

impl RateLimitConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            limit: env_parse("RATE_LIMIT_GLOBAL", DEFAULT_GLOBAL_LIMIT),
            window: Duration::from_secs(env_parse("RATE_LIMIT_GLOBAL_WINDOW_SECS", DEFAULT_GLOBAL_WINDOW_SECS)),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self { limit: DEFAULT_GLOBAL_LIMIT, window: Duration::from_secs(DEFAULT_GLOBAL_WINDOW_SECS) }
    }
}

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RateLimitError {
    #[error("global rate limit exceeded (max {limit} requests/{window_secs}s)")]
    GlobalExceeded { limit: usize, window_secs: u64 },
}

// =============================================================================
// RATE LIMITER
// =============================================================================

#[derive(Clone)]
pub struct RateLimiter {
    requests: Arc<Mutex<VecDeque<Instant>>>,
    config: RateLimitConfig,
}

impl RateLimiter {
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self { requests: Arc::new(Mutex::new(VecDeque::new())), config }
    }

    /// Check the window and record the request if there is room.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError::GlobalExceeded`] when the window is full.
    pub fn check_and_record(&self) -> Result<(), RateLimitError> {
        self.check_and_record_at(Instant::now())
    }

    /// Internal: check + record with explicit timestamp (for testing).
    fn check_and_record_at(&self, now: Instant) -> Result<(), RateLimitError> {
        let mut requests = self
            .requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let cfg = self.config;

        prune_window(&mut requests, now, cfg.window);
        if requests.len() >= cfg.limit {
            return Err(RateLimitError::GlobalExceeded { limit: cfg.limit, window_secs: cfg.window.as_secs() });
        }
        requests.push_back(now);
        Ok(())
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn prune_window(deque: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(&front) = deque.front() {
        if now.duration_since(front) > window {
            deque.pop_front();
        } else {
            break;
        }
    }
}

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod tests;
