//! Storefront settings parsed from environment variables.

use crate::llm::config::env_parse;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LLM_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_INSIGHT_SAMPLE_RATE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreConfig {
    pub port: u16,
    /// Output token cap for every model call.
    pub max_tokens: u32,
    /// Probability that a product gets an insight at all, in `[0, 1]`.
    pub insight_sample_rate: f64,
}

impl StoreConfig {
    /// Read `PORT`, `LLM_MAX_TOKENS` and `INSIGHT_SAMPLE_RATE`, falling back
    /// to defaults for unset or unparsable values.
    #[must_use]
    pub fn from_env() -> Self {
        let rate = env_parse("INSIGHT_SAMPLE_RATE", DEFAULT_INSIGHT_SAMPLE_RATE);
        Self {
            port: env_parse("PORT", DEFAULT_PORT),
            max_tokens: env_parse("LLM_MAX_TOKENS", DEFAULT_LLM_MAX_TOKENS),
            insight_sample_rate: if rate.is_finite() { rate.clamp(0.0, 1.0) } else { DEFAULT_INSIGHT_SAMPLE_RATE },
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            max_tokens: DEFAULT_LLM_MAX_TOKENS,
            insight_sample_rate: DEFAULT_INSIGHT_SAMPLE_RATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// # Safety
    /// Tests must run with `--test-threads=1` to avoid env races.
    unsafe fn clear_store_env() {
        unsafe {
            std::env::remove_var("PORT");
            std::env::remove_var("LLM_MAX_TOKENS");
            std::env::remove_var("INSIGHT_SAMPLE_RATE");
        }
    }

    #[test]
    fn from_env_defaults() {
        unsafe { clear_store_env() };
        assert_eq!(StoreConfig::from_env(), StoreConfig::default());
    }

    #[test]
    fn from_env_overrides_and_clamps() {
        unsafe {
            clear_store_env();
            std::env::set_var("PORT", "8080");
            std::env::set_var("LLM_MAX_TOKENS", "200");
            std::env::set_var("INSIGHT_SAMPLE_RATE", "4.5");
        }

        let cfg = StoreConfig::from_env();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.max_tokens, 200);
        assert!((cfg.insight_sample_rate - 1.0).abs() < f64::EPSILON);

        unsafe { clear_store_env() };
    }

    #[test]
    fn from_env_ignores_garbage() {
        unsafe {
            clear_store_env();
            std::env::set_var("PORT", "not-a-port");
        }

        assert_eq!(StoreConfig::from_env().port, DEFAULT_PORT);

        unsafe { clear_store_env() };
    }
}
