//! Feed and retry configuration, injected rather than read from globals.

use std::time::Duration;

use rand::Rng;

use crate::error::WalloraError;
use crate::validation;

pub const DEFAULT_BASE_URL: &str = "https://wallora-wallpapers.deno.dev";
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Where a feed reads from, how big its pages are and how failed fetches
/// are retried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedConfig {
    pub base_url: String,
    pub page_size: u32,
    /// Restricts the feed to one category slug when set.
    pub category: Option<String>,
    pub retry: RetryConfig,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            category: None,
            retry: RetryConfig::default(),
        }
    }
}

impl FeedConfig {
    /// Reads `WALLORA_API_URL`, `WALLORA_PAGE_SIZE` and the `WALLORA_RETRY_*`
    /// settings, falling back to defaults.
    pub fn from_env() -> Result<Self, WalloraError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, WalloraError> {
        let mut config = Self {
            retry: RetryConfig::from_lookup(&lookup),
            ..Self::default()
        };
        if let Some(url) = lookup("WALLORA_API_URL") {
            config.base_url = validation::validate_base_url(&url)?;
        }
        if let Some(raw) = lookup("WALLORA_PAGE_SIZE") {
            let size = raw.trim().parse::<i64>().map_err(|_| {
                WalloraError::InvalidInput(format!("WALLORA_PAGE_SIZE is not a number: '{}'", raw))
            })?;
            config.page_size = validation::validate_page_size(size)?;
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

/// Exponential backoff settings for page fetches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryConfig {
    pub max_retries: usize,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 500,
            max_delay_ms: 8000,
        }
    }
}

impl RetryConfig {
    /// Reads `WALLORA_RETRY_MAX`, `WALLORA_RETRY_BASE_MS` and `WALLORA_RETRY_MAX_MS`.
    /// Unparseable values fall back to the defaults.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            max_retries: parse_or(lookup("WALLORA_RETRY_MAX"), defaults.max_retries),
            base_delay_ms: parse_or(lookup("WALLORA_RETRY_BASE_MS"), defaults.base_delay_ms),
            max_delay_ms: parse_or(lookup("WALLORA_RETRY_MAX_MS"), defaults.max_delay_ms),
        }
    }

    /// No retries at all.
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        let shift = (attempt.saturating_sub(1)).min(30) as u32;
        let exp = 1u64 << shift;
        let base = self
            .base_delay_ms
            .saturating_mul(exp)
            .min(self.max_delay_ms);
        let jitter = rand::thread_rng().gen_range(0.8..1.2);
        Duration::from_millis((base as f64 * jitter) as u64)
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|val| val.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn feed_config_defaults() {
        let config = FeedConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, FeedConfig::default());
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn feed_config_overrides() {
        let config = FeedConfig::from_lookup(lookup(&[
            ("WALLORA_API_URL", "http://localhost:8000"),
            ("WALLORA_PAGE_SIZE", "10"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn feed_config_carries_retry_settings() {
        let config = FeedConfig::from_lookup(lookup(&[
            ("WALLORA_RETRY_MAX", "1"),
            ("WALLORA_RETRY_MAX_MS", "2000"),
        ]))
        .unwrap();
        assert_eq!(config.retry.max_retries, 1);
        assert_eq!(config.retry.base_delay_ms, 500);
        assert_eq!(config.retry.max_delay_ms, 2000);
    }

    #[test]
    fn feed_config_rejects_bad_page_size() {
        assert!(FeedConfig::from_lookup(lookup(&[("WALLORA_PAGE_SIZE", "lots")])).is_err());
        assert!(FeedConfig::from_lookup(lookup(&[("WALLORA_PAGE_SIZE", "0")])).is_err());
    }

    #[test]
    fn retry_config_falls_back_on_garbage() {
        let config = RetryConfig::from_lookup(lookup(&[
            ("WALLORA_RETRY_MAX", "5"),
            ("WALLORA_RETRY_BASE_MS", "soon"),
        ]));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.base_delay_ms, 500);
        assert_eq!(config.max_delay_ms, 8000);
    }

    #[test]
    fn backoff_grows_and_caps() {
        let config = RetryConfig {
            max_retries: 10,
            base_delay_ms: 100,
            max_delay_ms: 1000,
        };
        let first = config.delay_for_attempt(1);
        assert!(first >= Duration::from_millis(79) && first <= Duration::from_millis(120));
        let third = config.delay_for_attempt(3);
        assert!(third >= Duration::from_millis(319) && third <= Duration::from_millis(480));
        let capped = config.delay_for_attempt(20);
        assert!(capped <= Duration::from_millis(1200));
    }
}
