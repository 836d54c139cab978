//! Configuration schema definitions
//!
//! Every section and field has a default, so an empty file is a valid config.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Longest accepted debounce delay.
pub const MAX_DEBOUNCE_MS: u64 = 5_000;

/// Root configuration schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// `[search]` section
    #[serde(default)]
    pub search: SearchConfig,

    /// `[logging]` section
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.search.max_inline_results == 0 {
            return Err(Error::config_invalid("search.max_inline_results must be at least 1")
                .with_suggestion("Use the default of 8 inline results"));
        }
        if self.search.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(Error::config_invalid(format!(
                "search.debounce_ms must be at most {}, got {}",
                MAX_DEBOUNCE_MS, self.search.debounce_ms
            )));
        }
        if self.search.search_page.trim().is_empty() {
            return Err(Error::config_invalid("search.search_page must not be empty"));
        }
        if self.search.product_page.trim().is_empty() {
            return Err(Error::config_invalid("search.product_page must not be empty"));
        }
        Ok(())
    }
}

/// Search box behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before searching
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Result cards shown before the "view all" link
    #[serde(default = "default_max_inline_results")]
    pub max_inline_results: usize,

    /// Full search page, receives `?search=<query>`
    #[serde(default = "default_search_page")]
    pub search_page: String,

    /// Product detail page, receives `?id=<id>`
    #[serde(default = "default_product_page")]
    pub product_page: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            max_inline_results: default_max_inline_results(),
            search_page: default_search_page(),
            product_page: default_product_page(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    200
}

fn default_max_inline_results() -> usize {
    8
}

fn default_search_page() -> String {
    "shop.html".to_string()
}

fn default_product_page() -> String {
    "product.html".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
