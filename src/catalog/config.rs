// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for catalog fetching and extraction

use std::env;

use super::sources::DEFAULT_BASE_URL;

/// Configuration for catalog page fetching
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL for catalog pages
    pub base_url: String,
    /// Timeout per page fetch in seconds (default: 15)
    pub fetch_timeout_secs: u64,
    /// Maximum concurrent page fetches per cycle (default: 8)
    pub max_concurrent_fetches: usize,
    /// Maximum characters kept per page (default: 6000)
    pub max_chars_per_page: usize,
    /// Minimum characters for a page to count as content (default: 80)
    pub min_content_chars: usize,
}

impl CatalogConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("CATALOG_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            fetch_timeout_secs: env::var("CATALOG_FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
            max_concurrent_fetches: env::var("CATALOG_MAX_CONCURRENT_FETCHES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8)
                .min(32),
            max_chars_per_page: env::var("CATALOG_MAX_CHARS_PER_PAGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(6000),
            min_content_chars: env::var("CATALOG_MIN_CONTENT_CHARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(80),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url cannot be empty".to_string());
        }
        if self.fetch_timeout_secs == 0 {
            return Err("fetch_timeout_secs must be at least 1".to_string());
        }
        if self.max_concurrent_fetches == 0 {
            return Err("max_concurrent_fetches must be at least 1".to_string());
        }
        if self.max_chars_per_page < 200 {
            return Err("max_chars_per_page must be at least 200".to_string());
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            fetch_timeout_secs: 15,
            max_concurrent_fetches: 8,
            max_chars_per_page: 6000,
            min_content_chars: 80,
        }
    }
}
