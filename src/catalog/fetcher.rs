//! HTTP page fetching with bounded timeouts
//!
//! Retrieves raw catalog pages. Failures are per-URL and never abort a
//! refresh cycle; the scheduler collects them independently.

use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

use super::config::CatalogConfig;
use super::types::{FetchError, SourceDocument};

/// Abstraction over page fetching so the refresh scheduler can be
/// exercised without network access.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a single URL, returning the raw document
    async fn fetch(&self, url: &str) -> Result<SourceDocument, FetchError>;
}

/// Production fetcher backed by `reqwest`
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    /// Create a new fetcher from catalog configuration
    pub fn new(config: &CatalogConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .user_agent("Mozilla/5.0 (compatible; PosgradosBot/1.0)")
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Check if a URL is safe to fetch (http/https, no localhost/private IP)
    pub fn is_safe_url(url: &str) -> bool {
        let parsed = match Url::parse(url) {
            Ok(u) => u,
            Err(_) => return false,
        };

        if !["http", "https"].contains(&parsed.scheme()) {
            return false;
        }

        if let Some(host) = parsed.host_str() {
            let host_lower = host.to_lowercase();
            if host_lower == "localhost"
                || host_lower == "127.0.0.1"
                || host_lower == "0.0.0.0"
                || host_lower.starts_with("192.168.")
                || host_lower.starts_with("10.")
                || host_lower.starts_with("169.254.")
            {
                return false;
            }
            // 172.16.0.0/12
            if let Some(rest) = host_lower.strip_prefix("172.") {
                if let Some((octet, _)) = rest.split_once('.') {
                    if let Ok(n) = octet.parse::<u8>() {
                        if (16..=31).contains(&n) {
                            return false;
                        }
                    }
                }
            }
        }

        true
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<SourceDocument, FetchError> {
        if !Self::is_safe_url(url) {
            return Err(FetchError::UnsafeUrl {
                url: url.to_string(),
            });
        }

        debug!("Fetching catalog page: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Http {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let html = response.text().await.map_err(|e| FetchError::Http {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        Ok(SourceDocument {
            url: url.to_string(),
            html,
            fetched_at: Instant::now(),
        })
    }
}
