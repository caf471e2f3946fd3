//! Page fetching
//!
//! The provider only needs "URL in, markup out". Hosts that already own an
//! HTTP stack implement [`PageFetcher`] themselves; [`HttpFetcher`] is the
//! reqwest-backed default.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::AnikaiError;

/// Resolves a URL to raw page markup
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<String>;
}

/// Default fetcher over a shared reqwest client
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a client with the configured timeout and user agent
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(AnikaiError::RequestFailed)
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }

    /// Wrap an existing client (shared connection pool, custom TLS, ...)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Result<String> {
        debug!(url = %url, "Fetching page");

        let response = self
            .client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml")
            .send()
            .await
            .map_err(AnikaiError::RequestFailed)
            .with_context(|| format!("Failed to fetch {}", url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnikaiError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            }
            .into());
        }

        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        debug!(url = %url, bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
