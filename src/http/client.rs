use crate::rate_limiter::RateLimiter;
use anyhow::{Context, Result};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// HTTP client with built-in rate limiting.
///
/// Cheap to clone; clones share the same underlying connection pool and
/// the same rate limiter, so the request spacing holds across every task.
#[derive(Clone)]
pub struct RateLimitedClient {
    client: Client,
    rate_limiter: Arc<RateLimiter>,
}

impl RateLimitedClient {
    pub fn new(user_agent: &str, timeout_secs: u64, rate_limiter: Arc<RateLimiter>) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    pub async fn get(&self, url: &str) -> Result<reqwest::Response> {
        self.rate_limiter.acquire().await;
        self.send_get_request(url).await
    }

    /// Fetch a page and return its body, failing on non-success status.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.get(url).await?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error: {}", response.status());
        }

        response.text().await.context("Failed to read response body")
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    async fn send_get_request(&self, url: &str) -> Result<reqwest::Response> {
        self.client
            .get(url)
            .send()
            .await
            .context("Failed to send GET request")
    }
}
