use anyhow::{Context, Result};
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER};
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::errors::fetch_context;
use crate::rate_limiter::RateLimiter;

/// Accepted upstream representations, JSON-LD first
const ACCEPT_JSON: &str = "application/ld+json, application/json";

/// Status and body of a completed request
pub struct TextResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Shared reqwest client, spaced by a [`RateLimiter`]
pub struct RateLimitedClient {
    client: Client,
    rate_limiter: RateLimiter,
}

impl RateLimitedClient {
    /// `referer` is sent on every request when given
    pub fn new(
        user_agent: &str,
        timeout_secs: u64,
        rate_limit_ms: u64,
        referer: Option<&str>,
    ) -> Result<Self> {
        let headers = Self::default_headers(referer)?;
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(rate_limit_ms),
        })
    }

    /// GET `url` and read the whole body, whatever the status
    pub async fn get_text(&mut self, url: &str) -> Result<TextResponse> {
        self.rate_limiter.wait().await;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| fetch_context(url))?;
        let status = response.status();
        let body = response.text().await.with_context(|| fetch_context(url))?;

        Ok(TextResponse { status, body })
    }

    fn default_headers(referer: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));
        if let Some(referer) = referer {
            let value = HeaderValue::from_str(referer).context("Invalid referer header")?;
            headers.insert(REFERER, value);
        }
        Ok(headers)
    }
}
