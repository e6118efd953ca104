//! HTTP byte fetcher
//!
//! Requests only a prefix of the file with a `Range` header when a limit is
//! given. Servers that ignore ranges answer 200 with the full body; the read
//! then stops once enough bytes have arrived.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::RANGE;

use crate::config::FetchConfig;
use crate::error::{Error, Result, ResultExt};

/// HTTP client for audio URLs
pub struct HttpFetcher {
    http_client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a new client with the configured timeout and user agent
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .with_context("building HTTP client")?;

        Ok(Self { http_client })
    }

    /// Download `url`, at most `limit` bytes when set
    pub async fn fetch(&self, url: &str, limit: Option<usize>) -> Result<Vec<u8>> {
        if limit == Some(0) {
            return Ok(Vec::new());
        }

        let mut request = self.http_client.get(url);
        if let Some(limit) = limit {
            request = request.header(RANGE, range_header(limit));
        }

        let mut response = request
            .send()
            .await
            .map_err(|e| Error::fetch(url, e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            return Err(Error::fetch(
                url,
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            ));
        }

        if limit.is_some() && status != StatusCode::PARTIAL_CONTENT {
            tracing::debug!(url, status = status.as_u16(), "Server ignored range request");
        }

        let mut data = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| Error::fetch(url, e.to_string()))?
        {
            data.extend_from_slice(&chunk);
            if limit.is_some_and(|limit| data.len() >= limit) {
                break;
            }
        }

        if let Some(limit) = limit {
            data.truncate(limit);
        }

        tracing::debug!(url, bytes = data.len(), "Fetched audio bytes");
        Ok(data)
    }
}

/// `Range` value for the first `limit` bytes.
fn range_header(limit: usize) -> String {
    format!("bytes=0-{}", limit.saturating_sub(1))
}
