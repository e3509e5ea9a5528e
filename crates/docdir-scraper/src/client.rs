//! HTTP client for the directory site.
//!
//! One client instance serves a whole run: listing pages, profile
//! documents, the reviews AJAX endpoint, and full-answer pages. Fetches
//! are sequential; an optional politeness delay is applied between
//! top-level page fetches by the orchestration layers.

use std::time::Duration;

use docdir_core::CrawlConfig;
use serde::de::DeserializeOwned;

use crate::error::ScrapeError;
use crate::retry::fetch_with_retry;

pub struct DirectoryClient {
    client: reqwest::Client,
    /// Total attempts per fetch (first try included) for transient failures.
    max_attempts: u32,
    inter_request_delay_ms: u64,
}

impl DirectoryClient {
    /// Creates a `DirectoryClient` with configured timeout, `User-Agent`,
    /// and retry budget.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_attempts: u32,
        inter_request_delay_ms: u64,
    ) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_attempts,
            inter_request_delay_ms,
        })
    }

    /// Creates a client from the run configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn from_config(config: &CrawlConfig) -> Result<Self, ScrapeError> {
        Self::new(
            config.timeout_secs,
            &config.user_agent,
            config.max_attempts,
            config.inter_request_delay_ms,
        )
    }

    /// Fetches a URL and returns the response body as text, retrying
    /// transient failures up to the attempt budget.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::UnexpectedStatus`] — non-2xx after all attempts.
    /// - [`ScrapeError::Http`] — transport failure after all attempts.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ScrapeError> {
        fetch_with_retry(self.max_attempts, url, || async move {
            let response = self.client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ScrapeError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }
            Ok(response.text().await?)
        })
        .await
    }

    /// Fetches a URL and decodes its body as JSON.
    ///
    /// Transport and status failures are retried like [`Self::fetch_html`];
    /// a body that does not decode is a [`ScrapeError::Deserialize`] and is
    /// never retried; callers treat it as a malformed response and degrade.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::UnexpectedStatus`] / [`ScrapeError::Http`] — as for
    ///   [`Self::fetch_html`].
    /// - [`ScrapeError::Deserialize`] — body is not valid JSON of type `T`.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        context: &str,
    ) -> Result<T, ScrapeError> {
        fetch_with_retry(self.max_attempts, url, || async move {
            let response = self.client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ScrapeError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }
            let body = response.text().await?;
            serde_json::from_str::<T>(&body).map_err(|e| ScrapeError::Deserialize {
                context: context.to_owned(),
                source: e,
            })
        })
        .await
    }

    /// Sleeps for the configured inter-request delay, if any. Called by the
    /// walkers between successive page fetches.
    pub async fn polite_delay(&self) {
        if self.inter_request_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.inter_request_delay_ms)).await;
        }
    }
}
