//! Bounded retry for content fetches.
//!
//! Transient failures (transport errors, non-2xx statuses) are retried up
//! to the attempt budget with no delay beyond the request timeout itself.
//! Shape failures (JSON that does not decode, invalid scraped URLs) are
//! propagated immediately; retrying cannot fix them.

use std::future::Future;

use crate::error::ScrapeError;

/// Returns `true` if `err` represents a transient condition worth another
/// attempt.
///
/// Retriable:
/// - [`ScrapeError::Http`] — network-level failure (connection reset,
///   timeout, etc.).
/// - [`ScrapeError::UnexpectedStatus`] — any non-2xx response.
///
/// Non-retriable:
/// - [`ScrapeError::Deserialize`] — the body does not parse; the next
///   response would not either.
/// - [`ScrapeError::InvalidUrl`] — a scraped URL is unusable as-is.
fn is_retriable(err: &ScrapeError) -> bool {
    matches!(
        err,
        ScrapeError::Http(_) | ScrapeError::UnexpectedStatus { .. }
    )
}

/// Executes `operation` up to `max_attempts` times (first try included).
///
/// On success the result is returned immediately. On a retriable error the
/// next attempt starts right away; each failed attempt is logged with its
/// number so degraded pages can be traced back from the logs. After the
/// budget is exhausted the last error is returned; callers treat that as
/// "no data obtained" and continue.
pub(crate) async fn fetch_with_retry<T, F, Fut>(
    max_attempts: u32,
    url: &str,
    mut operation: F,
) -> Result<T, ScrapeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScrapeError>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_attempts {
                    return Err(err);
                }
                tracing::warn!(
                    url,
                    attempt,
                    max_attempts,
                    error = %err,
                    "transient fetch failure — retrying"
                );
            }
        }
        attempt += 1;
    }
}
