//! Listing pagination: page counting and page-URL construction.
//!
//! The listing is paginated through a `page=` query parameter. Page URLs
//! are built by structured query manipulation on a parsed URL; a literal
//! `replace("page=1", ...)` would silently no-op whenever the substring
//! is absent.

use scraper::{Html, Selector};

use crate::client::DirectoryClient;
use crate::error::ScrapeError;
use crate::outcome::ParseOutcome;

/// Extracts the highest page number from the listing's pagination control.
///
/// The control renders one `a.page-link` per reachable page plus a
/// "next" arrow carrying `aria-label="next"`; the arrow is skipped and the
/// last remaining link holds the final page number.
///
/// Returns `Missing` when no pagination control is present (single page of
/// results) and `Malformed` when the last link's text is not a number.
#[must_use]
pub fn last_page_number(doc: &Html) -> ParseOutcome<u32> {
    let selector = Selector::parse("a.page-link").expect("valid selector");

    let last = doc
        .select(&selector)
        .filter(|el| el.value().attr("aria-label") != Some("next"))
        .last();

    match last {
        None => ParseOutcome::Missing,
        Some(el) => {
            let text = el.text().collect::<String>();
            match text.trim().parse::<u32>() {
                Ok(n) if n >= 1 => ParseOutcome::Ok(n),
                _ => ParseOutcome::Malformed,
            }
        }
    }
}

/// Determines the total number of listing pages for a search URL.
///
/// Always returns at least 1: a missing pagination control means a single
/// page of results, and a fetch failure after retries falls back to 1.
/// Under-crawling one page beats aborting the target.
pub async fn count_pages(client: &DirectoryClient, listing_url: &str) -> u32 {
    let body = match client.fetch_html(listing_url).await {
        Ok(body) => body,
        Err(err) => {
            tracing::warn!(url = listing_url, error = %err, "page count fetch failed — assuming 1 page");
            return 1;
        }
    };

    match last_page_from_body(&body) {
        ParseOutcome::Ok(n) => {
            tracing::info!(url = listing_url, pages = n, "pagination control found");
            n
        }
        ParseOutcome::Missing => {
            tracing::debug!(url = listing_url, "no pagination control — single page");
            1
        }
        ParseOutcome::Malformed => {
            tracing::warn!(url = listing_url, "unreadable pagination control — assuming 1 page");
            1
        }
    }
}

// Parses and drops the document before the caller's next await point.
fn last_page_from_body(body: &str) -> ParseOutcome<u32> {
    let doc = Html::parse_document(body);
    last_page_number(&doc)
}

/// Builds the URL for a specific listing page, replacing any existing
/// `page` query parameter.
///
/// # Errors
///
/// Returns [`ScrapeError::InvalidUrl`] if `base` is not a parseable URL.
pub fn page_url(base: &str, page: u32) -> Result<String, ScrapeError> {
    let mut url = reqwest::Url::parse(base).map_err(|e| ScrapeError::InvalidUrl {
        url: base.to_owned(),
        reason: e.to_string(),
    })?;

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "page")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.query_pairs_mut().clear();
    for (k, v) in &kept {
        url.query_pairs_mut().append_pair(k, v);
    }
    url.query_pairs_mut().append_pair("page", &page.to_string());

    Ok(url.to_string())
}
