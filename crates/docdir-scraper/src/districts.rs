//! District partition keys from the listing page's embedded filter
//! configuration.
//!
//! Oversized listings are split by sub-region. The available sub-regions
//! are not served as a dedicated endpoint; they ride along inside a JSON
//! configuration block embedded in the listing page body.

use docdir_core::District;
use scraper::{Html, Selector};
use serde::Deserialize;

use crate::client::DirectoryClient;
use crate::error::ScrapeError;
use crate::outcome::ParseOutcome;

/// The embedded filter-configuration block, e.g.:
///
/// ```json
/// {
///   "filters": [
///     {"name": "insurances", "options": [...]},
///     {"name": "districts", "options": [{"key": "centro", "name": "Centro"}, ...]}
///   ]
/// }
/// ```
#[derive(Debug, Deserialize)]
struct FilterConfig {
    #[serde(default)]
    filters: Vec<Filter>,
}

#[derive(Debug, Deserialize)]
struct Filter {
    name: String,
    #[serde(default)]
    options: Vec<District>,
}

/// Extracts the district options from a listing document.
///
/// Returns `Missing` when the configuration block or the `districts`
/// filter is absent, and `Malformed` when the block is present but its
/// JSON does not decode. Callers treat both as "partitioning unavailable".
#[must_use]
pub fn districts_from_document(doc: &Html) -> ParseOutcome<Vec<District>> {
    let selector =
        Selector::parse(r#"script[data-role="search-filters"]"#).expect("valid selector");

    let Some(script) = doc.select(&selector).next() else {
        return ParseOutcome::Missing;
    };

    let raw = script.text().collect::<String>();
    let Ok(config) = serde_json::from_str::<FilterConfig>(&raw) else {
        return ParseOutcome::Malformed;
    };

    match config.filters.into_iter().find(|f| f.name == "districts") {
        Some(filter) => ParseOutcome::Ok(filter.options),
        None => ParseOutcome::Missing,
    }
}

/// Fetches the listing page and extracts its district partition keys.
///
/// An empty result means "partitioning unavailable" — fetch failures and
/// absent or unreadable filter blocks all degrade to it, with the branch
/// logged.
pub async fn list_districts(client: &DirectoryClient, listing_url: &str) -> Vec<District> {
    let body = match client.fetch_html(listing_url).await {
        Ok(body) => body,
        Err(err) => {
            tracing::warn!(url = listing_url, error = %err, "district list fetch failed");
            return Vec::new();
        }
    };

    match districts_from_body(&body) {
        ParseOutcome::Ok(districts) => {
            tracing::info!(url = listing_url, count = districts.len(), "district filter found");
            districts
        }
        ParseOutcome::Missing => {
            tracing::debug!(url = listing_url, "no district filter on listing page");
            Vec::new()
        }
        ParseOutcome::Malformed => {
            tracing::warn!(url = listing_url, "unreadable filter configuration block");
            Vec::new()
        }
    }
}

fn districts_from_body(body: &str) -> ParseOutcome<Vec<District>> {
    let doc = Html::parse_document(body);
    districts_from_document(&doc)
}

/// Builds a listing URL filtered to a batch of districts, appending one
/// `filters[districts][]=<key>` pair per district.
///
/// # Errors
///
/// Returns [`ScrapeError::InvalidUrl`] if `base` is not a parseable URL.
pub fn district_filter_url(base: &str, batch: &[District]) -> Result<String, ScrapeError> {
    let mut url = reqwest::Url::parse(base).map_err(|e| ScrapeError::InvalidUrl {
        url: base.to_owned(),
        reason: e.to_string(),
    })?;

    for district in batch {
        url.query_pairs_mut()
            .append_pair("filters[districts][]", &district.key);
    }

    Ok(url.to_string())
}
