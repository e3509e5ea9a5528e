//! Review pagination against the AJAX endpoint.
//!
//! The profile document carries page 1 of the review stream; the remainder
//! is served as JSON from `{origin}/ajax/reviews/{professional_id}/{page}`.
//! The loop starts at page 2 and stops when enough reviews have been
//! accumulated or the endpoint stops making sense — it degrades, it never
//! raises.

use docdir_core::Review;
use serde::Deserialize;

use crate::client::DirectoryClient;
use crate::error::ScrapeError;

/// One page of the reviews AJAX payload. `rows` and `limit` are the
/// pagination metadata; a payload without them does not decode and ends
/// the loop.
#[derive(Debug, Deserialize)]
struct ReviewsPage {
    #[allow(dead_code)]
    rows: u64,
    #[allow(dead_code)]
    limit: u64,
    #[serde(default)]
    opinions: Vec<Opinion>,
}

#[derive(Debug, Deserialize)]
struct Opinion {
    author: Option<String>,
    date: Option<String>,
    comment: Option<String>,
}

impl From<Opinion> for Review {
    fn from(opinion: Opinion) -> Self {
        Review {
            reviewer_name: opinion.author,
            date: opinion.date,
            comment: opinion.comment,
        }
    }
}

/// Builds the AJAX endpoint URL for one review page, rooted at the profile
/// URL's origin.
///
/// # Errors
///
/// Returns [`ScrapeError::InvalidUrl`] if `profile_url` has no parseable
/// origin.
pub fn reviews_endpoint(
    profile_url: &str,
    professional_id: &str,
    page: u32,
) -> Result<String, ScrapeError> {
    let url = reqwest::Url::parse(profile_url).map_err(|e| ScrapeError::InvalidUrl {
        url: profile_url.to_owned(),
        reason: e.to_string(),
    })?;
    let origin = url.origin().ascii_serialization();
    if origin == "null" {
        return Err(ScrapeError::InvalidUrl {
            url: profile_url.to_owned(),
            reason: "opaque origin".to_owned(),
        });
    }
    Ok(format!("{origin}/ajax/reviews/{professional_id}/{page}"))
}

/// Collects reviews until at least `target_count` have been accumulated.
///
/// `seed` is page 1, already extracted from the profile document. The
/// target is advisory: page granularity may overshoot it, and a malformed
/// or failing endpoint ends the loop early with whatever was collected.
/// The result always contains at least the seed.
pub async fn collect_reviews(
    client: &DirectoryClient,
    seed: Vec<Review>,
    profile_url: &str,
    professional_id: &str,
    target_count: usize,
) -> Vec<Review> {
    let mut collected = seed;
    let mut page: u32 = 2;

    while collected.len() < target_count {
        let url = match reviews_endpoint(profile_url, professional_id, page) {
            Ok(url) => url,
            Err(err) => {
                tracing::warn!(profile_url, error = %err, "cannot build reviews endpoint");
                break;
            }
        };

        client.polite_delay().await;
        let response = match client.fetch_json::<ReviewsPage>(&url, "reviews page").await {
            Ok(response) => response,
            Err(ScrapeError::Deserialize { .. }) => {
                tracing::debug!(url = %url, page, "reviews payload lacks expected shape — stopping");
                break;
            }
            Err(err) => {
                tracing::warn!(url = %url, page, error = %err, "reviews page fetch failed — keeping partial set");
                break;
            }
        };

        if response.opinions.is_empty() {
            // The endpoint reports pages but serves nothing; without this
            // stop the advisory target would loop forever.
            tracing::debug!(url = %url, page, "empty reviews page — stopping");
            break;
        }

        collected.extend(response.opinions.into_iter().map(Review::from));
        page += 1;
    }

    tracing::debug!(
        profile_url,
        collected = collected.len(),
        target = target_count,
        "review collection finished"
    );
    collected
}
