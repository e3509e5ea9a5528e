//! Profile aggregation: one fully-resolved record per listing entry.
//!
//! The profile document is fetched once; static fields come straight off
//! it, then the two nested resources are resolved: paginated reviews when
//! the visible ones fall short of the listing's count, and the Q&A thread
//! when a "load more questions" link is present. Every failure past this
//! point degrades to a partial detail; nothing aborts the surrounding walk.

use docdir_core::{ListingEntry, ProfileDetail, Record};
use scraper::Html;

use crate::client::DirectoryClient;
use crate::extract::{self, ProfileParts};
use crate::qa;
use crate::reviews;

/// Builds the detail record for one listing entry.
///
/// A failure fetching the profile document itself yields an empty
/// `ProfileDetail` carrying only the origin URL: partial-dataset
/// tolerance, not an error.
pub async fn aggregate(client: &DirectoryClient, entry: &ListingEntry) -> ProfileDetail {
    let Some(profile_url) = entry.profile_url.as_deref() else {
        tracing::warn!(
            professional = entry.professional_name.as_deref().unwrap_or("<unnamed>"),
            city = %entry.city,
            "listing entry has no profile URL — emitting summary only"
        );
        return ProfileDetail::empty("");
    };

    client.polite_delay().await;
    let body = match client.fetch_html(profile_url).await {
        Ok(body) => body,
        Err(err) => {
            tracing::warn!(url = profile_url, error = %err, "profile fetch failed — emitting empty detail");
            return ProfileDetail::empty(profile_url);
        }
    };

    let ProfileParts {
        mut detail,
        professional_id,
        more_questions_url,
    } = parts_from_body(&body, profile_url);

    let target = entry.review_count as usize;
    if detail.reviews.len() < target {
        match &professional_id {
            Some(id) => {
                let seed = std::mem::take(&mut detail.reviews);
                detail.reviews =
                    reviews::collect_reviews(client, seed, profile_url, id, target).await;
            }
            None => {
                tracing::debug!(
                    url = profile_url,
                    visible = detail.reviews.len(),
                    target,
                    "no professional id on profile — keeping visible reviews only"
                );
            }
        }
    }

    if let Some(href) = &more_questions_url {
        if let Some(list_url) = absolutize(profile_url, href) {
            detail.qa = qa::collect_qa(client, &list_url).await;
        } else {
            tracing::warn!(url = profile_url, href = %href, "unusable question-list link");
        }
    }

    detail
}

/// Convenience composition: listing summary plus aggregated detail.
pub async fn resolve_record(client: &DirectoryClient, entry: ListingEntry) -> Record {
    let detail = aggregate(client, &entry).await;
    Record {
        summary: entry,
        detail,
    }
}

fn parts_from_body(body: &str, origin_url: &str) -> ProfileParts {
    let doc = Html::parse_document(body);
    extract::profile_parts(&doc, origin_url)
}

fn absolutize(base: &str, href: &str) -> Option<String> {
    let base = reqwest::Url::parse(base).ok()?;
    base.join(href).ok().map(|u| u.to_string())
}
