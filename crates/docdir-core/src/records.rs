//! Domain records emitted by the crawler.
//!
//! Serialized field names follow the reference dataset (PascalCase with
//! spaces), so the JSON written to disk is drop-in compatible with consumers
//! of the original exports.

use serde::{Deserialize, Serialize};

/// A sub-region partition key extracted from a listing page's embedded
/// filter configuration. Transient — used only to build filtered listing
/// URLs, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct District {
    pub key: String,
    pub name: String,
}

/// Summary record parsed from one listing-page entry.
///
/// `profile_url` is the join key to the profile document. A field that
/// cannot be extracted is `None`; the entry itself is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    #[serde(rename = "Professional")]
    pub professional_name: Option<String>,
    #[serde(rename = "Profile URL")]
    pub profile_url: Option<String>,
    #[serde(rename = "Specialties")]
    pub specialties: Vec<String>,
    #[serde(rename = "Register ID")]
    pub register_id: Option<String>,
    #[serde(rename = "Review Count")]
    pub review_count: u32,
    #[serde(rename = "City")]
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    #[serde(rename = "Network")]
    pub network: String,
    #[serde(rename = "URL")]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Price")]
    pub price: Option<i64>,
}

/// A single patient review, in the order the site serves them
/// (newest-first). Pages are assumed disjoint; no deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "Name")]
    pub reviewer_name: Option<String>,
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "Comment")]
    pub comment: Option<String>,
}

/// A question with its answer, fully resolved — `answer_text` is never the
/// truncated teaser when a full-answer permalink exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaEntry {
    #[serde(rename = "Question")]
    pub question_title: Option<String>,
    #[serde(rename = "Category")]
    pub category: Option<String>,
    #[serde(rename = "Answer Date")]
    pub answer_date: Option<String>,
    #[serde(rename = "Answer")]
    pub answer_text: String,
}

/// Detail fields merged in from the profile document and its nested
/// resources. All fields absent when the profile fetch itself failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDetail {
    #[serde(rename = "Origin URL")]
    pub origin_url: String,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "About")]
    pub about: Option<String>,
    #[serde(rename = "Experience")]
    pub experience_text: Option<String>,
    #[serde(rename = "Social Links")]
    pub social_links: Vec<SocialLink>,
    #[serde(rename = "Insurance Cover")]
    pub insurance_note: Option<String>,
    #[serde(rename = "AgePublic Range")]
    pub age_public_range: Option<String>,
    #[serde(rename = "Medical Services")]
    pub services: Vec<Service>,
    #[serde(rename = "Patient Reviews")]
    pub reviews: Vec<Review>,
    #[serde(rename = "Health Questions and Answers")]
    pub qa: Vec<QaEntry>,
}

impl ProfileDetail {
    /// The degraded detail used when the profile document could not be
    /// fetched: only the origin URL is carried.
    #[must_use]
    pub fn empty(origin_url: impl Into<String>) -> Self {
        Self {
            origin_url: origin_url.into(),
            name: None,
            about: None,
            experience_text: None,
            social_links: Vec::new(),
            insurance_note: None,
            age_public_range: None,
            services: Vec::new(),
            reviews: Vec::new(),
            qa: Vec::new(),
        }
    }
}

/// The unit emitted per professional: listing summary plus resolved detail.
///
/// Immutable once aggregation returns. After a clean run
/// `detail.reviews.len() >= summary.review_count`; after a degraded run the
/// partial reviews collected before the failure are kept, not discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(flatten)]
    pub summary: ListingEntry,
    #[serde(flatten)]
    pub detail: ProfileDetail,
}
