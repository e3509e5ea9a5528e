//! Field extraction from parsed documents.
//!
//! Pure functions, one concern per field: a field that cannot be extracted
//! yields `None` (or an empty collection) for that field only. An entry is
//! kept whenever it is syntactically present in the list — a bad field
//! never drops the entry, let alone the page.

use docdir_core::{ListingEntry, ProfileDetail, QaEntry, Review, Service, SocialLink};
use scraper::{ElementRef, Html, Selector};

fn sel(selector: &str) -> Selector {
    Selector::parse(selector).expect("valid selector")
}

/// First matching element's text, trimmed; `None` when absent or blank.
fn text_of(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

fn attr_of(scope: ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
    scope
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::to_string)
}

/// Leading integer of a counter label such as `"23 opiniões"`.
fn leading_count(text: &str) -> Option<u32> {
    text.split_whitespace().next()?.parse().ok()
}

/// Digits of a price label such as `"R$ 250"`; `None` when no digits.
fn price_digits(text: &str) -> Option<i64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Comma-separated specialty list from the specializations label.
fn split_specialties(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Listing page
// ---------------------------------------------------------------------------

/// Parses every listing entry on one search-results page.
///
/// An entry is one `li` under `#search-content`; each field is extracted
/// independently and a missing field nulls only itself.
#[must_use]
pub fn listing_entries(doc: &Html, city: &str) -> Vec<ListingEntry> {
    let item_sel = sel("#search-content ul > li");
    let link_sel = sel("a[href]");
    let name_sel = sel(r#"span[itemprop="name"]"#);
    let reviews_sel = sel("span.opinion-numeral");
    let specialties_sel = sel(r#"span[data-test-id="doctor-specializations"]"#);
    let register_sel = sel("span.register-number");

    doc.select(&item_sel)
        .map(|item| ListingEntry {
            professional_name: text_of(item, &name_sel),
            profile_url: attr_of(item, &link_sel, "href"),
            specialties: text_of(item, &specialties_sel)
                .map(|t| split_specialties(&t))
                .unwrap_or_default(),
            register_id: text_of(item, &register_sel),
            review_count: text_of(item, &reviews_sel)
                .and_then(|t| leading_count(&t))
                .unwrap_or(0),
            city: city.to_string(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Profile document
// ---------------------------------------------------------------------------

/// Everything pulled from the profile document in one pass: the static
/// detail fields (with the visible reviews seeded into `detail.reviews`),
/// plus the two handles the nested resolvers need — the opaque professional
/// identifier for the reviews endpoint and the "load more questions" link.
#[derive(Debug)]
pub struct ProfileParts {
    pub detail: ProfileDetail,
    pub professional_id: Option<String>,
    pub more_questions_url: Option<String>,
}

#[must_use]
pub fn profile_parts(doc: &Html, origin_url: &str) -> ProfileParts {
    let name_sel = sel(r#"h1[itemprop="name"]"#);
    let about_sel = sel(r#"div[data-test-id="profile-about"]"#);
    let experience_sel = sel("div.profile-experience");
    let insurance_sel = sel("div.insurance-cover");
    let age_range_sel = sel("span.age-public-range");
    let id_sel = sel("[data-doctor-id]");
    let more_questions_sel = sel("a.more-questions[href]");

    let root = doc.root_element();

    let detail = ProfileDetail {
        origin_url: origin_url.to_string(),
        name: text_of(root, &name_sel),
        about: text_of(root, &about_sel),
        experience_text: text_of(root, &experience_sel),
        social_links: social_links(doc),
        insurance_note: text_of(root, &insurance_sel),
        age_public_range: text_of(root, &age_range_sel),
        services: services(doc),
        reviews: visible_reviews(doc),
        qa: Vec::new(),
    };

    ProfileParts {
        detail,
        professional_id: attr_of(root, &id_sel, "data-doctor-id"),
        more_questions_url: attr_of(root, &more_questions_sel, "href"),
    }
}

fn social_links(doc: &Html) -> Vec<SocialLink> {
    let link_sel = sel("ul.social-links a[href]");
    doc.select(&link_sel)
        .filter_map(|el| {
            let url = el.value().attr("href")?.to_string();
            let network = el
                .value()
                .attr("data-network")
                .map(str::to_string)
                .or_else(|| {
                    let text = el.text().collect::<String>().trim().to_string();
                    (!text.is_empty()).then_some(text)
                })?;
            Some(SocialLink { network, url })
        })
        .collect()
}

fn services(doc: &Html) -> Vec<Service> {
    let item_sel = sel("ul.medical-services > li");
    let name_sel = sel("span.service-name");
    let price_sel = sel("span.service-price");

    doc.select(&item_sel)
        .filter_map(|item| {
            let name = text_of(item, &name_sel)?;
            let price = text_of(item, &price_sel).and_then(|t| price_digits(&t));
            Some(Service { name, price })
        })
        .collect()
}

/// The reviews already rendered on the profile document — page 1 of the
/// review stream, used to seed the paginator.
#[must_use]
pub fn visible_reviews(doc: &Html) -> Vec<Review> {
    let item_sel = sel("div.opinion-item");
    let author_sel = sel("span.opinion-author");
    let date_sel = sel("time.opinion-date");
    let comment_sel = sel("p.opinion-comment");

    doc.select(&item_sel)
        .map(|item| Review {
            reviewer_name: text_of(item, &author_sel),
            date: attr_of(item, &date_sel, "datetime").or_else(|| text_of(item, &date_sel)),
            comment: text_of(item, &comment_sel),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Q&A pages
// ---------------------------------------------------------------------------

/// One question block from the question-list page. When the served answer
/// is a teaser, `full_answer_url` links to the complete text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaBlock {
    pub question_title: Option<String>,
    pub category: Option<String>,
    pub answer_date: Option<String>,
    pub inline_answer: Option<String>,
    pub full_answer_url: Option<String>,
}

#[must_use]
pub fn qa_blocks(doc: &Html) -> Vec<QaBlock> {
    let item_sel = sel("div.question-item");
    let title_sel = sel("h3.question-title");
    let category_sel = sel("span.question-category");
    let date_sel = sel("time.answer-date");
    let answer_sel = sel("div.answer-body");
    let full_link_sel = sel("a.full-answer[href]");

    doc.select(&item_sel)
        .map(|item| QaBlock {
            question_title: text_of(item, &title_sel),
            category: text_of(item, &category_sel),
            answer_date: attr_of(item, &date_sel, "datetime").or_else(|| text_of(item, &date_sel)),
            inline_answer: text_of(item, &answer_sel),
            full_answer_url: attr_of(item, &full_link_sel, "href"),
        })
        .collect()
}

/// The complete answer text on a full-answer permalink page.
#[must_use]
pub fn full_answer_text(doc: &Html) -> Option<String> {
    let answer_sel = sel("div.answer-full");
    doc.select(&answer_sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Builds a [`QaEntry`] from a block and its (possibly resolved) answer.
#[must_use]
pub fn qa_entry(block: QaBlock, answer_text: String) -> QaEntry {
    QaEntry {
        question_title: block.question_title,
        category: block.category,
        answer_date: block.answer_date,
        answer_text,
    }
}
