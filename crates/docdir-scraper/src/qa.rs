//! Q&A resolution: question list plus optional full-answer follow-ups.
//!
//! The question list is fetched once; further pagination of the list is
//! not attempted (known limitation of the reference behavior, kept as
//! documented). Each truncated answer is resolved with a single extra
//! fetch — an explicit two-step rather than recursion, so the nested
//! fetch depth stays bounded at one.

use docdir_core::QaEntry;
use scraper::Html;

use crate::client::DirectoryClient;
use crate::extract::{self, QaBlock};

/// Fetches the question-list page and resolves every answer to its full
/// text.
///
/// A failure fetching the list yields no entries. A failure resolving one
/// full answer yields an empty string for that entry only — the question
/// is kept and the batch continues.
pub async fn collect_qa(client: &DirectoryClient, list_url: &str) -> Vec<QaEntry> {
    let body = match client.fetch_html(list_url).await {
        Ok(body) => body,
        Err(err) => {
            tracing::warn!(url = list_url, error = %err, "question list fetch failed");
            return Vec::new();
        }
    };

    let blocks = blocks_from_body(&body);
    let mut entries = Vec::with_capacity(blocks.len());

    for block in blocks {
        let answer = resolve_answer(client, list_url, &block).await;
        entries.push(extract::qa_entry(block, answer));
    }

    tracing::debug!(url = list_url, count = entries.len(), "questions resolved");
    entries
}

fn blocks_from_body(body: &str) -> Vec<QaBlock> {
    let doc = Html::parse_document(body);
    extract::qa_blocks(&doc)
}

/// The answer text for one block: the linked full answer when a permalink
/// exists, the inline text otherwise, an empty string when neither can be
/// obtained.
async fn resolve_answer(client: &DirectoryClient, list_url: &str, block: &QaBlock) -> String {
    let Some(href) = &block.full_answer_url else {
        return block.inline_answer.clone().unwrap_or_default();
    };

    let Some(url) = absolutize(list_url, href) else {
        tracing::warn!(url = list_url, href = %href, "unusable full-answer link");
        return String::new();
    };

    client.polite_delay().await;
    match client.fetch_html(&url).await {
        Ok(body) => full_answer_from_body(&body).unwrap_or_default(),
        Err(err) => {
            tracing::warn!(url = %url, error = %err, "full answer fetch failed — empty answer kept");
            String::new()
        }
    }
}

fn full_answer_from_body(body: &str) -> Option<String> {
    let doc = Html::parse_document(body);
    extract::full_answer_text(&doc)
}

/// Resolves a possibly relative permalink against the list page URL.
fn absolutize(base: &str, href: &str) -> Option<String> {
    let base = reqwest::Url::parse(base).ok()?;
    base.join(href).ok().map(|u| u.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolutize_relative_permalink() {
        assert_eq!(
            absolutize("https://example.com/dr-ana/questions", "/answers/991").as_deref(),
            Some("https://example.com/answers/991")
        );
    }

    #[test]
    fn absolutize_keeps_absolute_permalink() {
        assert_eq!(
            absolutize(
                "https://example.com/dr-ana/questions",
                "https://cdn.example.com/answers/991"
            )
            .as_deref(),
            Some("https://cdn.example.com/answers/991")
        );
    }

    #[test]
    fn absolutize_bad_base_is_none() {
        assert!(absolutize("nope", "/answers/1").is_none());
    }
}
