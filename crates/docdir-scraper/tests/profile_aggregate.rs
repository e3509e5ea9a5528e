//! Integration tests for profile aggregation and its nested resolvers.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use docdir_core::ListingEntry;
use docdir_scraper::{profile, DirectoryClient};

fn test_client() -> DirectoryClient {
    DirectoryClient::new(5, "docdir-test/0.1", 1, 0).expect("failed to build test DirectoryClient")
}

fn entry(profile_url: Option<String>, review_count: u32) -> ListingEntry {
    ListingEntry {
        professional_name: Some("Dr. Ana Souza".to_string()),
        profile_url,
        specialties: vec!["Cardiology".to_string()],
        register_id: Some("CRM 12345".to_string()),
        review_count,
        city: "Rio de Janeiro".to_string(),
    }
}

/// A profile document with `visible` rendered reviews and the given
/// doctor id; optionally a "load more questions" link.
fn profile_page(doctor_id: &str, visible: usize, questions_link: bool) -> String {
    let reviews: String = (0..visible)
        .map(|i| {
            format!(
                r#"<div class="opinion-item">
                   <span class="opinion-author">Patient {i}</span>
                   <time class="opinion-date" datetime="2024-01-{:02}">date</time>
                   <p class="opinion-comment">Visible review {i}</p></div>"#,
                i + 1
            )
        })
        .collect();
    let questions = if questions_link {
        r#"<a class="more-questions" href="/dr-ana/questions">More questions</a>"#
    } else {
        ""
    };
    format!(
        r#"<html><body><div id="profile" data-doctor-id="{doctor_id}">
           <h1 itemprop="name">Dr. Ana Souza</h1>
           <div data-test-id="profile-about">About text.</div>
           {reviews}{questions}</div></body></html>"#
    )
}

/// One page of the reviews AJAX payload with `count` reviews.
fn reviews_payload(count: usize, page: u32) -> serde_json::Value {
    let opinions: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            json!({
                "author": format!("Ajax p{page} {i}"),
                "date": "2024-02-01",
                "comment": format!("Paged review {i}")
            })
        })
        .collect();
    json!({"rows": 25, "limit": 10, "opinions": opinions})
}

#[tokio::test]
async fn review_shortfall_triggers_exactly_enough_paginated_fetches() {
    let server = MockServer::start().await;
    let profile_url = format!("{}/dr-ana", server.uri());

    Mock::given(method("GET"))
        .and(path("/dr-ana"))
        .respond_with(ResponseTemplate::new(200).set_body_string(profile_page("abc-123", 10, false)))
        .expect(1)
        .mount(&server)
        .await;

    // 10 visible seed plus 10 per page: pages 2 and 3 reach 30 >= 25.
    for page in [2u32, 3] {
        Mock::given(method("GET"))
            .and(path(format!("/ajax/reviews/abc-123/{page}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(reviews_payload(10, page)))
            .expect(1)
            .mount(&server)
            .await;
    }
    // The target is met after page 3; page 4 must never be requested.
    Mock::given(method("GET"))
        .and(path("/ajax/reviews/abc-123/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reviews_payload(10, 4)))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client();
    let detail = profile::aggregate(&client, &entry(Some(profile_url), 25)).await;

    assert_eq!(detail.reviews.len(), 30);
    // Seed first, paginated pages appended in order.
    assert_eq!(detail.reviews[0].reviewer_name.as_deref(), Some("Patient 0"));
    assert_eq!(detail.reviews[10].reviewer_name.as_deref(), Some("Ajax p2 0"));
    assert_eq!(detail.reviews[29].reviewer_name.as_deref(), Some("Ajax p3 9"));
}

#[tokio::test]
async fn malformed_reviews_payload_keeps_partial_set() {
    let server = MockServer::start().await;
    let profile_url = format!("{}/dr-ana", server.uri());

    Mock::given(method("GET"))
        .and(path("/dr-ana"))
        .respond_with(ResponseTemplate::new(200).set_body_string(profile_page("abc-123", 10, false)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ajax/reviews/abc-123/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reviews_payload(10, 2)))
        .mount(&server)
        .await;
    // Page 3 lacks the rows/limit metadata: the loop must stop there.
    Mock::given(method("GET"))
        .and(path("/ajax/reviews/abc-123/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"opinions": []})))
        .mount(&server)
        .await;

    let client = test_client();
    let detail = profile::aggregate(&client, &entry(Some(profile_url), 25)).await;

    // 10 visible + one good page, then the malformed stop. Partial, kept.
    assert_eq!(detail.reviews.len(), 20);
}

#[tokio::test]
async fn enough_visible_reviews_skip_the_paginator() {
    let server = MockServer::start().await;
    let profile_url = format!("{}/dr-ana", server.uri());

    Mock::given(method("GET"))
        .and(path("/dr-ana"))
        .respond_with(ResponseTemplate::new(200).set_body_string(profile_page("abc-123", 3, false)))
        .mount(&server)
        .await;

    let client = test_client();
    let detail = profile::aggregate(&client, &entry(Some(profile_url), 3)).await;

    assert_eq!(detail.reviews.len(), 3);
    // Only the profile document itself was fetched.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn profile_fetch_failure_degrades_to_empty_detail() {
    let server = MockServer::start().await;
    let profile_url = format!("{}/dr-gone", server.uri());

    Mock::given(method("GET"))
        .and(path("/dr-gone"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client();
    let record = profile::resolve_record(&client, entry(Some(profile_url.clone()), 25)).await;

    // Summary survives; detail carries only the origin URL.
    assert_eq!(record.summary.review_count, 25);
    assert_eq!(record.detail.origin_url, profile_url);
    assert!(record.detail.name.is_none());
    assert!(record.detail.reviews.is_empty());
}

#[tokio::test]
async fn entry_without_profile_url_emits_summary_only() {
    let client = test_client();
    let record = profile::resolve_record(&client, entry(None, 4)).await;
    assert_eq!(record.summary.review_count, 4);
    assert!(record.detail.origin_url.is_empty());
}

#[tokio::test]
async fn qa_thread_resolves_full_answers_and_tolerates_one_failure() {
    let server = MockServer::start().await;
    let profile_url = format!("{}/dr-ana", server.uri());

    Mock::given(method("GET"))
        .and(path("/dr-ana"))
        .respond_with(ResponseTemplate::new(200).set_body_string(profile_page("abc-123", 0, true)))
        .mount(&server)
        .await;

    let qa_page = r#"<html><body>
        <div class="question-item">
            <h3 class="question-title">Is the exam painful?</h3>
            <span class="question-category">Cardiology</span>
            <div class="answer-body">Not at all, the…</div>
            <a class="full-answer" href="/answers/991">Read more</a>
        </div>
        <div class="question-item">
            <h3 class="question-title">How long is a consultation?</h3>
            <div class="answer-body">Around forty minutes.</div>
        </div>
        <div class="question-item">
            <h3 class="question-title">Do you take insurance?</h3>
            <div class="answer-body">Yes, see…</div>
            <a class="full-answer" href="/answers/404">Read more</a>
        </div>
        </body></html>"#;
    Mock::given(method("GET"))
        .and(path("/dr-ana/questions"))
        .respond_with(ResponseTemplate::new(200).set_body_string(qa_page))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/answers/991"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<div class="answer-full">Not at all, the exam is painless and quick.</div>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/answers/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client();
    let detail = profile::aggregate(&client, &entry(Some(profile_url), 0)).await;

    assert_eq!(detail.qa.len(), 3);
    assert_eq!(
        detail.qa[0].answer_text,
        "Not at all, the exam is painless and quick."
    );
    assert_eq!(detail.qa[1].answer_text, "Around forty minutes.");
    // The failed follow-up empties only its own answer.
    assert_eq!(detail.qa[2].answer_text, "");
    assert_eq!(detail.qa[2].question_title.as_deref(), Some("Do you take insurance?"));
}

#[tokio::test]
async fn profile_without_questions_link_has_empty_qa() {
    let server = MockServer::start().await;
    let profile_url = format!("{}/dr-ana", server.uri());

    Mock::given(method("GET"))
        .and(path("/dr-ana"))
        .respond_with(ResponseTemplate::new(200).set_body_string(profile_page("abc-123", 1, false)))
        .mount(&server)
        .await;

    let client = test_client();
    let detail = profile::aggregate(&client, &entry(Some(profile_url), 1)).await;
    assert!(detail.qa.is_empty());
}
