use liburutegia::application::errors::ErrorResponse;
use liburutegia::domain::ids::UserProfile;
use liburutegia::infrastructure::ai::BookSuggestion;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{spawn_app, spawn_app_with_mock_ai};

fn chat_reply(content: &str) -> serde_json::Value {
    json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    })
}

#[tokio::test]
async fn suggestions_are_unavailable_without_an_api_key() {
    let app = spawn_app().await;

    let response = app
        .post_as(UserProfile::Maixux, "/suggestions")
        .json(&json!({"title": "Obabakoak"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 503);
}

#[tokio::test]
async fn suggestion_is_parsed_from_a_fenced_reply() {
    let app = spawn_app_with_mock_ai().await;
    let mock_server = app.mock_server.as_ref().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(
            "```json\n{\"genre\": \"Ficción\", \"totalPages\": 440, \"publicationYear\": 1988, \"summary\": \"Stories from a Basque village.\"}\n```",
        )))
        .expect(1)
        .mount(mock_server)
        .await;

    let response = app
        .post_as(UserProfile::Arantxa, "/suggestions")
        .json(&json!({"title": "Obabakoak", "author": "Bernardo Atxaga"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let suggestion: BookSuggestion = response.json().await.unwrap();
    assert_eq!(suggestion.genre.as_deref(), Some("Ficción"));
    assert_eq!(suggestion.total_pages, Some(440));
    assert_eq!(suggestion.year, Some(1988));
    assert_eq!(
        suggestion.summary.as_deref(),
        Some("Stories from a Basque village.")
    );
}

#[tokio::test]
async fn upstream_failure_is_reported_as_500_without_details() {
    let app = spawn_app_with_mock_ai().await;
    let mock_server = app.mock_server.as_ref().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(mock_server)
        .await;

    let response = app
        .post_as(UserProfile::Arantxa, "/suggestions")
        .json(&json!({"title": "Obabakoak"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);
    let body: ErrorResponse = response.json().await.unwrap();
    assert_eq!(body.message, "internal server error");
}

#[tokio::test]
async fn empty_title_is_rejected_before_calling_upstream() {
    let app = spawn_app_with_mock_ai().await;
    let mock_server = app.mock_server.as_ref().unwrap();

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("{}")))
        .expect(0)
        .mount(mock_server)
        .await;

    let response = app
        .post_as(UserProfile::Maixux, "/suggestions")
        .json(&json!({"title": "  "}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 422);
}
