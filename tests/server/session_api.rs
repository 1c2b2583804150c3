use liburutegia::domain::books::Book;
use liburutegia::domain::ids::UserProfile;
use serde_json::{Value, json};

use crate::helpers::{create_book, new_book, spawn_app};

#[tokio::test]
async fn users_endpoint_lists_both_readers() {
    let app = spawn_app().await;

    let users: Vec<UserProfile> = app
        .client
        .get(app.api_url("/users"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(users, UserProfile::ALL.to_vec());
}

#[tokio::test]
async fn session_starts_empty() {
    let app = spawn_app().await;

    let session: Value = app
        .client
        .get(app.api_url("/session"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(session["user"].is_null());
}

#[tokio::test]
async fn selecting_a_reader_sets_a_cookie_used_by_later_requests() {
    let app = spawn_app().await;
    create_book(&app, UserProfile::Maixux, &new_book("Ficciones", "Jorge Luis Borges", 200)).await;

    let response = app
        .client
        .post(app.api_url("/session"))
        .json(&json!({"user": "maixux"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let set_cookie = response.headers()["set-cookie"].to_str().unwrap().to_string();
    assert!(set_cookie.starts_with("liburutegia_user=Maixux"));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(!set_cookie.contains("Secure"));

    let session: Value = app
        .client
        .get(app.api_url("/session"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(session["user"], "Maixux");

    // No header needed once the cookie is set.
    let books: Vec<Book> = app
        .client
        .get(app.api_url("/books"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(books.len(), 1);
}

#[tokio::test]
async fn cookie_takes_precedence_over_header() {
    let app = spawn_app().await;
    create_book(&app, UserProfile::Arantxa, &new_book("Rayuela", "Julio Cortázar", 600)).await;

    app.client
        .post(app.api_url("/session"))
        .json(&json!({"user": "Maixux"}))
        .send()
        .await
        .unwrap();

    let books: Vec<Book> = app
        .get_as(UserProfile::Arantxa, "/books")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(books.is_empty());
}

#[tokio::test]
async fn clearing_the_session_logs_the_reader_out() {
    let app = spawn_app().await;

    app.client
        .post(app.api_url("/session"))
        .json(&json!({"user": "Arantxa"}))
        .send()
        .await
        .unwrap();

    let response = app
        .client
        .delete(app.api_url("/session"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);

    let response = app.client.get(app.api_url("/books")).send().await.unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn selecting_an_unknown_reader_returns_422() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.api_url("/session"))
        .json(&json!({"user": "guest"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 422);
}
