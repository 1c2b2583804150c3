use liburutegia::domain::files::SharedFile;
use liburutegia::domain::ids::UserProfile;

use crate::helpers::{TestApp, spawn_app};

async fn upload(app: &TestApp, name: &str, content_type: &str, body: &[u8]) -> reqwest::Response {
    app.put_as(UserProfile::Maixux, &format!("/files/{name}"))
        .header("content-type", content_type)
        .body(body.to_vec())
        .send()
        .await
        .unwrap()
}

async fn list_files(app: &TestApp) -> Vec<SharedFile> {
    app.get_as(UserProfile::Arantxa, "/files")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn uploaded_file_is_listed_and_downloadable() {
    let app = spawn_app().await;

    let response = upload(&app, "irakurketak 2026.csv", "text/csv", b"title,author\n").await;
    assert_eq!(response.status(), 201);
    let stored: SharedFile = response.json().await.unwrap();
    assert_eq!(stored.name, "irakurketak 2026.csv");
    assert_eq!(stored.size, 13);
    assert_eq!(stored.content_type, "text/csv");

    let files = list_files(&app).await;
    assert_eq!(files, vec![stored]);

    let response = app
        .get_as(UserProfile::Arantxa, "/files/irakurketak 2026.csv")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["content-type"], "text/csv");
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=\"irakurketak 2026.csv\""
    );
    assert_eq!(response.bytes().await.unwrap().as_ref(), b"title,author\n");
}

#[tokio::test]
async fn uploading_the_same_name_replaces_the_file() {
    let app = spawn_app().await;

    upload(&app, "zerrenda.txt", "text/plain", b"lehen").await;
    upload(&app, "zerrenda.txt", "text/plain", b"bigarren").await;

    let files = list_files(&app).await;
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].size, 8);
}

#[tokio::test]
async fn files_are_listed_newest_first() {
    let app = spawn_app().await;

    for name in ["lehena.txt", "bigarrena.txt", "hirugarrena.txt"] {
        upload(&app, name, "text/plain", b"x").await;
    }

    let names: Vec<String> = list_files(&app).await.into_iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["hirugarrena.txt", "bigarrena.txt", "lehena.txt"]);
}

#[tokio::test]
async fn empty_upload_is_rejected() {
    let app = spawn_app().await;

    let response = upload(&app, "hutsa.txt", "text/plain", b"").await;
    assert_eq!(response.status(), 422);
    assert!(list_files(&app).await.is_empty());
}

#[tokio::test]
async fn delete_removes_the_file() {
    let app = spawn_app().await;
    upload(&app, "ezabatu.pdf", "application/pdf", b"%PDF-1.7").await;

    let response = app
        .delete_as(UserProfile::Arantxa, "/files/ezabatu.pdf")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);
    assert!(list_files(&app).await.is_empty());

    let response = app
        .delete_as(UserProfile::Arantxa, "/files/ezabatu.pdf")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn files_need_a_reader() {
    let app = spawn_app().await;

    let response = app.client.get(app.api_url("/files")).send().await.unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn uploads_above_the_json_limit_are_accepted() {
    let app = spawn_app().await;
    let body = vec![7_u8; 2 * 1024 * 1024];

    let response = upload(&app, "handia.bin", "application/octet-stream", &body).await;
    assert_eq!(response.status(), 201);

    let response = app
        .get_as(UserProfile::Maixux, "/files/handia.bin")
        .send()
        .await
        .unwrap();
    assert_eq!(response.bytes().await.unwrap().len(), body.len());
}
