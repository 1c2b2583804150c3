use std::sync::Arc;

use liburutegia::application::routes::app_router;
use liburutegia::application::state::{AppState, AppStateConfig};
use liburutegia::domain::books::{Book, NewBook};
use liburutegia::domain::ids::UserProfile;
use liburutegia::domain::repositories::BookRepository;
use liburutegia::infrastructure::client::USER_HEADER;
use liburutegia::infrastructure::database::{Database, DatabasePool};
use reqwest::{Client, RequestBuilder};
use tokio::net::TcpListener;
use tokio::task::AbortHandle;

pub struct TestApp {
    pub address: String,
    pub pool: DatabasePool,
    pub book_repo: Arc<dyn BookRepository>,
    pub mock_server: Option<wiremock::MockServer>,
    /// Keeps cookies between requests, like a browser would.
    pub client: Client,
    server_handle: AbortHandle,
}

impl TestApp {
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.address, path)
    }

    pub fn get_as(&self, user: UserProfile, path: &str) -> RequestBuilder {
        self.client
            .get(self.api_url(path))
            .header(USER_HEADER, user.as_str())
    }

    pub fn post_as(&self, user: UserProfile, path: &str) -> RequestBuilder {
        self.client
            .post(self.api_url(path))
            .header(USER_HEADER, user.as_str())
    }

    pub fn put_as(&self, user: UserProfile, path: &str) -> RequestBuilder {
        self.client
            .put(self.api_url(path))
            .header(USER_HEADER, user.as_str())
    }

    pub fn delete_as(&self, user: UserProfile, path: &str) -> RequestBuilder {
        self.client
            .delete(self.api_url(path))
            .header(USER_HEADER, user.as_str())
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}

fn test_state_config(openrouter_url: String, api_key: &str) -> AppStateConfig {
    AppStateConfig {
        insecure_cookies: true,
        openrouter_url,
        openrouter_api_key: api_key.to_string(),
        openrouter_model: "test/model".to_string(),
    }
}

pub async fn spawn_app() -> TestApp {
    let config = test_state_config(
        liburutegia::infrastructure::ai::OPENROUTER_URL.to_string(),
        "",
    );
    spawn_app_inner(config, None).await
}

/// Suggestions enabled, pointed at a local mock instead of OpenRouter.
pub async fn spawn_app_with_mock_ai() -> TestApp {
    let mock_server = wiremock::MockServer::start().await;
    let config = test_state_config(
        format!("{}/api/v1/chat/completions", mock_server.uri()),
        "test-key",
    );
    spawn_app_inner(config, Some(mock_server)).await
}

async fn spawn_app_inner(
    config: AppStateConfig,
    mock_server: Option<wiremock::MockServer>,
) -> TestApp {
    let database = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");
    let pool = database.clone_pool();
    let state = AppState::from_database(&database, config).expect("Failed to build app state");
    let book_repo = state.book_repo.clone();

    let app = app_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let local_addr = listener.local_addr().expect("Failed to get local address");
    let address = format!("http://{local_addr}");

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Server failed to start");
    })
    .abort_handle();

    let client = Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build HTTP client");

    TestApp {
        address,
        pool,
        book_repo,
        mock_server,
        client,
        server_handle,
    }
}

pub fn new_book(title: &str, author: &str, total_pages: i32) -> NewBook {
    NewBook {
        title: title.to_string(),
        author: author.to_string(),
        total_pages,
        ..Default::default()
    }
}

pub async fn create_book(app: &TestApp, user: UserProfile, book: &NewBook) -> Book {
    let response = app
        .post_as(user, "/books")
        .json(book)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 201, "book creation should succeed");
    response.json().await.expect("Failed to parse book")
}
