pub mod books;
pub mod files;
pub mod genres;
pub mod stats;
pub mod suggestions;

/// Generates `create`, `get`, `update`, and `delete` methods for an entity client.
///
/// The `list` method is NOT generated because each entity has different filter parameters.
macro_rules! define_client_crud {
    (
        entity_path: $path:expr,
        id_type: $id:ty,
        entity_type: $entity:ty,
        new_type: $new:ty,
        update_type: $update:ty
    ) => {
        pub async fn create(&self, payload: &$new) -> anyhow::Result<$entity> {
            let url = self.client.endpoint($path)?;
            let response = self
                .client
                .request(reqwest::Method::POST, url)
                .json(payload)
                .send()
                .await?;
            self.client.handle_response(response).await
        }

        pub async fn get(&self, id: $id) -> anyhow::Result<$entity> {
            let url = self.client.endpoint(&format!(concat!($path, "/{}"), id))?;
            let response = self
                .client
                .request(reqwest::Method::GET, url)
                .send()
                .await?;
            self.client.handle_response(response).await
        }

        pub async fn update(&self, id: $id, payload: &$update) -> anyhow::Result<$entity> {
            let url = self.client.endpoint(&format!(concat!($path, "/{}"), id))?;
            let response = self
                .client
                .request(reqwest::Method::PUT, url)
                .json(payload)
                .send()
                .await?;
            self.client.handle_response(response).await
        }

        pub async fn delete(&self, id: $id) -> anyhow::Result<()> {
            let url = self.client.endpoint(&format!(concat!($path, "/{}"), id))?;
            let response = self
                .client
                .request(reqwest::Method::DELETE, url)
                .send()
                .await?;
            if response.status().is_success() {
                Ok(())
            } else {
                Err(self.client.response_error(response).await)
            }
        }
    };
}

pub(crate) use define_client_crud;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Url};

use crate::application::errors::ErrorResponse;
use crate::domain::ids::UserProfile;

/// Header carrying the active reader for clients that do not keep cookies.
pub const USER_HEADER: &str = "X-Liburutegia-User";

pub struct LiburutegiaClient {
    base_url: Url,
    http: Client,
    user: UserProfile,
}

impl LiburutegiaClient {
    pub fn new(base_url: Url, user: UserProfile) -> Result<Self> {
        let mut normalized = base_url;
        if !normalized.path().ends_with('/') {
            normalized.set_path(&format!("{}/", normalized.path().trim_end_matches('/')));
        }

        let http = Client::builder()
            .user_agent("liburutegia-cli/1.0")
            .build()
            .context("failed to configure HTTP client")?;

        Ok(Self {
            base_url: normalized,
            http,
            user,
        })
    }

    pub fn from_base_url(base_url: &str, user: UserProfile) -> Result<Self> {
        let url = Url::parse(base_url).with_context(|| format!("invalid API url: {base_url}"))?;
        Self::new(url, user)
    }

    pub fn user(&self) -> UserProfile {
        self.user
    }

    pub fn books(&self) -> books::BooksClient<'_> {
        books::BooksClient::new(self)
    }

    pub fn genres(&self) -> genres::GenresClient<'_> {
        genres::GenresClient::new(self)
    }

    pub fn files(&self) -> files::FilesClient<'_> {
        files::FilesClient::new(self)
    }

    pub fn stats(&self) -> stats::StatsClient<'_> {
        stats::StatsClient::new(self)
    }

    pub fn suggestions(&self) -> suggestions::SuggestionsClient<'_> {
        suggestions::SuggestionsClient::new(self)
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("invalid API path: {path}"))
    }

    /// Build a request on behalf of the configured reader.
    pub(crate) fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header(USER_HEADER, self.user.as_str())
    }

    pub(crate) async fn handle_response<T>(&self, response: reqwest::Response) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        if response.status().is_success() {
            response
                .json::<T>()
                .await
                .context("failed to deserialize response body")
        } else {
            Err(self.response_error(response).await)
        }
    }

    pub(crate) async fn response_error(&self, response: reqwest::Response) -> anyhow::Error {
        let status = response.status();
        let bytes = response.bytes().await.unwrap_or_default();

        if let Ok(err) = serde_json::from_slice::<ErrorResponse>(&bytes) {
            return anyhow!("request failed ({status}): {}", err.message);
        }

        let message = String::from_utf8_lossy(&bytes);
        anyhow!("request failed ({status}): {message}")
    }
}
