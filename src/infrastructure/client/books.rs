use anyhow::Result;
use serde::Serialize;

use super::LiburutegiaClient;
use super::define_client_crud;
use crate::domain::books::{Book, NewBook, UpdateBook};
use crate::domain::ids::BookId;
use crate::domain::listing::{BookSortKey, LibraryFilter, SortDirection, SortKey};

pub struct BooksClient<'a> {
    client: &'a LiburutegiaClient,
}

#[derive(Serialize)]
struct ProgressPayload {
    current_page: i32,
}

impl<'a> BooksClient<'a> {
    pub fn new(client: &'a LiburutegiaClient) -> Self {
        Self { client }
    }

    define_client_crud!(
        entity_path: "api/v1/books",
        id_type: BookId,
        entity_type: Book,
        new_type: NewBook,
        update_type: UpdateBook
    );

    pub async fn list(
        &self,
        filter: &LibraryFilter,
        sort: Option<(BookSortKey, SortDirection)>,
    ) -> Result<Vec<Book>> {
        let mut url = self.client.endpoint("api/v1/books")?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
                pairs.append_pair("search", search);
            }
            if let Some(status) = filter.status {
                pairs.append_pair("status", status.as_str());
            }
            if let Some(genre) = filter.genre.as_deref() {
                pairs.append_pair("genre", genre);
            }
            if let Some((key, direction)) = sort {
                pairs.append_pair("sort", key.query_value());
                pairs.append_pair("direction", direction.as_str());
            }
        }
        let response = self
            .client
            .request(reqwest::Method::GET, url)
            .send()
            .await?;
        self.client.handle_response(response).await
    }

    pub async fn progress(&self, id: BookId, current_page: i32) -> Result<Book> {
        let url = self
            .client
            .endpoint(&format!("api/v1/books/{id}/progress"))?;
        let response = self
            .client
            .request(reqwest::Method::POST, url)
            .json(&ProgressPayload { current_page })
            .send()
            .await?;
        self.client.handle_response(response).await
    }
}
