use anyhow::Result;

use super::LiburutegiaClient;
use crate::domain::genres::{Genre, NewGenre};
use crate::domain::ids::GenreId;

pub struct GenresClient<'a> {
    client: &'a LiburutegiaClient,
}

impl<'a> GenresClient<'a> {
    pub fn new(client: &'a LiburutegiaClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, payload: &NewGenre) -> Result<Genre> {
        let url = self.client.endpoint("api/v1/genres")?;
        let response = self
            .client
            .request(reqwest::Method::POST, url)
            .json(payload)
            .send()
            .await?;
        self.client.handle_response(response).await
    }

    pub async fn list(&self) -> Result<Vec<Genre>> {
        let url = self.client.endpoint("api/v1/genres")?;
        let response = self
            .client
            .request(reqwest::Method::GET, url)
            .send()
            .await?;
        self.client.handle_response(response).await
    }

    pub async fn delete(&self, id: GenreId) -> Result<()> {
        let url = self.client.endpoint(&format!("api/v1/genres/{id}"))?;
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
}
