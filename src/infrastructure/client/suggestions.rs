use anyhow::Result;

use super::LiburutegiaClient;
use crate::infrastructure::ai::{BookSuggestion, SuggestionRequest};

pub struct SuggestionsClient<'a> {
    client: &'a LiburutegiaClient,
}

impl<'a> SuggestionsClient<'a> {
    pub fn new(client: &'a LiburutegiaClient) -> Self {
        Self { client }
    }

    pub async fn suggest(&self, request: &SuggestionRequest) -> Result<BookSuggestion> {
        let url = self.client.endpoint("api/v1/suggestions")?;
        let response = self
            .client
            .request(reqwest::Method::POST, url)
            .json(request)
            .send()
            .await?;
        self.client.handle_response(response).await
    }
}
