use anyhow::Result;

use super::LiburutegiaClient;
use crate::domain::stats::StatsSnapshot;

pub struct StatsClient<'a> {
    client: &'a LiburutegiaClient,
}

impl<'a> StatsClient<'a> {
    pub fn new(client: &'a LiburutegiaClient) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> Result<StatsSnapshot> {
        let url = self.client.endpoint("api/v1/stats")?;
        let response = self
            .client
            .request(reqwest::Method::GET, url)
            .send()
            .await?;
        self.client.handle_response(response).await
    }
}
