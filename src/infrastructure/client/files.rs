use anyhow::{Result, anyhow};
use reqwest::Url;
use reqwest::header::CONTENT_TYPE;

use super::LiburutegiaClient;
use crate::domain::files::SharedFile;

pub struct FilesClient<'a> {
    client: &'a LiburutegiaClient,
}

impl<'a> FilesClient<'a> {
    pub fn new(client: &'a LiburutegiaClient) -> Self {
        Self { client }
    }

    /// URL of a single file, with the name percent-encoded as one segment.
    fn file_url(&self, name: &str) -> Result<Url> {
        let mut url = self.client.endpoint("api/v1/files")?;
        url.path_segments_mut()
            .map_err(|()| anyhow!("API url cannot take a file name"))?
            .push(name);
        Ok(url)
    }

    pub async fn list(&self) -> Result<Vec<SharedFile>> {
        let url = self.client.endpoint("api/v1/files")?;
        let response = self
            .client
            .request(reqwest::Method::GET, url)
            .send()
            .await?;
        self.client.handle_response(response).await
    }

    pub async fn upload(&self, name: &str, content_type: &str, data: Vec<u8>) -> Result<SharedFile> {
        let url = self.file_url(name)?;
        let response = self
            .client
            .request(reqwest::Method::PUT, url)
            .header(CONTENT_TYPE, content_type)
            .body(data)
            .send()
            .await?;
        self.client.handle_response(response).await
    }

    pub async fn download(&self, name: &str) -> Result<Vec<u8>> {
        let url = self.file_url(name)?;
        let response = self
            .client
            .request(reqwest::Method::GET, url)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(self.client.response_error(response).await);
        }
        Ok(response.bytes().await?.to_vec())
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        let url = self.file_url(name)?;
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
