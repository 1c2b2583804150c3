use anyhow::Result;
use clap::Args;

use super::print_json;
use crate::infrastructure::ai::SuggestionRequest;
use crate::infrastructure::client::LiburutegiaClient;

#[derive(Debug, Args)]
pub struct SuggestCommand {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub author: Option<String>,
}

pub async fn run(client: &LiburutegiaClient, command: SuggestCommand) -> Result<()> {
    let request = SuggestionRequest {
        title: command.title,
        author: command.author,
    };
    let suggestion = client.suggestions().suggest(&request).await?;
    print_json(&suggestion)
}
