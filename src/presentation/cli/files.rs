use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use super::{confirm, print_json};
use crate::domain::files::DEFAULT_CONTENT_TYPE;
use crate::infrastructure::client::LiburutegiaClient;

#[derive(Debug, Subcommand)]
pub enum FileCommands {
    /// Upload a file to the shared area, replacing one with the same name
    Upload(UploadFileCommand),
    /// List shared files, newest first
    List,
    /// Save a shared file locally
    Download(DownloadFileCommand),
    /// Delete a shared file
    Delete(DeleteFileCommand),
}

pub async fn run(client: &LiburutegiaClient, cmd: FileCommands) -> Result<()> {
    match cmd {
        FileCommands::Upload(c) => upload_file(client, c).await,
        FileCommands::List => list_files(client).await,
        FileCommands::Download(c) => download_file(client, c).await,
        FileCommands::Delete(c) => delete_file(client, c).await,
    }
}

#[derive(Debug, Args)]
pub struct UploadFileCommand {
    #[arg(long)]
    pub path: PathBuf,
    /// Name in the shared area (defaults to the file's own name)
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub content_type: Option<String>,
}

pub async fn upload_file(client: &LiburutegiaClient, command: UploadFileCommand) -> Result<()> {
    let name = match command.name {
        Some(name) => name,
        None => command
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .with_context(|| format!("cannot take a name from {}", command.path.display()))?,
    };
    let content_type = command
        .content_type
        .unwrap_or_else(|| content_type_for(&name).to_string());
    let data = tokio::fs::read(&command.path)
        .await
        .with_context(|| format!("failed to read {}", command.path.display()))?;

    let file = client.files().upload(&name, &content_type, data).await?;
    print_json(&file)
}

pub async fn list_files(client: &LiburutegiaClient) -> Result<()> {
    let files = client.files().list().await?;
    print_json(&files)
}

#[derive(Debug, Args)]
pub struct DownloadFileCommand {
    #[arg(long)]
    pub name: String,
    /// Where to write the file (defaults to its name in the current directory)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub async fn download_file(client: &LiburutegiaClient, command: DownloadFileCommand) -> Result<()> {
    let data = client.files().download(&command.name).await?;
    let output = command
        .output
        .unwrap_or_else(|| PathBuf::from(&command.name));
    tokio::fs::write(&output, &data)
        .await
        .with_context(|| format!("failed to write {}", output.display()))?;
    eprintln!("Saved {} ({} bytes)", output.display(), data.len());
    Ok(())
}

#[derive(Debug, Args)]
pub struct DeleteFileCommand {
    #[arg(long)]
    pub name: String,
    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

pub async fn delete_file(client: &LiburutegiaClient, command: DeleteFileCommand) -> Result<()> {
    if !command.yes && !confirm(&format!("Delete shared file \"{}\"?", command.name))? {
        eprintln!("Deletion cancelled.");
        return Ok(());
    }

    client.files().delete(&command.name).await?;
    eprintln!("Deleted file {}", command.name);
    Ok(())
}

/// Guess a content type from the extension; the server stores whatever it gets.
fn content_type_for(name: &str) -> &'static str {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "epub" => "application/epub+zip",
        "txt" | "md" => "text/plain",
        "csv" => "text/csv",
        "json" => "application/json",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        _ => DEFAULT_CONTENT_TYPE,
    }
}
