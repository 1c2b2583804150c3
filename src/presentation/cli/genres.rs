use anyhow::Result;
use clap::{Args, Subcommand};

use super::{confirm, print_json};
use crate::domain::genres::NewGenre;
use crate::domain::ids::GenreId;
use crate::infrastructure::client::LiburutegiaClient;

#[derive(Debug, Subcommand)]
pub enum GenreCommands {
    /// Add a genre to the list
    Add(AddGenreCommand),
    /// List all genres
    List,
    /// Remove a genre from the list (books keep theirs)
    Delete(DeleteGenreCommand),
}

pub async fn run(client: &LiburutegiaClient, cmd: GenreCommands) -> Result<()> {
    match cmd {
        GenreCommands::Add(c) => add_genre(client, c).await,
        GenreCommands::List => list_genres(client).await,
        GenreCommands::Delete(c) => delete_genre(client, c).await,
    }
}

#[derive(Debug, Args)]
pub struct AddGenreCommand {
    #[arg(long)]
    pub name: String,
}

pub async fn add_genre(client: &LiburutegiaClient, command: AddGenreCommand) -> Result<()> {
    let genre = client
        .genres()
        .create(&NewGenre { name: command.name })
        .await?;
    print_json(&genre)
}

pub async fn list_genres(client: &LiburutegiaClient) -> Result<()> {
    let genres = client.genres().list().await?;
    print_json(&genres)
}

#[derive(Debug, Args)]
pub struct DeleteGenreCommand {
    #[arg(long)]
    pub id: GenreId,
    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

pub async fn delete_genre(client: &LiburutegiaClient, command: DeleteGenreCommand) -> Result<()> {
    let question = format!(
        "Delete genre {}? Books with this genre keep it.",
        command.id
    );
    if !command.yes && !confirm(&question)? {
        eprintln!("Deletion cancelled.");
        return Ok(());
    }

    client.genres().delete(command.id).await?;
    eprintln!("Deleted genre {}", command.id);
    Ok(())
}
