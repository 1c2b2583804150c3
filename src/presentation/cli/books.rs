use anyhow::{Result, bail};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use tracing::warn;

use super::{confirm, parse_created_at, parse_status, print_json};
use crate::domain::books::{Book, BookStatus, NewBook, UpdateBook};
use crate::domain::formatting::format_rating;
use crate::domain::ids::BookId;
use crate::domain::listing::{BookSortKey, LibraryFilter, SortDirection, SortKey};
use crate::infrastructure::ai::SuggestionRequest;
use crate::infrastructure::client::LiburutegiaClient;
use crate::presentation::view_state::{Action, Effect, ViewState};

#[derive(Debug, Subcommand)]
pub enum BookCommands {
    /// Add a new book
    Add(AddBookCommand),
    /// List the reader's books
    List(ListBooksCommand),
    /// Get a book by ID
    Get(GetBookCommand),
    /// Update a book
    Update(UpdateBookCommand),
    /// Record reading progress
    Progress(ProgressCommand),
    /// Delete a book
    Delete(DeleteBookCommand),
}

pub async fn run(client: &LiburutegiaClient, cmd: BookCommands) -> Result<()> {
    match cmd {
        BookCommands::Add(c) => add_book(client, c).await,
        BookCommands::List(c) => list_books(client, c).await,
        BookCommands::Get(c) => get_book(client, c).await,
        BookCommands::Update(c) => update_book(client, c).await,
        BookCommands::Progress(c) => record_progress(client, c).await,
        BookCommands::Delete(c) => delete_book(client, c).await,
    }
}

#[derive(Debug, Args)]
pub struct AddBookCommand {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub author: String,
    #[arg(long)]
    pub genre: Option<String>,
    /// Total number of pages
    #[arg(long)]
    pub pages: Option<i32>,
    #[arg(long)]
    pub current_page: Option<i32>,
    #[arg(long, value_parser = parse_status)]
    pub status: Option<BookStatus>,
    #[arg(long)]
    pub year: Option<i32>,
    #[arg(long)]
    pub rating: Option<i32>,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long)]
    pub review: Option<String>,
    #[arg(long)]
    pub cover_url: Option<String>,
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
    #[arg(long)]
    pub finish_date: Option<NaiveDate>,
    /// Override creation timestamp (e.g. 2025-08-05T10:00:00Z or 2025-08-05)
    #[arg(long)]
    pub created_at: Option<String>,
    /// Fill genre, pages, year and notes from an AI suggestion first
    #[arg(long)]
    pub suggest: bool,
}

pub async fn add_book(client: &LiburutegiaClient, command: AddBookCommand) -> Result<()> {
    let created_at = command
        .created_at
        .as_deref()
        .map(parse_created_at)
        .transpose()?;

    let mut payload = NewBook {
        title: command.title.clone(),
        author: command.author.clone(),
        ..Default::default()
    };

    if command.suggest {
        let request = SuggestionRequest {
            title: command.title.clone(),
            author: Some(command.author.clone()),
        };
        match client.suggestions().suggest(&request).await {
            Ok(suggestion) => suggestion.apply_to(&mut payload),
            Err(err) => warn!(error = %err, "suggestion failed, adding the book without it"),
        }
    }

    // Explicit flags win over suggested values.
    if command.genre.is_some() {
        payload.genre = command.genre;
    }
    if let Some(pages) = command.pages {
        payload.total_pages = pages;
    }
    if command.year.is_some() {
        payload.year = command.year;
    }
    if command.notes.is_some() {
        payload.notes = command.notes;
    }
    payload.current_page = command.current_page.unwrap_or_default();
    payload.status = command.status;
    payload.rating = command.rating;
    payload.review = command.review;
    payload.cover_url = command.cover_url;
    payload.start_date = command.start_date;
    payload.finish_date = command.finish_date;
    payload.created_at = created_at;

    let book = client.books().create(&payload).await?;
    print_json(&book)
}

#[derive(Debug, Args)]
pub struct ListBooksCommand {
    /// Match against title or author
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long, value_parser = parse_status)]
    pub status: Option<BookStatus>,
    #[arg(long)]
    pub genre: Option<String>,
    /// created-at, title, author, progress or rating
    #[arg(long)]
    pub sort: Option<String>,
    /// asc or desc
    #[arg(long)]
    pub direction: Option<String>,
    /// Print one line per book instead of JSON
    #[arg(long)]
    pub summary: bool,
}

pub async fn list_books(client: &LiburutegiaClient, command: ListBooksCommand) -> Result<()> {
    let filter = LibraryFilter {
        search: command.search,
        status: command.status,
        genre: command.genre,
    };

    let sort = match command.sort.as_deref() {
        Some(raw) => {
            let Some(key) = BookSortKey::from_query(raw) else {
                bail!("unknown sort key '{raw}'");
            };
            let direction = match command.direction.as_deref() {
                Some(dir) => match SortDirection::from_query(dir) {
                    Some(direction) => direction,
                    None => bail!("unknown direction '{dir}', expected asc or desc"),
                },
                None => key.default_direction(),
            };
            Some((key, direction))
        }
        None => None,
    };

    let books = client.books().list(&filter, sort).await?;
    if command.summary {
        for book in &books {
            println!("{}", summary_line(book));
        }
        return Ok(());
    }
    print_json(&books)
}

/// One-line rendering used by `book list --summary`.
pub fn summary_line(book: &Book) -> String {
    let mut line = format!(
        "{} by {} · {}",
        book.title,
        book.author,
        book.status.display_label()
    );
    if book.status == BookStatus::Reading {
        line.push_str(&format!(" ({}/{})", book.current_page, book.total_pages));
    }
    if let Some(rating) = book.rating {
        line.push_str(" · ");
        line.push_str(&format_rating(rating));
    }
    line
}

#[derive(Debug, Args)]
pub struct GetBookCommand {
    #[arg(long)]
    pub id: BookId,
}

pub async fn get_book(client: &LiburutegiaClient, command: GetBookCommand) -> Result<()> {
    let book = client.books().get(command.id).await?;
    print_json(&book)
}

#[derive(Debug, Args)]
pub struct UpdateBookCommand {
    #[arg(long)]
    pub id: BookId,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub genre: Option<String>,
    #[arg(long)]
    pub pages: Option<i32>,
    #[arg(long)]
    pub current_page: Option<i32>,
    #[arg(long, value_parser = parse_status)]
    pub status: Option<BookStatus>,
    #[arg(long)]
    pub year: Option<i32>,
    /// 1-5, or 0 to clear
    #[arg(long)]
    pub rating: Option<i32>,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long)]
    pub review: Option<String>,
    #[arg(long)]
    pub cover_url: Option<String>,
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
    #[arg(long)]
    pub finish_date: Option<NaiveDate>,
}

pub async fn update_book(client: &LiburutegiaClient, command: UpdateBookCommand) -> Result<()> {
    let payload = UpdateBook {
        title: command.title,
        author: command.author,
        genre: command.genre.map(Some),
        total_pages: command.pages,
        current_page: command.current_page,
        status: command.status,
        year: command.year.map(Some),
        rating: command.rating.map(Some),
        notes: command.notes.map(Some),
        review: command.review.map(Some),
        cover_url: command.cover_url.map(Some),
        start_date: command.start_date.map(Some),
        finish_date: command.finish_date.map(Some),
    };

    let book = client.books().update(command.id, &payload).await?;
    print_json(&book)
}

#[derive(Debug, Args)]
pub struct ProgressCommand {
    #[arg(long)]
    pub id: BookId,
    /// Page the reader is on now
    #[arg(long)]
    pub page: i32,
}

pub async fn record_progress(client: &LiburutegiaClient, command: ProgressCommand) -> Result<()> {
    let book = client.books().progress(command.id, command.page).await?;
    print_json(&book)
}

#[derive(Debug, Args)]
pub struct DeleteBookCommand {
    #[arg(long)]
    pub id: BookId,
    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

pub async fn delete_book(client: &LiburutegiaClient, command: DeleteBookCommand) -> Result<()> {
    let book = client.books().get(command.id).await?;

    let state = ViewState::for_user(client.user())
        .apply(Action::RequestDelete(book.id))
        .state;

    let confirmed = command.yes || confirm(&format!("Delete \"{}\" by {}?", book.title, book.author))?;
    let transition = if confirmed {
        state.apply(Action::ConfirmDelete)
    } else {
        state.apply(Action::CancelDelete)
    };

    let Some(Effect::DeleteBook { id }) = transition.effect else {
        eprintln!("Deletion cancelled.");
        return Ok(());
    };

    client.books().delete(id).await?;
    eprintln!("Deleted book {id}");
    Ok(())
}
