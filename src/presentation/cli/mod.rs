pub mod books;
pub mod files;
pub mod genres;
pub mod stats;
pub mod suggest;

use std::io::{self, BufRead, Write};
use std::net::SocketAddr;

use chrono::{DateTime, NaiveDate, Utc};

use books::BookCommands;
use clap::{Args, Parser, Subcommand};
use files::FileCommands;
use genres::GenreCommands;
use stats::StatsCommand;
use suggest::SuggestCommand;

use crate::domain::books::BookStatus;
use crate::domain::ids::UserProfile;
use crate::infrastructure::ai::DEFAULT_MODEL;

#[derive(Debug, Parser)]
#[command(author, version, about = "Track the books on a shared home library", long_about = None)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "LIBURUTEGIA_URL",
        default_value = "http://localhost:3000"
    )]
    pub api_url: String,

    /// Reader to act as (Maixux or Arantxa)
    #[arg(long, global = true, env = "LIBURUTEGIA_USER", value_parser = parse_user)]
    pub user: Option<UserProfile>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeCommand),

    /// Manage books
    Book {
        #[command(subcommand)]
        command: BookCommands,
    },

    /// Manage the shared genre list
    Genre {
        #[command(subcommand)]
        command: GenreCommands,
    },

    /// Manage the shared files area
    File {
        #[command(subcommand)]
        command: FileCommands,
    },

    /// Show reading statistics
    Stats(StatsCommand),

    /// Ask the AI for a book's genre, length and summary
    Suggest(SuggestCommand),
}

#[derive(Debug, Args)]
pub struct ServeCommand {
    #[arg(
        long,
        env = "LIBURUTEGIA_DATABASE_URL",
        default_value = "sqlite://liburutegia.db"
    )]
    pub database_url: String,

    #[arg(
        long,
        env = "LIBURUTEGIA_BIND_ADDRESS",
        default_value = "127.0.0.1:3000"
    )]
    pub bind_address: SocketAddr,

    /// Send the reader cookie without the Secure flag (plain HTTP setups)
    #[arg(long, env = "LIBURUTEGIA_INSECURE_COOKIES")]
    pub insecure_cookies: bool,

    #[arg(long, env = "LIBURUTEGIA_OPENROUTER_API_KEY")]
    pub openrouter_api_key: Option<String>,

    #[arg(
        long,
        env = "LIBURUTEGIA_OPENROUTER_MODEL",
        default_value = DEFAULT_MODEL
    )]
    pub openrouter_model: String,
}

pub fn parse_user(value: &str) -> Result<UserProfile, String> {
    value.parse::<UserProfile>().map_err(|()| {
        let known: Vec<&str> = UserProfile::ALL.iter().map(UserProfile::as_str).collect();
        format!("unknown reader '{value}', expected one of: {}", known.join(", "))
    })
}

pub fn parse_status(value: &str) -> Result<BookStatus, String> {
    value
        .parse::<BookStatus>()
        .map_err(|()| format!("unknown status '{value}', expected to_read, reading or finished"))
}

pub fn parse_created_at(value: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }
    anyhow::bail!(
        "invalid date format: expected RFC 3339 (e.g. 2025-08-05T10:00:00Z) or YYYY-MM-DD"
    )
}

pub(crate) fn print_json<T>(value: &T) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

/// Ask a yes/no question on stderr; anything but "y" or "yes" is a no.
pub(crate) fn confirm(question: &str) -> anyhow::Result<bool> {
    let mut stderr = io::stderr();
    write!(stderr, "{question} [y/N] ")?;
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
