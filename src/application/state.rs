use std::sync::Arc;

use crate::application::services::BookService;
use crate::domain::repositories::{BookRepository, GenreRepository, SharedFileRepository};
use crate::infrastructure::database::Database;
use crate::infrastructure::repositories::{
    SqlBookRepository, SqlGenreRepository, SqlSharedFileRepository,
};

/// Everything that varies between production and test environments.
pub struct AppStateConfig {
    pub insecure_cookies: bool,
    pub openrouter_url: String,
    /// Empty when suggestions are disabled.
    pub openrouter_api_key: String,
    pub openrouter_model: String,
}

pub struct Repositories {
    pub books: Arc<dyn BookRepository>,
    pub genres: Arc<dyn GenreRepository>,
    pub files: Arc<dyn SharedFileRepository>,
}

#[derive(Clone)]
pub struct AppState {
    pub book_repo: Arc<dyn BookRepository>,
    pub genre_repo: Arc<dyn GenreRepository>,
    pub file_repo: Arc<dyn SharedFileRepository>,
    pub book_service: BookService,
    pub http_client: reqwest::Client,
    pub openrouter_url: String,
    pub openrouter_api_key: String,
    pub openrouter_model: String,
    pub insecure_cookies: bool,
}

impl AppState {
    /// Build the full application state from a database connection and config.
    pub fn from_database(database: &Database, config: AppStateConfig) -> anyhow::Result<Self> {
        let pool = database.clone_pool();
        let repositories = Repositories {
            books: Arc::new(SqlBookRepository::new(pool.clone())),
            genres: Arc::new(SqlGenreRepository::new(pool.clone())),
            files: Arc::new(SqlSharedFileRepository::new(pool)),
        };
        Self::new(repositories, config)
    }

    pub fn new(repositories: Repositories, config: AppStateConfig) -> anyhow::Result<Self> {
        let Repositories {
            books: book_repo,
            genres: genre_repo,
            files: file_repo,
        } = repositories;
        let http_client = reqwest::ClientBuilder::new()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            book_service: BookService::new(Arc::clone(&book_repo)),
            book_repo,
            genre_repo,
            file_repo,
            http_client,
            openrouter_url: config.openrouter_url,
            openrouter_api_key: config.openrouter_api_key,
            openrouter_model: config.openrouter_model,
            insecure_cookies: config.insecure_cookies,
        })
    }

    pub fn suggestions_enabled(&self) -> bool {
        !self.openrouter_api_key.trim().is_empty()
    }
}
