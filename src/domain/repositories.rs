use super::RepositoryError;
use crate::domain::books::{Book, NewBook};
use crate::domain::files::{NewSharedFile, SharedFile, SharedFileContent};
use crate::domain::genres::{Genre, NewGenre};
use crate::domain::ids::{BookId, GenreId, UserProfile};
use async_trait::async_trait;

#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Store a normalized record under `owner`. The store assigns the id and,
    /// unless one is supplied, the creation timestamp.
    async fn insert(&self, owner: UserProfile, book: NewBook) -> Result<Book, RepositoryError>;
    async fn get(&self, id: BookId) -> Result<Book, RepositoryError>;
    /// Every book owned by `owner`, newest first.
    async fn list_by_owner(&self, owner: UserProfile) -> Result<Vec<Book>, RepositoryError>;
    /// Replace the stored record with `book`.
    async fn update(&self, book: &Book) -> Result<Book, RepositoryError>;
    async fn delete(&self, id: BookId) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait GenreRepository: Send + Sync {
    /// Fails with `Conflict` when a genre with the same name (ignoring case)
    /// already exists.
    async fn insert(&self, genre: NewGenre) -> Result<Genre, RepositoryError>;
    /// All genres, alphabetically.
    async fn list(&self) -> Result<Vec<Genre>, RepositoryError>;
    async fn delete(&self, id: GenreId) -> Result<Genre, RepositoryError>;
}

#[async_trait]
pub trait SharedFileRepository: Send + Sync {
    /// Store the file, replacing any file with the same name.
    async fn upsert(&self, file: NewSharedFile) -> Result<SharedFile, RepositoryError>;
    /// Newest first, at most `limit` entries.
    async fn list(&self, limit: u32) -> Result<Vec<SharedFile>, RepositoryError>;
    async fn get(&self, name: &str) -> Result<SharedFileContent, RepositoryError>;
    async fn delete(&self, name: &str) -> Result<(), RepositoryError>;
}
