use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::application::errors::AppError;
use crate::domain::books::{Book, NewBook, UpdateBook};
use crate::domain::ids::{BookId, UserProfile};
use crate::domain::listing::{BookSortKey, LibraryFilter, SortDirection, sort_books};
use crate::domain::repositories::BookRepository;

/// Book mutations on behalf of one reader. Every operation is scoped to the
/// owner: another reader's book behaves as if it did not exist.
#[derive(Clone)]
pub struct BookService {
    books: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(books: Arc<dyn BookRepository>) -> Self {
        Self { books }
    }

    pub async fn list(
        &self,
        owner: UserProfile,
        filter: &LibraryFilter,
        sort_key: BookSortKey,
        direction: SortDirection,
    ) -> Result<Vec<Book>, AppError> {
        let books = self.books.list_by_owner(owner).await?;
        let mut books = filter.apply(books);
        sort_books(&mut books, sort_key, direction);
        Ok(books)
    }

    pub async fn get(&self, owner: UserProfile, id: BookId) -> Result<Book, AppError> {
        let book = self.books.get(id).await?;
        if book.user_id != owner {
            return Err(AppError::NotFound);
        }
        Ok(book)
    }

    pub async fn create(&self, owner: UserProfile, new: NewBook) -> Result<Book, AppError> {
        let mut new = new.normalize();
        new.validate().map_err(AppError::validation)?;
        new.stamp_dates(today());

        let book = self.books.insert(owner, new).await?;
        info!(book.id = %book.id, user = %owner, status = book.status.as_str(), "book created");
        Ok(book)
    }

    pub async fn update(
        &self,
        owner: UserProfile,
        id: BookId,
        changes: UpdateBook,
    ) -> Result<Book, AppError> {
        let mut book = self.get(owner, id).await?;
        book.apply_update(changes);
        book.validate().map_err(AppError::validation)?;
        book.stamp_dates(today());

        let book = self.books.update(&book).await?;
        info!(book.id = %book.id, user = %owner, status = book.status.as_str(), "book updated");
        Ok(book)
    }

    pub async fn update_progress(
        &self,
        owner: UserProfile,
        id: BookId,
        current_page: i32,
    ) -> Result<Book, AppError> {
        let mut book = self.get(owner, id).await?;
        book.record_progress(current_page, today());

        let book = self.books.update(&book).await?;
        info!(
            book.id = %book.id,
            user = %owner,
            current_page = book.current_page,
            status = book.status.as_str(),
            "progress recorded"
        );
        Ok(book)
    }

    pub async fn delete(&self, owner: UserProfile, id: BookId) -> Result<(), AppError> {
        self.get(owner, id).await?;
        self.books.delete(id).await?;
        info!(book.id = %id, user = %owner, "book deleted");
        Ok(())
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
