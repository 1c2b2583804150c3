use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{query, query_as};
use tracing::warn;

use crate::domain::RepositoryError;
use crate::domain::books::{Book, BookStatus, NewBook};
use crate::domain::ids::{BookId, UserProfile};
use crate::domain::repositories::BookRepository;
use crate::infrastructure::database::DatabasePool;
use crate::infrastructure::repositories::map_sqlx_error;

const BOOK_COLUMNS: &str = "id, user_id, title, author, genre, total_pages, current_page, status, \
     year, rating, notes, review, cover_url, start_date, finish_date, created_at";

#[derive(Clone)]
pub struct SqlBookRepository {
    pool: DatabasePool,
}

impl SqlBookRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    fn into_book(record: BookRecord) -> Result<Book, RepositoryError> {
        let id = record.id.parse::<BookId>().map_err(|err| {
            RepositoryError::unexpected(format!("invalid book id {:?}: {err}", record.id))
        })?;
        let user_id = record.user_id.parse::<UserProfile>().map_err(|()| {
            RepositoryError::unexpected(format!("unknown owner {:?} for book {id}", record.user_id))
        })?;
        let status = record.status.parse::<BookStatus>().unwrap_or_else(|()| {
            warn!(book.id = %id, status = %record.status, "unknown status, deriving from pages");
            BookStatus::derive(record.current_page, record.total_pages)
        });

        Ok(Book {
            start_date: parse_date(id, "start_date", record.start_date.as_deref()),
            finish_date: parse_date(id, "finish_date", record.finish_date.as_deref()),
            id,
            user_id,
            title: record.title,
            author: record.author,
            genre: record.genre,
            total_pages: record.total_pages,
            current_page: record.current_page,
            status,
            year: record.year,
            rating: record.rating,
            notes: record.notes,
            review: record.review,
            cover_url: record.cover_url,
            created_at: record.created_at,
        })
    }
}

/// Dates are stored as text. Anything unreadable is treated as absent so one
/// bad row never hides the rest of the collection.
fn parse_date(id: BookId, field: &'static str, raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    // Full timestamps occur in imported rows; only the date part matters.
    let date_part = raw.get(..10).unwrap_or(raw);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(err) => {
            warn!(book.id = %id, field, value = raw, error = %err, "ignoring unparseable date");
            None
        }
    }
}

fn format_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

#[async_trait]
impl BookRepository for SqlBookRepository {
    async fn insert(&self, owner: UserProfile, new_book: NewBook) -> Result<Book, RepositoryError> {
        let id = BookId::generate();
        let created_at = new_book.created_at.unwrap_or_else(Utc::now);
        let status = new_book.derived_status();

        let sql = format!(
            "INSERT INTO books ({BOOK_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {BOOK_COLUMNS}"
        );
        let record = query_as::<_, BookRecord>(&sql)
            .bind(id.to_string())
            .bind(owner.as_str())
            .bind(&new_book.title)
            .bind(&new_book.author)
            .bind(new_book.genre.as_deref())
            .bind(new_book.total_pages)
            .bind(new_book.current_page)
            .bind(status.as_str())
            .bind(new_book.year)
            .bind(new_book.rating)
            .bind(new_book.notes.as_deref())
            .bind(new_book.review.as_deref())
            .bind(new_book.cover_url.as_deref())
            .bind(format_date(new_book.start_date))
            .bind(format_date(new_book.finish_date))
            .bind(created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Self::into_book(record)
    }

    async fn get(&self, id: BookId) -> Result<Book, RepositoryError> {
        let sql = format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ?");
        let record = query_as::<_, BookRecord>(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or(RepositoryError::NotFound)?;

        Self::into_book(record)
    }

    async fn list_by_owner(&self, owner: UserProfile) -> Result<Vec<Book>, RepositoryError> {
        let sql = format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE user_id = ? ORDER BY created_at DESC, rowid DESC"
        );
        let records = query_as::<_, BookRecord>(&sql)
            .bind(owner.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let books = records
            .into_iter()
            .filter_map(|record| match Self::into_book(record) {
                Ok(book) => Some(book),
                Err(err) => {
                    warn!(owner = %owner, error = %err, "skipping unreadable book row");
                    None
                }
            })
            .collect();
        Ok(books)
    }

    async fn update(&self, book: &Book) -> Result<Book, RepositoryError> {
        let result = query(
            r"UPDATE books SET
                user_id = ?, title = ?, author = ?, genre = ?, total_pages = ?, current_page = ?,
                status = ?, year = ?, rating = ?, notes = ?, review = ?, cover_url = ?,
                start_date = ?, finish_date = ?
              WHERE id = ?",
        )
        .bind(book.user_id.as_str())
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.genre.as_deref())
        .bind(book.total_pages)
        .bind(book.current_page)
        .bind(book.status.as_str())
        .bind(book.year)
        .bind(book.rating)
        .bind(book.notes.as_deref())
        .bind(book.review.as_deref())
        .bind(book.cover_url.as_deref())
        .bind(format_date(book.start_date))
        .bind(format_date(book.finish_date))
        .bind(book.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get(book.id).await
    }

    async fn delete(&self, id: BookId) -> Result<(), RepositoryError> {
        let result = query("DELETE FROM books WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct BookRecord {
    id: String,
    user_id: String,
    title: String,
    author: String,
    genre: Option<String>,
    total_pages: i32,
    current_page: i32,
    status: String,
    year: Option<i32>,
    rating: Option<i32>,
    notes: Option<String>,
    review: Option<String>,
    cover_url: Option<String>,
    start_date: Option<String>,
    finish_date: Option<String>,
    created_at: DateTime<Utc>,
}
