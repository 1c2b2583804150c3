use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::books::{Book, BookStatus};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn from_query(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

pub trait SortKey: Copy + Eq {
    fn default() -> Self;
    fn from_query(value: &str) -> Option<Self>;
    fn query_value(self) -> &'static str;
    fn default_direction(self) -> SortDirection;
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BookSortKey {
    CreatedAt,
    Title,
    Author,
    Progress,
    Rating,
}

impl SortKey for BookSortKey {
    fn default() -> Self {
        BookSortKey::CreatedAt
    }

    fn from_query(value: &str) -> Option<Self> {
        match value {
            "created-at" => Some(BookSortKey::CreatedAt),
            "title" => Some(BookSortKey::Title),
            "author" => Some(BookSortKey::Author),
            "progress" => Some(BookSortKey::Progress),
            "rating" => Some(BookSortKey::Rating),
            _ => None,
        }
    }

    fn query_value(self) -> &'static str {
        match self {
            BookSortKey::CreatedAt => "created-at",
            BookSortKey::Title => "title",
            BookSortKey::Author => "author",
            BookSortKey::Progress => "progress",
            BookSortKey::Rating => "rating",
        }
    }

    fn default_direction(self) -> SortDirection {
        match self {
            BookSortKey::CreatedAt | BookSortKey::Progress | BookSortKey::Rating => {
                SortDirection::Desc
            }
            _ => SortDirection::Asc,
        }
    }
}

/// Sort in place. Ties fall back to newest first so the order is total.
pub fn sort_books(books: &mut [Book], key: BookSortKey, direction: SortDirection) {
    books.sort_by(|a, b| {
        let primary = match key {
            BookSortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            BookSortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            BookSortKey::Author => a.author.to_lowercase().cmp(&b.author.to_lowercase()),
            BookSortKey::Progress => a
                .progress_percentage()
                .partial_cmp(&b.progress_percentage())
                .unwrap_or(Ordering::Equal),
            BookSortKey::Rating => a.rating.unwrap_or(0).cmp(&b.rating.unwrap_or(0)),
        };
        let primary = match direction {
            SortDirection::Asc => primary,
            SortDirection::Desc => primary.reverse(),
        };
        primary.then_with(|| b.created_at.cmp(&a.created_at))
    });
}

/// Library view filters: free-text search over title and author, plus exact
/// status and genre matches. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryFilter {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: Option<BookStatus>,
    #[serde(default)]
    pub genre: Option<String>,
}

impl LibraryFilter {
    pub fn is_active(&self) -> bool {
        self.search.as_deref().is_some_and(|s| !s.trim().is_empty())
            || self.status.is_some()
            || self.genre.is_some()
    }

    pub fn matches(&self, book: &Book) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                book.title.to_lowercase().contains(&term)
                    || book.author.to_lowercase().contains(&term)
            }
            _ => true,
        };
        let matches_status = self.status.is_none_or(|status| book.status == status);
        let matches_genre = self
            .genre
            .as_deref()
            .is_none_or(|genre| book.genre.as_deref() == Some(genre));
        matches_search && matches_status && matches_genre
    }

    pub fn apply(&self, books: Vec<Book>) -> Vec<Book> {
        books.into_iter().filter(|b| self.matches(b)).collect()
    }
}
