use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::ids::{BookId, UserProfile};

/// Default genres. The genre table starts with these and the AI prompt offers
/// them. Books may carry any other value.
pub const GENRES: [&str; 13] = [
    "Ficción",
    "No Ficción",
    "Romance",
    "Thriller",
    "Historia",
    "Biografía",
    "Fantasía",
    "Ciencia Ficción",
    "Clásicos",
    "Autoayuda",
    "Misterio",
    "Poesía",
    "Otro",
];

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    #[default]
    ToRead,
    Reading,
    Finished,
}

impl BookStatus {
    pub const ALL: [BookStatus; 3] = [BookStatus::ToRead, BookStatus::Reading, BookStatus::Finished];

    /// Status as a function of progress: untouched, partway, or done.
    pub fn derive(current_page: i32, total_pages: i32) -> Self {
        if current_page <= 0 {
            BookStatus::ToRead
        } else if current_page >= total_pages {
            BookStatus::Finished
        } else {
            BookStatus::Reading
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::ToRead => "to_read",
            BookStatus::Reading => "reading",
            BookStatus::Finished => "finished",
        }
    }

    pub fn display_label(&self) -> &'static str {
        match self {
            BookStatus::ToRead => "To read",
            BookStatus::Reading => "Reading",
            BookStatus::Finished => "Finished",
        }
    }
}

impl FromStr for BookStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "to_read" | "por_leer" => Ok(BookStatus::ToRead),
            "reading" | "leyendo" => Ok(BookStatus::Reading),
            "finished" | "terminado" => Ok(BookStatus::Finished),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub user_id: UserProfile,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub total_pages: i32,
    pub current_page: i32,
    pub status: BookStatus,
    pub year: Option<i32>,
    pub rating: Option<i32>,
    pub notes: Option<String>,
    pub review: Option<String>,
    pub cover_url: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub finish_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Book {
    /// Total pages when the record carries a usable page count.
    pub fn valid_total_pages(&self) -> Option<i64> {
        (self.total_pages > 0).then_some(i64::from(self.total_pages))
    }

    /// Pages read so far, clamped into `[0, total_pages]`.
    pub fn pages_read(&self) -> i64 {
        match self.valid_total_pages() {
            Some(total) => i64::from(self.current_page).clamp(0, total),
            None => 0,
        }
    }

    pub fn progress_percentage(&self) -> f64 {
        match self.valid_total_pages() {
            Some(total) => self.pages_read() as f64 / total as f64 * 100.0,
            None => 0.0,
        }
    }

    /// Move the page counter and re-derive status, stamping the start and
    /// finish dates the first time the book leaves `to_read` or becomes
    /// `finished`.
    pub fn record_progress(&mut self, new_page: i32, today: NaiveDate) {
        let (page, status) = reconcile_progress(self.total_pages, new_page, None);
        self.current_page = page;
        self.status = status;
        self.stamp_dates(today);
    }

    /// Fill in a missing start date once the book is underway and a missing
    /// finish date once it is finished.
    pub fn stamp_dates(&mut self, today: NaiveDate) {
        if self.status != BookStatus::ToRead && self.start_date.is_none() {
            self.start_date = Some(today);
        }
        if self.status == BookStatus::Finished && self.finish_date.is_none() {
            self.finish_date = Some(today);
        }
    }

    /// Apply a partial edit. Text fields set to an empty string are cleared.
    pub fn apply_update(&mut self, changes: UpdateBook) {
        if let Some(title) = changes.title {
            self.title = title.trim().to_string();
        }
        if let Some(author) = changes.author {
            self.author = author.trim().to_string();
        }
        if let Some(genre) = changes.genre {
            self.genre = normalize_optional_field(genre);
        }
        if let Some(total_pages) = changes.total_pages {
            self.total_pages = total_pages;
        }
        if let Some(current_page) = changes.current_page {
            self.current_page = current_page;
        }
        if let Some(year) = changes.year {
            self.year = year.filter(|&y| y != 0);
        }
        if let Some(rating) = changes.rating {
            self.rating = rating.filter(|&r| r != 0);
        }
        if let Some(notes) = changes.notes {
            self.notes = normalize_optional_field(notes);
        }
        if let Some(review) = changes.review {
            self.review = normalize_optional_field(review);
        }
        if let Some(cover_url) = changes.cover_url {
            self.cover_url = normalize_optional_field(cover_url);
        }
        if let Some(start_date) = changes.start_date {
            self.start_date = start_date;
        }
        if let Some(finish_date) = changes.finish_date {
            self.finish_date = finish_date;
        }

        let (page, status) = reconcile_progress(self.total_pages, self.current_page, changes.status);
        self.current_page = page;
        self.status = status;
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        validate_fields(&self.title, &self.author, self.total_pages, self.rating)
    }
}

/// Clamp the page into range, honour an explicitly requested status by moving
/// the page to match it, then derive the stored status from the page.
pub fn reconcile_progress(
    total_pages: i32,
    current_page: i32,
    requested: Option<BookStatus>,
) -> (i32, BookStatus) {
    let total = total_pages.max(0);
    let mut page = current_page.clamp(0, total);
    match requested {
        Some(BookStatus::Finished) => page = total,
        Some(BookStatus::ToRead) => page = 0,
        Some(BookStatus::Reading) | None => {}
    }
    (page, BookStatus::derive(page, total))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub genre: Option<String>,
    pub total_pages: i32,
    #[serde(default)]
    pub current_page: i32,
    /// Requested status; the stored status is always derived from pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BookStatus>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub review: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub finish_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl NewBook {
    pub fn normalize(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.author = self.author.trim().to_string();
        self.genre = normalize_optional_field(self.genre);
        self.notes = normalize_optional_field(self.notes);
        self.review = normalize_optional_field(self.review);
        self.cover_url = normalize_optional_field(self.cover_url);
        self.rating = self.rating.filter(|&r| r != 0);
        self.year = self.year.filter(|&y| y != 0);
        let (page, status) = reconcile_progress(self.total_pages, self.current_page, self.status);
        self.current_page = page;
        self.status = Some(status);
        self
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        validate_fields(&self.title, &self.author, self.total_pages, self.rating)
    }

    /// Status the record will be stored with.
    pub fn derived_status(&self) -> BookStatus {
        reconcile_progress(self.total_pages, self.current_page, self.status).1
    }

    /// Same date stamping as [`Book::stamp_dates`], applied before insertion.
    pub fn stamp_dates(&mut self, today: NaiveDate) {
        let status = self.derived_status();
        if status != BookStatus::ToRead && self.start_date.is_none() {
            self.start_date = Some(today);
        }
        if status == BookStatus::Finished && self.finish_date.is_none() {
            self.finish_date = Some(today);
        }
    }
}

/// Partial edit. For clearable fields: absent = keep, `null` = clear.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBook {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub genre: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BookStatus>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub rating: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub review: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub finish_date: Option<Option<NaiveDate>>,
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn validate_fields(
    title: &str,
    author: &str,
    total_pages: i32,
    rating: Option<i32>,
) -> Result<(), &'static str> {
    if title.trim().is_empty() {
        return Err("title is required");
    }
    if author.trim().is_empty() {
        return Err("author is required");
    }
    if total_pages <= 0 {
        return Err("total_pages must be greater than zero");
    }
    if let Some(rating) = rating
        && !(1..=5).contains(&rating)
    {
        return Err("rating must be between 1 and 5");
    }
    Ok(())
}

fn normalize_optional_field(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
