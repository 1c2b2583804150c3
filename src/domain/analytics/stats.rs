use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A labelled count, used for genre and author rankings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCount {
    pub name: String,
    pub count: u64,
}

/// Finished books in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCount {
    pub year: i32,
    /// 1-12.
    pub month: u32,
    /// Short month label (e.g. "Oct").
    pub name: String,
    pub count: u64,
}

/// Derived one-liners for the dashboard. Every ratio is zero-guarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunFacts {
    pub favorite_genre_name: Option<String>,
    /// Share of the whole library carrying the favourite genre, 0-100.
    pub favorite_genre_percentage: f64,
    /// Current window month against the previous one.
    pub monthly_comparison_percentage: f64,
    pub best_month: Option<MonthCount>,
    pub worst_month: Option<MonthCount>,
    /// Highest number of books finished in any single month, all time.
    pub record_books_in_month: u64,
    pub longest_book_pages: Option<i64>,
    pub shortest_book_pages: Option<i64>,
    pub page_difference_long_short: Option<i64>,
    /// Largest gap in days between consecutive finish dates.
    pub longest_drought_days: Option<i64>,
    pub unique_authors_count: u64,
    /// Days since the oldest record in the collection was created.
    pub days_since_library_start: i64,
    pub avg_pages_per_day: f64,
    pub avg_pages_per_month: f64,
    /// "You finish a book every X days".
    pub avg_days_per_book_finished: Option<f64>,
    pub days_since_last_finished_book: Option<i64>,
    pub total_books_finished_current_year: u64,
    pub total_books_finished_previous_year: u64,
    /// Current calendar year against the previous one.
    pub pace_improvement_percentage: f64,
    /// How long the whole library would be standing on a shelf.
    pub total_length_meters: f64,
    /// Days since the earliest start among books currently being read.
    pub continuous_reading_days: i64,
}

/// Statistics for one reader's collection. Field names are part of the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub finished_count: u64,
    pub reading_count: u64,
    pub to_read_count: u64,
    pub total_books: u64,
    /// Total pages of finished books plus pages read of books in progress.
    pub pages_consumed: i64,
    /// Total pages across every book, read or not.
    pub library_pages: i64,
    pub avg_pages_per_finished: i64,
    /// Top genres across the library, most common first.
    pub genre_distribution: Vec<NameCount>,
    /// Top authors among finished books, most common first.
    pub top_authors: Vec<NameCount>,
    /// Trailing twelve calendar months, oldest first.
    pub monthly_progress: Vec<MonthCount>,
    pub fun_facts: FunFacts,
}

/// A report plus the moment it was computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSnapshot {
    #[serde(flatten)]
    pub report: StatsReport,
    pub computed_at: DateTime<Utc>,
}
