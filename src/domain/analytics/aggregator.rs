//! Derives a [`StatsReport`] from an in-memory collection.
//!
//! Everything here is a pure function of the books and an anchor instant, so
//! the same input always yields the same report.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::domain::books::{Book, BookStatus};
use crate::domain::formatting::month_label;
use crate::domain::stats::{FunFacts, MonthCount, NameCount, StatsReport};

/// Entries kept in the genre and author rankings.
pub const TOP_N: usize = 5;
/// Length of the monthly series, ending at the anchor month.
pub const WINDOW_MONTHS: i32 = 12;

const DAYS_PER_MONTH: f64 = 30.0;
const PAGES_PER_SHEET: f64 = 2.0;
const SHEET_THICKNESS_METERS: f64 = 0.0001;

impl StatsReport {
    pub fn from_books(books: &[Book], now: DateTime<Utc>) -> Self {
        let today = now.date_naive();

        let finished: Vec<&Book> = with_status(books, BookStatus::Finished);
        let reading: Vec<&Book> = with_status(books, BookStatus::Reading);
        let to_read_count = with_status(books, BookStatus::ToRead).len() as u64;

        let finished_page_counts: Vec<i64> = finished
            .iter()
            .filter_map(|b| b.valid_total_pages())
            .collect();
        let finished_pages: i64 = finished_page_counts.iter().sum();
        let pages_consumed = finished_pages + reading.iter().map(|b| b.pages_read()).sum::<i64>();
        let library_pages = books.iter().filter_map(Book::valid_total_pages).sum();

        let genre_distribution =
            top_counts(books.iter().filter_map(|b| b.genre.as_deref()), TOP_N);
        let top_authors = top_counts(finished.iter().map(|b| b.author.as_str()), TOP_N);

        let mut finish_dates: Vec<NaiveDate> =
            finished.iter().filter_map(|b| b.finish_date).collect();
        finish_dates.sort_unstable();
        let monthly_progress = monthly_window(&finish_dates, today);

        let total_books = books.len() as u64;
        let span_days = books
            .iter()
            .map(|b| b.created_at.date_naive())
            .min()
            .map_or(0, |start| (today - start).num_days().max(0));
        let avg_pages_per_day = ratio(pages_consumed as f64, span_days as f64);

        let (favorite_genre_name, favorite_genre_percentage) = match genre_distribution.first() {
            Some(top) => (
                Some(top.name.clone()),
                ratio(top.count as f64, total_books as f64) * 100.0,
            ),
            None => (None, 0.0),
        };

        let (current_month, previous_month) = match monthly_progress.as_slice() {
            [.., previous, current] => (current.count, previous.count),
            _ => (0, 0),
        };

        let current_year = today.year();
        let finished_in_year =
            |year: i32| finish_dates.iter().filter(|d| d.year() == year).count() as u64;
        let total_books_finished_current_year = finished_in_year(current_year);
        let total_books_finished_previous_year = finished_in_year(current_year - 1);

        let longest_book_pages = finished_page_counts.iter().copied().max();
        let shortest_book_pages = finished_page_counts.iter().copied().min();

        let fun_facts = FunFacts {
            favorite_genre_name,
            favorite_genre_percentage,
            monthly_comparison_percentage: percentage_change(current_month, previous_month),
            best_month: best_month(&monthly_progress),
            worst_month: worst_month(&monthly_progress),
            record_books_in_month: record_books_in_month(&finish_dates),
            longest_book_pages,
            shortest_book_pages,
            page_difference_long_short: longest_book_pages
                .zip(shortest_book_pages)
                .map(|(long, short)| long - short),
            longest_drought_days: longest_drought(&finish_dates),
            unique_authors_count: unique_authors(&finished),
            days_since_library_start: span_days,
            avg_pages_per_day,
            avg_pages_per_month: avg_pages_per_day * DAYS_PER_MONTH,
            avg_days_per_book_finished: (!finished.is_empty())
                .then(|| span_days as f64 / finished.len() as f64),
            days_since_last_finished_book: finish_dates
                .last()
                .map(|last| (today - *last).num_days().max(0)),
            total_books_finished_current_year,
            total_books_finished_previous_year,
            pace_improvement_percentage: percentage_change(
                total_books_finished_current_year,
                total_books_finished_previous_year,
            ),
            total_length_meters: library_pages as f64 / PAGES_PER_SHEET * SHEET_THICKNESS_METERS,
            continuous_reading_days: continuous_reading_days(&reading, today),
        };

        StatsReport {
            finished_count: finished.len() as u64,
            reading_count: reading.len() as u64,
            to_read_count,
            total_books,
            pages_consumed,
            library_pages,
            avg_pages_per_finished: ratio(finished_pages as f64, finished_page_counts.len() as f64)
                .round() as i64,
            genre_distribution,
            top_authors,
            monthly_progress,
            fun_facts,
        }
    }
}

fn with_status(books: &[Book], status: BookStatus) -> Vec<&Book> {
    books.iter().filter(|b| b.status == status).collect()
}

/// Division that yields 0 instead of NaN or infinity.
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Relative change in percent. A rise from zero counts as +100%.
pub fn percentage_change(current: u64, previous: u64) -> f64 {
    if previous == 0 {
        if current > 0 { 100.0 } else { 0.0 }
    } else {
        (current as f64 - previous as f64) / previous as f64 * 100.0
    }
}

/// Count trimmed, non-empty names, most frequent first. Ties keep the order
/// in which names were first seen.
fn top_counts<'a>(names: impl Iterator<Item = &'a str>, limit: usize) -> Vec<NameCount> {
    let mut counts: Vec<NameCount> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for name in names.map(str::trim).filter(|n| !n.is_empty()) {
        match index.get(name) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(name, counts.len());
                counts.push(NameCount {
                    name: name.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

/// `(year, month)` pairs for the window ending at `today`, oldest first.
fn trailing_months(today: NaiveDate) -> Vec<(i32, u32)> {
    let anchor = today.year() * 12 + today.month0() as i32;
    (0..WINDOW_MONTHS)
        .rev()
        .map(|offset| {
            let index = anchor - offset;
            (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
        })
        .collect()
}

fn monthly_window(finish_dates: &[NaiveDate], today: NaiveDate) -> Vec<MonthCount> {
    trailing_months(today)
        .into_iter()
        .map(|(year, month)| MonthCount {
            year,
            month,
            name: month_label(month).to_string(),
            count: finish_dates
                .iter()
                .filter(|d| d.year() == year && d.month() == month)
                .count() as u64,
        })
        .collect()
}

fn window_is_empty(window: &[MonthCount]) -> bool {
    window.iter().all(|m| m.count == 0)
}

fn best_month(window: &[MonthCount]) -> Option<MonthCount> {
    if window_is_empty(window) {
        return None;
    }
    window
        .iter()
        .fold(None::<&MonthCount>, |best, m| match best {
            Some(b) if b.count >= m.count => Some(b),
            _ => Some(m),
        })
        .cloned()
}

fn worst_month(window: &[MonthCount]) -> Option<MonthCount> {
    if window_is_empty(window) {
        return None;
    }
    window
        .iter()
        .fold(None::<&MonthCount>, |worst, m| match worst {
            Some(w) if w.count <= m.count => Some(w),
            _ => Some(m),
        })
        .cloned()
}

fn record_books_in_month(finish_dates: &[NaiveDate]) -> u64 {
    let mut per_month: HashMap<(i32, u32), u64> = HashMap::new();
    for date in finish_dates {
        *per_month.entry((date.year(), date.month())).or_default() += 1;
    }
    per_month.into_values().max().unwrap_or(0)
}

/// Expects `finish_dates` sorted ascending.
fn longest_drought(finish_dates: &[NaiveDate]) -> Option<i64> {
    finish_dates
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_days())
        .max()
}

fn unique_authors(finished: &[&Book]) -> u64 {
    finished
        .iter()
        .map(|b| b.author.trim())
        .filter(|a| !a.is_empty())
        .collect::<HashSet<_>>()
        .len() as u64
}

fn continuous_reading_days(reading: &[&Book], today: NaiveDate) -> i64 {
    reading
        .iter()
        .filter_map(|b| b.start_date)
        .filter(|start| *start <= today)
        .min()
        .map_or(0, |start| (today - start).num_days() + 1)
}
