use chrono::{Datelike, Months, Utc};
use liburutegia::domain::books::{BookStatus, NewBook};
use liburutegia::domain::ids::UserProfile;
use liburutegia::domain::stats::StatsSnapshot;

use crate::helpers::{create_book, new_book, spawn_app};

async fn fetch_stats(app: &crate::helpers::TestApp, user: UserProfile) -> StatsSnapshot {
    let response = app.get_as(user, "/stats").send().await.unwrap();
    assert_eq!(response.status(), 200);
    response.json().await.expect("Failed to parse stats")
}

#[tokio::test]
async fn empty_library_has_zeroed_stats() {
    let app = spawn_app().await;

    let snapshot = fetch_stats(&app, UserProfile::Maixux).await;
    let report = snapshot.report;

    assert_eq!(report.total_books, 0);
    assert_eq!(report.pages_consumed, 0);
    assert_eq!(report.avg_pages_per_finished, 0);
    assert!(report.genre_distribution.is_empty());
    assert!(report.top_authors.is_empty());
    assert_eq!(report.monthly_progress.len(), 12);
    assert!(report.monthly_progress.iter().all(|m| m.count == 0));
    assert!(report.fun_facts.favorite_genre_name.is_none());
    assert!(report.fun_facts.best_month.is_none());
    assert_eq!(report.fun_facts.monthly_comparison_percentage, 0.0);
}

#[tokio::test]
async fn stats_count_the_active_readers_books() {
    let app = spawn_app().await;
    let user = UserProfile::Arantxa;
    let today = Utc::now().date_naive();
    let last_month = today
        .checked_sub_months(Months::new(1))
        .expect("date in range");

    create_book(
        &app,
        user,
        &NewBook {
            genre: Some("Ficción".to_string()),
            status: Some(BookStatus::Finished),
            ..new_book("Obabakoak", "Bernardo Atxaga", 400)
        },
    )
    .await;
    create_book(
        &app,
        user,
        &NewBook {
            genre: Some("Ficción".to_string()),
            status: Some(BookStatus::Finished),
            start_date: Some(last_month),
            finish_date: Some(last_month),
            ..new_book("Bi anai", "Bernardo Atxaga", 200)
        },
    )
    .await;
    create_book(
        &app,
        user,
        &NewBook {
            genre: Some("Historia".to_string()),
            current_page: 50,
            ..new_book("Gernika", "Xabier Irujo", 300)
        },
    )
    .await;
    create_book(&app, user, &new_book("Rayuela", "Julio Cortázar", 600)).await;

    // Another reader's books never leak into the report.
    create_book(
        &app,
        UserProfile::Maixux,
        &NewBook {
            status: Some(BookStatus::Finished),
            ..new_book("Ficciones", "Jorge Luis Borges", 200)
        },
    )
    .await;

    let report = fetch_stats(&app, user).await.report;

    assert_eq!(report.total_books, 4);
    assert_eq!(report.finished_count, 2);
    assert_eq!(report.reading_count, 1);
    assert_eq!(report.to_read_count, 1);
    assert_eq!(report.pages_consumed, 400 + 200 + 50);
    assert_eq!(report.library_pages, 400 + 200 + 300 + 600);
    assert_eq!(report.avg_pages_per_finished, 300);

    assert_eq!(report.genre_distribution[0].name, "Ficción");
    assert_eq!(report.genre_distribution[0].count, 2);
    assert_eq!(report.top_authors.len(), 1);
    assert_eq!(report.top_authors[0].name, "Bernardo Atxaga");
    assert_eq!(report.top_authors[0].count, 2);

    let current = report.monthly_progress.last().unwrap();
    assert_eq!((current.year, current.month), (today.year(), today.month()));
    assert_eq!(current.count, 1);
    let previous = &report.monthly_progress[10];
    assert_eq!(previous.month, last_month.month());
    assert_eq!(previous.count, 1);

    let facts = report.fun_facts;
    assert_eq!(facts.favorite_genre_name.as_deref(), Some("Ficción"));
    assert_eq!(facts.favorite_genre_percentage, 50.0);
    assert_eq!(facts.monthly_comparison_percentage, 0.0);
    assert_eq!(facts.unique_authors_count, 1);
    assert_eq!(facts.longest_book_pages, Some(400));
    assert_eq!(facts.shortest_book_pages, Some(200));
    assert_eq!(facts.page_difference_long_short, Some(200));
    assert_eq!(facts.continuous_reading_days, 1);
}

#[tokio::test]
async fn stats_require_a_reader() {
    let app = spawn_app().await;

    let response = app.client.get(app.api_url("/stats")).send().await.unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn missing_books_table_returns_503() {
    let app = spawn_app().await;

    sqlx::query("DROP TABLE books")
        .execute(&app.pool)
        .await
        .expect("Failed to drop table");

    let response = app
        .get_as(UserProfile::Maixux, "/stats")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 503);
}
