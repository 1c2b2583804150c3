use std::time::Instant;

use chrono::Utc;
use tracing::info;

use crate::domain::RepositoryError;
use crate::domain::ids::UserProfile;
use crate::domain::repositories::BookRepository;
use crate::domain::stats::{StatsReport, StatsSnapshot};

/// Load the reader's collection and derive a fresh report from it.
/// Logs the total computation time on success.
pub async fn compute_stats(
    repo: &dyn BookRepository,
    owner: UserProfile,
) -> Result<StatsSnapshot, RepositoryError> {
    let start = Instant::now();

    let books = repo.list_by_owner(owner).await?;
    let computed_at = Utc::now();
    let report = StatsReport::from_books(&books, computed_at);

    info!(
        duration_ms = start.elapsed().as_millis(),
        user = %owner,
        books = books.len(),
        "stats computed"
    );
    Ok(StatsSnapshot {
        report,
        computed_at,
    })
}
