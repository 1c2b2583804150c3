use axum::Json;
use axum::extract::State;

use crate::application::errors::AppError;
use crate::application::profile::ActiveUser;
use crate::application::services::compute_stats;
use crate::application::state::AppState;
use crate::domain::stats::StatsSnapshot;

#[tracing::instrument(skip(state))]
pub(crate) async fn get_stats(
    State(state): State<AppState>,
    ActiveUser(user): ActiveUser,
) -> Result<Json<StatsSnapshot>, AppError> {
    let snapshot = compute_stats(&*state.book_repo, user).await?;
    Ok(Json(snapshot))
}
