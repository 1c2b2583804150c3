use axum::Json;
use axum::extract::State;
use tracing::info;

use crate::application::errors::AppError;
use crate::application::profile::ActiveUser;
use crate::application::state::AppState;
use crate::infrastructure::ai::{self, BookSuggestion, SuggestionRequest};

#[tracing::instrument(skip(state))]
pub(crate) async fn suggest_book(
    State(state): State<AppState>,
    ActiveUser(user): ActiveUser,
    Json(request): Json<SuggestionRequest>,
) -> Result<Json<BookSuggestion>, AppError> {
    if !state.suggestions_enabled() {
        return Err(AppError::unavailable(
            "book suggestions are not configured on this server",
        ));
    }

    let suggestion = ai::suggest_book(
        &state.http_client,
        &state.openrouter_url,
        &state.openrouter_api_key,
        &state.openrouter_model,
        &request,
    )
    .await?;

    info!(title = %request.title, "book suggestion fetched");
    Ok(Json(suggestion))
}
