use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::info;

use crate::application::errors::AppError;
use crate::application::profile::ActiveUser;
use crate::application::state::AppState;
use crate::domain::genres::{Genre, NewGenre};
use crate::domain::ids::GenreId;

#[tracing::instrument(skip(state))]
pub(crate) async fn list_genres(
    State(state): State<AppState>,
) -> Result<Json<Vec<Genre>>, AppError> {
    let genres = state.genre_repo.list().await?;
    Ok(Json(genres))
}

#[tracing::instrument(skip(state))]
pub(crate) async fn create_genre(
    State(state): State<AppState>,
    ActiveUser(user): ActiveUser,
    Json(payload): Json<NewGenre>,
) -> Result<Response, AppError> {
    let new_genre = payload.normalize();
    new_genre.validate().map_err(AppError::validation)?;

    let genre = state.genre_repo.insert(new_genre).await?;
    info!(genre.id = %genre.id, name = %genre.name, user = %user, "genre created");
    Ok((StatusCode::CREATED, Json(genre)).into_response())
}

/// Books keep their genre text; only the list entry goes away.
#[tracing::instrument(skip(state))]
pub(crate) async fn delete_genre(
    State(state): State<AppState>,
    ActiveUser(user): ActiveUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = id
        .parse::<GenreId>()
        .map_err(|_| AppError::bad_request(format!("invalid genre id: {id}")))?;

    let genre = state.genre_repo.delete(id).await?;
    info!(genre.id = %id, name = %genre.name, user = %user, "genre deleted");
    Ok(StatusCode::NO_CONTENT)
}
