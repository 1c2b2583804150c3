use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::application::errors::AppError;
use crate::application::profile::ActiveUser;
use crate::application::state::AppState;
use crate::domain::books::{Book, BookStatus, NewBook, UpdateBook};
use crate::domain::ids::BookId;
use crate::domain::listing::{BookSortKey, LibraryFilter, SortDirection, SortKey};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListBooksQuery {
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    genre: Option<String>,
    #[serde(default)]
    sort: Option<String>,
    #[serde(default)]
    direction: Option<String>,
}

impl ListBooksQuery {
    fn into_parts(self) -> Result<(LibraryFilter, BookSortKey, SortDirection), AppError> {
        let status = non_empty(self.status)
            .map(|raw| {
                raw.parse::<BookStatus>()
                    .map_err(|()| AppError::bad_request(format!("unknown status: {raw}")))
            })
            .transpose()?;

        let sort_key = match non_empty(self.sort) {
            Some(raw) => BookSortKey::from_query(&raw)
                .ok_or_else(|| AppError::bad_request(format!("unknown sort key: {raw}")))?,
            None => <BookSortKey as SortKey>::default(),
        };

        let direction = match non_empty(self.direction) {
            Some(raw) => SortDirection::from_query(&raw)
                .ok_or_else(|| AppError::bad_request(format!("unknown direction: {raw}")))?,
            None => sort_key.default_direction(),
        };

        let filter = LibraryFilter {
            search: non_empty(self.search),
            status,
            genre: non_empty(self.genre),
        };
        Ok((filter, sort_key, direction))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_book_id(raw: &str) -> Result<BookId, AppError> {
    raw.parse::<BookId>()
        .map_err(|_| AppError::bad_request(format!("invalid book id: {raw}")))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProgressUpdate {
    current_page: i32,
}

#[tracing::instrument(skip(state))]
pub(crate) async fn list_books(
    State(state): State<AppState>,
    ActiveUser(user): ActiveUser,
    Query(query): Query<ListBooksQuery>,
) -> Result<Json<Vec<Book>>, AppError> {
    let (filter, sort_key, direction) = query.into_parts()?;
    let books = state
        .book_service
        .list(user, &filter, sort_key, direction)
        .await?;
    Ok(Json(books))
}

#[tracing::instrument(skip(state, payload))]
pub(crate) async fn create_book(
    State(state): State<AppState>,
    ActiveUser(user): ActiveUser,
    Json(payload): Json<NewBook>,
) -> Result<Response, AppError> {
    let book = state.book_service.create(user, payload).await?;
    Ok((StatusCode::CREATED, Json(book)).into_response())
}

#[tracing::instrument(skip(state))]
pub(crate) async fn get_book(
    State(state): State<AppState>,
    ActiveUser(user): ActiveUser,
    Path(id): Path<String>,
) -> Result<Json<Book>, AppError> {
    let id = parse_book_id(&id)?;
    let book = state.book_service.get(user, id).await?;
    Ok(Json(book))
}

#[tracing::instrument(skip(state, changes))]
pub(crate) async fn update_book(
    State(state): State<AppState>,
    ActiveUser(user): ActiveUser,
    Path(id): Path<String>,
    Json(changes): Json<UpdateBook>,
) -> Result<Json<Book>, AppError> {
    let id = parse_book_id(&id)?;
    let book = state.book_service.update(user, id, changes).await?;
    Ok(Json(book))
}

#[tracing::instrument(skip(state))]
pub(crate) async fn update_progress(
    State(state): State<AppState>,
    ActiveUser(user): ActiveUser,
    Path(id): Path<String>,
    Json(payload): Json<ProgressUpdate>,
) -> Result<Json<Book>, AppError> {
    let id = parse_book_id(&id)?;
    let book = state
        .book_service
        .update_progress(user, id, payload.current_page)
        .await?;
    Ok(Json(book))
}

#[tracing::instrument(skip(state))]
pub(crate) async fn delete_book(
    State(state): State<AppState>,
    ActiveUser(user): ActiveUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_book_id(&id)?;
    state.book_service.delete(user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
