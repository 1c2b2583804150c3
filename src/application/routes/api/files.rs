use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::info;

use crate::application::errors::AppError;
use crate::application::profile::ActiveUser;
use crate::application::state::AppState;
use crate::domain::files::{NewSharedFile, SharedFile, validate_file_name};

/// The shared area lists at most this many files.
const LIST_LIMIT: u32 = 100;

#[tracing::instrument(skip(state))]
pub(crate) async fn list_files(
    State(state): State<AppState>,
    ActiveUser(_user): ActiveUser,
) -> Result<Json<Vec<SharedFile>>, AppError> {
    let files = state.file_repo.list(LIST_LIMIT).await?;
    Ok(Json(files))
}

#[tracing::instrument(skip(state, headers, body), fields(size = body.len()))]
pub(crate) async fn upload_file(
    State(state): State<AppState>,
    ActiveUser(user): ActiveUser,
    Path(name): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let upload = NewSharedFile {
        name,
        content_type,
        data: body.to_vec(),
    }
    .normalize();
    upload.validate().map_err(AppError::validation)?;

    let file = state.file_repo.upsert(upload).await?;
    info!(file.name = %file.name, file.size = file.size, user = %user, "shared file stored");
    Ok((StatusCode::CREATED, Json(file)).into_response())
}

#[tracing::instrument(skip(state))]
pub(crate) async fn download_file(
    State(state): State<AppState>,
    ActiveUser(_user): ActiveUser,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    validate_file_name(&name).map_err(AppError::bad_request)?;
    let content = state.file_repo.get(&name).await?;

    let content_type = HeaderValue::from_str(&content.file.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        ascii_file_name(&content.file.name)
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        content.data,
    )
        .into_response())
}

#[tracing::instrument(skip(state))]
pub(crate) async fn delete_file(
    State(state): State<AppState>,
    ActiveUser(user): ActiveUser,
    Path(name): Path<String>,
) -> Result<StatusCode, AppError> {
    validate_file_name(&name).map_err(AppError::bad_request)?;
    state.file_repo.delete(&name).await?;
    info!(file.name = %name, user = %user, "shared file deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Header-safe stand-in for a file name: non-ASCII and quotes become `_`.
fn ascii_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c == ' ' || (c.is_ascii_graphic() && c != '"' && c != '\\') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
