pub(crate) mod books;
pub(crate) mod files;
pub(crate) mod genres;
pub(crate) mod session;
pub(crate) mod stats;
pub(crate) mod suggestions;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};

use crate::application::state::AppState;
use crate::domain::files::MAX_SHARED_FILE_BYTES;

/// 1 MB limit for JSON bodies.
const JSON_BODY_LIMIT_BYTES: usize = 1024 * 1024;

pub(super) fn router() -> axum::Router<AppState> {
    entity_routes()
        .layer(DefaultBodyLimit::max(JSON_BODY_LIMIT_BYTES))
        .merge(file_routes())
        .merge(session_routes())
}

fn entity_routes() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/{id}",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .route("/books/{id}/progress", post(books::update_progress))
        .route("/genres", get(genres::list_genres).post(genres::create_genre))
        .route("/genres/{id}", delete(genres::delete_genre))
        .route("/stats", get(stats::get_stats))
        .route("/suggestions", post(suggestions::suggest_book))
}

fn file_routes() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/files", get(files::list_files))
        .route(
            "/files/{name}",
            get(files::download_file)
                .put(files::upload_file)
                .delete(files::delete_file),
        )
        .layer(DefaultBodyLimit::max(MAX_SHARED_FILE_BYTES))
}

fn session_routes() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/users", get(session::list_users))
        .route(
            "/session",
            get(session::get_session)
                .post(session::select_user)
                .delete(session::clear_session),
        )
}
