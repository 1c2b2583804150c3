use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};
use tracing::info;

use crate::application::errors::AppError;
use crate::application::profile::USER_COOKIE_NAME;
use crate::application::state::AppState;
use crate::domain::ids::UserProfile;

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionView {
    pub user: Option<UserProfile>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SelectUser {
    user: String,
}

pub(crate) async fn list_users() -> Json<Vec<UserProfile>> {
    Json(UserProfile::ALL.to_vec())
}

pub(crate) async fn get_session(cookies: Cookies) -> Json<SessionView> {
    let user = cookies
        .get(USER_COOKIE_NAME)
        .and_then(|cookie| cookie.value().parse::<UserProfile>().ok());
    Json(SessionView { user })
}

#[tracing::instrument(skip(state, cookies))]
pub(crate) async fn select_user(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<SelectUser>,
) -> Result<Json<SessionView>, AppError> {
    let user = payload
        .user
        .parse::<UserProfile>()
        .map_err(|()| AppError::validation(format!("unknown reader: {}", payload.user)))?;

    let cookie = Cookie::build((USER_COOKIE_NAME, user.as_str()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(!state.insecure_cookies)
        .build();
    cookies.add(cookie);

    info!(%user, "reader selected");
    Ok(Json(SessionView { user: Some(user) }))
}

pub(crate) async fn clear_session(cookies: Cookies) -> StatusCode {
    cookies.remove(Cookie::build(USER_COOKIE_NAME).path("/").build());
    StatusCode::NO_CONTENT
}
