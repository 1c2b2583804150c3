use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tower_cookies::Cookies;
use tracing::{Span, warn};

use crate::application::errors::AppError;
use crate::application::state::AppState;
use crate::domain::ids::UserProfile;
use crate::infrastructure::client::USER_HEADER;

pub(crate) const USER_COOKIE_NAME: &str = "liburutegia_user";

/// The reader the request acts for. Chosen, not authenticated: the session
/// cookie wins, the header serves CLI and scripted clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveUser(pub UserProfile);

impl FromRequestParts<AppState> for ActiveUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let from_cookie = match Cookies::from_request_parts(parts, state).await {
            Ok(cookies) => cookies
                .get(USER_COOKIE_NAME)
                .map(|cookie| cookie.value().to_string()),
            Err(_) => None,
        };

        let raw = from_cookie.or_else(|| {
            parts
                .headers
                .get(USER_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        });

        let Some(raw) = raw else {
            return Err(AppError::Unauthorized);
        };

        let profile = raw.parse::<UserProfile>().map_err(|()| {
            warn!(value = %raw, "request named an unknown reader");
            AppError::Unauthorized
        })?;

        Span::current().record("user.id", tracing::field::display(profile));
        Ok(ActiveUser(profile))
    }
}
