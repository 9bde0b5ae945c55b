//! Cookie-based session extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use cauldron_core::error::CoreError;

use crate::auth::jwt::validate_session_token;
use crate::error::AppError;
use crate::state::AppState;

/// Message returned for every gate failure. Deliberately uniform: callers
/// cannot tell a missing cookie from a bad signature or an expired token.
const UNAUTHORIZED_MSG: &str = "Missing or invalid session";

/// Authenticated user extracted from the session cookie.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's store id (from `claims.sub`), as a hex string.
    pub user_id: String,
    /// The username embedded at login time.
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(&state.config.auth.cookie_name)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(UNAUTHORIZED_MSG.into()))
            })?;

        let claims = validate_session_token(&token, &state.config.auth)
            .map_err(|_| AppError::Core(CoreError::Unauthorized(UNAUTHORIZED_MSG.into())))?;

        Ok(AuthUser {
            user_id: claims.sub,
            username: claims.username,
        })
    }
}
