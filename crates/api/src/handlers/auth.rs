//! Handlers for the `/auth` resource (register, login, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use cauldron_core::error::CoreError;
use cauldron_db::models::user::CreateUser;
use cauldron_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use crate::auth::cookie::{removal_cookie, session_cookie};
use crate::auth::jwt::generate_session_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`. Validated after trimming, so
/// surrounding whitespace never counts toward the length bounds.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 30, message = "must be between 3 and 30 characters"))]
    pub username: String,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /auth/register
///
/// Create a new account. Returns 201 on success without logging the user
/// in; a taken username is a 409, distinct from field validation failures.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    // 1. Trim, then validate field lengths. No store access on failure.
    let input = RegisterRequest {
        username: input.username.trim().to_string(),
        password: input.password.trim().to_string(),
    };
    input.validate()?;

    // 2. Hash the password before anything is persisted.
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // 3. Insert; the unique index reports duplicates.
    let create = CreateUser {
        username: input.username,
        password_hash,
    };
    let user = UserRepo::create(&state.db, &create).await.map_err(|err| {
        if cauldron_db::is_duplicate_key_error(&err) {
            AppError::Core(CoreError::Conflict("Username is already taken".into()))
        } else {
            AppError::Database(err)
        }
    })?;

    tracing::info!(username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User created",
        }),
    ))
}

/// POST /auth/login
///
/// Authenticate with username + password. Sets the session cookie on
/// success.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<MessageResponse>)> {
    // 1. Find the user. Unknown usernames and wrong passwords produce the
    //    same response, so callers cannot enumerate accounts.
    let user = UserRepo::find_by_username(&state.db, &input.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    // 2. Verify the password against the stored hash.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid_credentials());
    }

    // 3. Issue the session token and set the cookie.
    let user_id = user
        .id
        .map(|id| id.to_hex())
        .ok_or_else(|| AppError::InternalError("Stored user is missing its id".into()))?;
    let token = generate_session_token(&user_id, &user.username, &state.config.auth)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(username = %user.username, "User logged in");

    let jar = jar.add(session_cookie(token, &state.config.auth));
    Ok((
        jar,
        Json(MessageResponse {
            message: "Logged in",
        }),
    ))
}

/// GET /auth/logout
///
/// Clear the session cookie. Always succeeds; a previously issued token
/// stays valid until its natural expiry since nothing is revoked
/// server-side.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.remove(removal_cookie(&state.config.auth));
    (
        jar,
        Json(MessageResponse {
            message: "Logged out",
        }),
    )
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid username or password".into()))
}
