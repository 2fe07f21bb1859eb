//! Handlers for the `/auth` resource (login, logout, session introspection).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use gestor_core::error::CoreError;
use gestor_core::types::DbId;
use gestor_db::models::session::CreateSession;
use gestor_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::password::verify_password;
use crate::auth::session::{generate_session_token, hash_session_token, SESSION_COOKIE};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// The session payload returned by login and `/auth/me`.
#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: DbId,
    pub username: String,
    pub role: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. On success a session row is
/// written and the opaque token set as the session cookie. Any mismatch —
/// unknown user or wrong password — fails with the same generic message
/// and writes nothing.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<SessionUser>)> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(invalid_credentials());
    }

    let (token, token_hash) = generate_session_token();
    let expires_at = Utc::now() + chrono::Duration::days(state.config.session_ttl_days);

    let session_input = CreateSession {
        token_hash,
        user_id: user.id,
        username: user.username.clone(),
        role: user.role.clone(),
        expires_at,
    };
    SessionRepo::create(&state.pool, &session_input).await?;

    let jar = jar.add(session_cookie(token, state.config.secure_cookies));

    Ok((
        jar,
        Json(SessionUser {
            id: user.id,
            username: user.username,
            role: user.role,
        }),
    ))
}

/// POST /api/v1/auth/logout
///
/// Delete the current session row and clear the cookie. Always succeeds
/// with 204, even when no session exists.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, StatusCode)> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let token_hash = hash_session_token(cookie.value());
        SessionRepo::delete_by_token_hash(&state.pool, &token_hash).await?;
    }

    let jar = jar.remove(removal_cookie());
    Ok((jar, StatusCode::NO_CONTENT))
}

/// GET /api/v1/auth/me
///
/// Return the current session's payload, or 401 without one.
pub async fn me(user: CurrentUser) -> Json<SessionUser> {
    Json(SessionUser {
        id: user.user_id,
        username: user.username,
        role: user.role,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The one error both failed-login paths share, so a caller cannot tell
/// which field was wrong.
fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid username or password".into()))
}

/// Build the session cookie carrying the opaque token.
fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// A cookie matching the session cookie's path, for removal.
fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}
