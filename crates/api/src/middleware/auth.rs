//! Session-cookie authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use gestor_core::error::CoreError;
use gestor_core::types::DbId;
use gestor_db::repositories::SessionRepo;

use crate::auth::session::{hash_session_token, SESSION_COOKIE};
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated session, resolved from the session cookie against the
/// server-side session store.
///
/// This is the explicit per-request context object: handlers receive it as
/// an extractor parameter and never reach into ambient session state.
///
/// ```ignore
/// async fn my_handler(user: CurrentUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// The user's internal database id.
    pub user_id: DbId,
    /// The username captured at login.
    pub username: String,
    /// The role name captured at login (e.g. `"admin"`, `"manager"`).
    pub role: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_owned())
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("No active session".into())))?;

        let session = SessionRepo::find_valid_by_token_hash(&state.pool, &hash_session_token(&token))
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Session expired or unknown".into()))
            })?;

        Ok(CurrentUser {
            user_id: session.user_id,
            username: session.username,
            role: session.role,
        })
    }
}
