//! Handlers for the `/users` resource (account administration).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use gestor_core::error::CoreError;
use gestor_core::policy::Operation;
use gestor_core::roles::{ALL_ROLES, ROLE_CLIENT, ROLE_EMPLOYEE};
use gestor_core::types::DbId;
use gestor_db::models::user::{CreateUser, UpdateUser, UserResponse};
use gestor_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::handlers::{require_field, require_matching_id, stale_or_missing};
use crate::middleware::auth::CurrentUser;
use crate::middleware::gate::require;
use crate::state::AppState;

/// Minimum password length enforced on user creation and password change.
const MIN_PASSWORD_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: String,
    pub employee_id: Option<DbId>,
    pub client_id: Option<DbId>,
}

/// Request body for `PUT /users/{id}`.
///
/// The link fields carry the full desired state; together with the
/// effective role they pass through [`links_for_role`] before the write.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub id: DbId,
    pub row_version: i64,
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub employee_id: Option<DbId>,
    pub client_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/users
///
/// Create a user. At most one of the employee/client links survives,
/// decided by the role.
pub async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    require(&current, Operation::ManageUsers)?;
    require_field("username", &input.username)?;
    require_known_role(&input.role)?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let (employee_id, client_id) =
        links_for_role(&input.role, input.employee_id, input.client_id);

    let create_dto = CreateUser {
        username: input.username,
        password_hash: hashed,
        role: input.role,
        employee_id,
        client_id,
    };

    let user = UserRepo::create(&state.pool, &create_dto).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /api/v1/users
pub async fn list(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<UserResponse>>> {
    require(&current, Operation::ManageUsers)?;

    let users = UserRepo::list(&state.pool).await?;
    let responses: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(responses))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    require(&current, Operation::ManageUsers)?;

    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(UserResponse::from(user)))
}

/// PUT /api/v1/users/{id}
///
/// The role-dependent link clearing runs against the effective role — the
/// incoming one when present, the stored one otherwise.
pub async fn update(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    require(&current, Operation::ManageUsers)?;
    require_matching_id(id, input.id)?;
    if let Some(username) = &input.username {
        require_field("username", username)?;
    }
    if let Some(role) = &input.role {
        require_known_role(role)?;
    }

    let existing = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    let password_hash = match &input.password {
        Some(password) => {
            validate_password_strength(password, MIN_PASSWORD_LENGTH)
                .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
            Some(
                hash_password(password)
                    .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?,
            )
        }
        None => None,
    };

    let effective_role = input.role.as_deref().unwrap_or(&existing.role);
    let (employee_id, client_id) =
        links_for_role(effective_role, input.employee_id, input.client_id);

    let update_dto = UpdateUser {
        username: input.username,
        password_hash,
        role: input.role,
        employee_id,
        client_id,
    };

    match UserRepo::update(&state.pool, id, input.row_version, &update_dto).await? {
        Some(user) => Ok(Json(UserResponse::from(user))),
        None => Err(stale_or_missing(
            "User",
            id,
            UserRepo::exists(&state.pool, id).await?,
        )),
    }
}

/// DELETE /api/v1/users/{id}
///
/// Idempotent: deleting an id that is already gone is still 204. Sessions
/// of the deleted user cascade away with the row.
pub async fn delete(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require(&current, Operation::ManageUsers)?;

    UserRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// At most one of the two links is ever populated: the employee link for
/// the employee role, the client link for the client role, neither
/// otherwise.
fn links_for_role(
    role: &str,
    employee_id: Option<DbId>,
    client_id: Option<DbId>,
) -> (Option<DbId>, Option<DbId>) {
    if role == ROLE_EMPLOYEE {
        (employee_id, None)
    } else if role == ROLE_CLIENT {
        (None, client_id)
    } else {
        (None, None)
    }
}

/// Reject a role outside the fixed set.
fn require_known_role(role: &str) -> Result<(), AppError> {
    if !ALL_ROLES.contains(&role) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "unknown role: {role}"
        ))));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gestor_core::roles::ROLE_ADMIN;

    #[test]
    fn employee_role_keeps_only_employee_link() {
        assert_eq!(
            links_for_role(ROLE_EMPLOYEE, Some(3), Some(9)),
            (Some(3), None)
        );
    }

    #[test]
    fn client_role_keeps_only_client_link() {
        assert_eq!(links_for_role(ROLE_CLIENT, Some(3), Some(9)), (None, Some(9)));
    }

    #[test]
    fn other_roles_clear_both_links() {
        assert_eq!(links_for_role(ROLE_ADMIN, Some(3), Some(9)), (None, None));
    }
}
