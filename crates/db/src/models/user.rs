//! User entity model and DTOs.

use gestor_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    /// Set only when `role` is `employee`.
    pub employee_id: Option<DbId>,
    /// Set only when `role` is `client`.
    pub client_id: Option<DbId>,
    pub row_version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub role: String,
    pub employee_id: Option<DbId>,
    pub client_id: Option<DbId>,
    pub row_version: i64,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id,
            username: u.username,
            role: u.role,
            employee_id: u.employee_id,
            client_id: u.client_id,
            row_version: u.row_version,
            created_at: u.created_at,
        }
    }
}

/// DTO for inserting a new user. The password arrives already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub employee_id: Option<DbId>,
    pub client_id: Option<DbId>,
}

/// DTO for updating an existing user. The link fields are applied verbatim
/// — the role-dependent clearing happens before this DTO is built.
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<String>,
    pub employee_id: Option<DbId>,
    pub client_id: Option<DbId>,
}
