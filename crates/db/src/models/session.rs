//! Server-side session model.
//!
//! The browser holds only an opaque token; the row stores its SHA-256
//! digest plus exactly the payload the role gate needs: user id, username,
//! role.

use gestor_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A session row from the `sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub token_hash: String,
    pub user_id: DbId,
    pub username: String,
    pub role: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for creating a new session at login.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub token_hash: String,
    pub user_id: DbId,
    pub username: String,
    pub role: String,
    pub expires_at: Timestamp,
}
