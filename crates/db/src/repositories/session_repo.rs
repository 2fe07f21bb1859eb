//! Repository for the `sessions` table — the server-side Session Store.

use gestor_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::{CreateSession, Session};

const COLUMNS: &str = "id, token_hash, user_id, username, role, expires_at, created_at";

/// Provides session creation, lookup, and deletion.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session row at login.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (token_hash, user_id, username, role, expires_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(&input.token_hash)
            .bind(input.user_id)
            .bind(&input.username)
            .bind(&input.role)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find the live session for a token digest. Expired rows are treated
    /// as absent — an expired session never authenticates.
    pub async fn find_valid_by_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM sessions WHERE token_hash = $1 AND expires_at > NOW()");
        sqlx::query_as::<_, Session>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Delete the session for a token digest (logout). Returns `true` if a
    /// row was removed; deleting an unknown token is a no-op.
    pub async fn delete_by_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
            .bind(token_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of live sessions for a user. Used by tests to assert that
    /// failed logins write nothing.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM sessions WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
