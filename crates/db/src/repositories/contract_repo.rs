//! Repository for the `contracts` table.

use gestor_core::types::DbId;
use sqlx::PgPool;

use crate::models::contract::{Contract, ContractWithRelated, CreateContract, UpdateContract};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, starts_on, ends_on, value, status, client_id, project_id, \
                       row_version, created_at, updated_at";

/// Provides CRUD operations for contracts.
pub struct ContractRepo;

impl ContractRepo {
    /// Insert a new contract, returning the created row.
    ///
    /// If `status` is `None` in the input, defaults to `Active`.
    pub async fn create(pool: &PgPool, input: &CreateContract) -> Result<Contract, sqlx::Error> {
        let query = format!(
            "INSERT INTO contracts (starts_on, ends_on, value, status, client_id, project_id)
             VALUES ($1, $2, $3, COALESCE($4, 'Active'), $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(input.starts_on)
            .bind(input.ends_on)
            .bind(input.value)
            .bind(&input.status)
            .bind(input.client_id)
            .bind(input.project_id)
            .fetch_one(pool)
            .await
    }

    /// Find a contract by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Contract>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contracts WHERE id = $1");
        sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all contracts with client and project names, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ContractWithRelated>, sqlx::Error> {
        sqlx::query_as::<_, ContractWithRelated>(
            "SELECT ct.id, ct.starts_on, ct.ends_on, ct.value, ct.status,
                    ct.client_id, c.name AS client_name,
                    ct.project_id, p.name AS project_name,
                    ct.row_version, ct.created_at, ct.updated_at
             FROM contracts ct
             JOIN clients c ON c.id = ct.client_id
             JOIN projects p ON p.id = ct.project_id
             ORDER BY ct.created_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a contract. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row matched the id and expected row version.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateContract,
    ) -> Result<Option<Contract>, sqlx::Error> {
        let query = format!(
            "UPDATE contracts SET
                starts_on = COALESCE($3, starts_on),
                ends_on = COALESCE($4, ends_on),
                value = COALESCE($5, value),
                status = COALESCE($6, status),
                client_id = COALESCE($7, client_id),
                project_id = COALESCE($8, project_id),
                row_version = row_version + 1,
                updated_at = NOW()
             WHERE id = $1 AND row_version = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(input.id)
            .bind(input.row_version)
            .bind(input.starts_on)
            .bind(input.ends_on)
            .bind(input.value)
            .bind(&input.status)
            .bind(input.client_id)
            .bind(input.project_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a contract by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contracts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether a contract row with this ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as("SELECT id FROM contracts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }
}
