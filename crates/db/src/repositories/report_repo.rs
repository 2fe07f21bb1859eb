//! Repository for the `reports` table.
//!
//! The finish flow in [`crate::repositories::ProjectRepo`] is the normal
//! producer of report rows; this repository covers the administrative
//! surface and the per-client listing.

use gestor_core::types::DbId;
use sqlx::PgPool;

use crate::models::report::{CreateReport, Report, ReportWithProject, UpdateReport};

const COLUMNS: &str =
    "id, reported_on, value, total_hours, project_id, row_version, created_at, updated_at";

/// Provides CRUD operations for reports.
pub struct ReportRepo;

impl ReportRepo {
    /// Insert a report directly. `reported_on` defaults to now.
    pub async fn create(pool: &PgPool, input: &CreateReport) -> Result<Report, sqlx::Error> {
        let query = format!(
            "INSERT INTO reports (reported_on, value, total_hours, project_id)
             VALUES (COALESCE($1, NOW()), $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(input.reported_on)
            .bind(input.value)
            .bind(input.total_hours)
            .bind(input.project_id)
            .fetch_one(pool)
            .await
    }

    /// Find a report by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Report>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reports WHERE id = $1");
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all reports with the project's name, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ReportWithProject>, sqlx::Error> {
        sqlx::query_as::<_, ReportWithProject>(
            "SELECT r.id, r.reported_on, r.value, r.total_hours,
                    r.project_id, p.name AS project_name,
                    r.row_version, r.created_at, r.updated_at
             FROM reports r
             JOIN projects p ON p.id = r.project_id
             ORDER BY r.reported_on DESC, r.id DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// List the reports for projects owned by a given client.
    pub async fn list_for_client(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Vec<ReportWithProject>, sqlx::Error> {
        sqlx::query_as::<_, ReportWithProject>(
            "SELECT r.id, r.reported_on, r.value, r.total_hours,
                    r.project_id, p.name AS project_name,
                    r.row_version, r.created_at, r.updated_at
             FROM reports r
             JOIN projects p ON p.id = r.project_id
             WHERE p.client_id = $1
             ORDER BY r.reported_on DESC, r.id DESC",
        )
        .bind(client_id)
        .fetch_all(pool)
        .await
    }

    /// Update a report. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row matched the id and expected row version.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateReport,
    ) -> Result<Option<Report>, sqlx::Error> {
        let query = format!(
            "UPDATE reports SET
                reported_on = COALESCE($3, reported_on),
                value = COALESCE($4, value),
                total_hours = COALESCE($5, total_hours),
                project_id = COALESCE($6, project_id),
                row_version = row_version + 1,
                updated_at = NOW()
             WHERE id = $1 AND row_version = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(input.id)
            .bind(input.row_version)
            .bind(input.reported_on)
            .bind(input.value)
            .bind(input.total_hours)
            .bind(input.project_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a report by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether a report row with this ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as("SELECT id FROM reports WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }
}
