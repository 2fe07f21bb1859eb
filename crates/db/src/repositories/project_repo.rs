//! Repository for the `projects` table and its assignment relation.

use chrono::{DateTime, Utc};
use gestor_core::reporting::elapsed_hours;
use gestor_core::status::STATUS_FINISHED;
use gestor_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::project::{CreateProject, Project, ProjectWithClient, UpdateProject};
use crate::models::report::Report;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, starts_on, ends_on, budget, status, client_id, \
                       row_version, created_at, updated_at";

/// `projects` columns qualified for joined queries, plus the client name.
const JOINED_COLUMNS: &str = "p.id, p.name, p.description, p.starts_on, p.ends_on, p.budget, \
                              p.status, p.client_id, c.name AS client_name, p.row_version, \
                              p.created_at, p.updated_at";

/// Report columns returned by the finish flow.
const REPORT_COLUMNS: &str =
    "id, reported_on, value, total_hours, project_id, row_version, created_at, updated_at";

/// Provides CRUD operations for projects, the wholesale assignment
/// replacement, and the finish workflow.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project and its assignments in one transaction.
    ///
    /// If `status` is `None` in the input, defaults to `Planned`.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects (name, description, starts_on, ends_on, budget, status, client_id)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'Planned'), $7)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.starts_on)
            .bind(input.ends_on)
            .bind(input.budget)
            .bind(&input.status)
            .bind(input.client_id)
            .fetch_one(&mut *tx)
            .await?;

        replace_assignments(&mut tx, project.id, &input.employee_ids).await?;

        tx.commit().await?;
        Ok(project)
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The ids of the employees currently assigned to the project.
    pub async fn employee_ids(pool: &PgPool, project_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT employee_id FROM project_assignments WHERE project_id = $1 ORDER BY employee_id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// List all projects with the owning client's name, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ProjectWithClient>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM projects p
             JOIN clients c ON c.id = p.client_id
             ORDER BY p.created_at DESC"
        );
        sqlx::query_as::<_, ProjectWithClient>(&query)
            .fetch_all(pool)
            .await
    }

    /// List the projects a given employee is assigned to.
    pub async fn list_for_employee(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Vec<ProjectWithClient>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM projects p
             JOIN clients c ON c.id = p.client_id
             JOIN project_assignments pa ON pa.project_id = p.id
             WHERE pa.employee_id = $1
             ORDER BY p.created_at DESC"
        );
        sqlx::query_as::<_, ProjectWithClient>(&query)
            .bind(employee_id)
            .fetch_all(pool)
            .await
    }

    /// Update a project; when `employee_ids` is present the assignment set
    /// is replaced wholesale inside the same transaction.
    ///
    /// Returns `None` if no row matched the id and expected row version —
    /// in that case no assignment rows are touched either.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE projects SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                starts_on = COALESCE($5, starts_on),
                ends_on = COALESCE($6, ends_on),
                budget = COALESCE($7, budget),
                status = COALESCE($8, status),
                client_id = COALESCE($9, client_id),
                row_version = row_version + 1,
                updated_at = NOW()
             WHERE id = $1 AND row_version = $2
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(input.id)
            .bind(input.row_version)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.starts_on)
            .bind(input.ends_on)
            .bind(input.budget)
            .bind(&input.status)
            .bind(input.client_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(project) = project else {
            return Ok(None);
        };

        if let Some(employee_ids) = &input.employee_ids {
            replace_assignments(&mut tx, project.id, employee_ids).await?;
        }

        tx.commit().await?;
        Ok(Some(project))
    }

    /// Delete a project by ID. Returns `true` if a row was removed.
    /// Assignment rows cascade with the project.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether a project row with this ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as("SELECT id FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    /// Finish a project: set its status to `Finished` and record the
    /// closing report, both in ONE transaction so a finished project can
    /// never exist without its report.
    ///
    /// The report takes the project's budget as its value and the whole
    /// elapsed hours between the project's start and end dates as its
    /// total. NOT idempotent: finishing an already-finished project
    /// records another report.
    ///
    /// Returns `None` if the project does not exist.
    pub async fn finish(
        pool: &PgPool,
        id: DbId,
        reported_on: DateTime<Utc>,
    ) -> Result<Option<(Project, Report)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE projects SET
                status = $2,
                row_version = row_version + 1,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(STATUS_FINISHED)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(project) = project else {
            return Ok(None);
        };

        let hours = elapsed_hours(project.starts_on, project.ends_on);

        let report_query = format!(
            "INSERT INTO reports (reported_on, value, total_hours, project_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {REPORT_COLUMNS}"
        );
        let report = sqlx::query_as::<_, Report>(&report_query)
            .bind(reported_on)
            .bind(project.budget)
            .bind(hours)
            .bind(project.id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some((project, report)))
    }
}

/// Replace a project's assignment set: delete every existing row, insert
/// the given employee ids. Runs on the caller's transaction.
async fn replace_assignments(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    project_id: DbId,
    employee_ids: &[DbId],
) -> Result<(), sqlx::Error> {
    let conn: &mut PgConnection = &mut *tx;
    sqlx::query("DELETE FROM project_assignments WHERE project_id = $1")
        .bind(project_id)
        .execute(&mut *conn)
        .await?;

    for employee_id in employee_ids {
        sqlx::query(
            "INSERT INTO project_assignments (employee_id, project_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(employee_id)
        .bind(project_id)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}
