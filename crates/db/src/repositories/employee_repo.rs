//! Repository for the `employees` table.

use gestor_core::types::DbId;
use sqlx::PgPool;

use crate::models::employee::{CreateEmployee, Employee, UpdateEmployee};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, tax_id, job_title, email, hired_on, active, row_version, created_at, updated_at";

/// Provides CRUD operations for employees.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Insert a new employee, returning the created row.
    ///
    /// If `active` is `None` in the input, defaults to `true`.
    pub async fn create(pool: &PgPool, input: &CreateEmployee) -> Result<Employee, sqlx::Error> {
        let query = format!(
            "INSERT INTO employees (name, tax_id, job_title, email, hired_on, active)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(&input.name)
            .bind(&input.tax_id)
            .bind(&input.job_title)
            .bind(&input.email)
            .bind(input.hired_on)
            .bind(input.active)
            .fetch_one(pool)
            .await
    }

    /// Find an employee by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all employees ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees ORDER BY name");
        sqlx::query_as::<_, Employee>(&query).fetch_all(pool).await
    }

    /// Update an employee. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row matched the id and expected row version.
    /// The in-progress-project deactivation rule is enforced by the caller
    /// before this write.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateEmployee,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "UPDATE employees SET
                name = COALESCE($3, name),
                tax_id = COALESCE($4, tax_id),
                job_title = COALESCE($5, job_title),
                email = COALESCE($6, email),
                hired_on = COALESCE($7, hired_on),
                active = COALESCE($8, active),
                row_version = row_version + 1,
                updated_at = NOW()
             WHERE id = $1 AND row_version = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(input.id)
            .bind(input.row_version)
            .bind(&input.name)
            .bind(&input.tax_id)
            .bind(&input.job_title)
            .bind(&input.email)
            .bind(input.hired_on)
            .bind(input.active)
            .fetch_optional(pool)
            .await
    }

    /// Delete an employee by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether an employee row with this ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as("SELECT id FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    /// Whether the employee is assigned to any project whose status equals
    /// `status`. Backs the deactivation business rule.
    pub async fn has_assignments_in_status(
        pool: &PgPool,
        employee_id: DbId,
        status: &str,
    ) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "SELECT pa.project_id
             FROM project_assignments pa
             JOIN projects p ON p.id = pa.project_id
             WHERE pa.employee_id = $1 AND p.status = $2
             LIMIT 1",
        )
        .bind(employee_id)
        .bind(status)
        .fetch_optional(pool)
        .await?;
        Ok(row.is_some())
    }
}
