//! Employee entity model and DTOs.

use chrono::NaiveDate;
use gestor_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An employee row from the `employees` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub name: String,
    pub tax_id: String,
    pub job_title: Option<String>,
    pub email: Option<String>,
    pub hired_on: NaiveDate,
    pub active: bool,
    pub row_version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new employee.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployee {
    pub name: String,
    pub tax_id: String,
    pub job_title: Option<String>,
    pub email: Option<String>,
    pub hired_on: NaiveDate,
    /// Defaults to `true` if omitted.
    pub active: Option<bool>,
}

/// DTO for updating an existing employee.
///
/// Setting `active` to `false` is rejected upstream while the employee is
/// assigned to any project still in progress.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEmployee {
    pub id: DbId,
    pub row_version: i64,
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub job_title: Option<String>,
    pub email: Option<String>,
    pub hired_on: Option<NaiveDate>,
    pub active: Option<bool>,
}
