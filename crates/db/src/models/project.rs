//! Project entity model and DTOs.

use chrono::NaiveDate;
use gestor_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub budget: f64,
    /// Free text; the workflows understand the values in
    /// `gestor_core::status`.
    pub status: String,
    pub client_id: DbId,
    pub row_version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Project list row with the owning client's name joined in for display.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectWithClient {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub budget: f64,
    pub status: String,
    pub client_id: DbId,
    pub client_name: String,
    pub row_version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Project detail: the row plus its assigned employee ids.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub employee_ids: Vec<DbId>,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub budget: f64,
    /// Defaults to `Planned` if omitted.
    pub status: Option<String>,
    pub client_id: DbId,
    /// Employees to assign. Omitted means no assignments.
    #[serde(default)]
    pub employee_ids: Vec<DbId>,
}

/// DTO for updating an existing project.
///
/// When `employee_ids` is present the assignment set is replaced wholesale
/// — existing rows deleted, the given ones inserted — never patched.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub id: DbId,
    pub row_version: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub status: Option<String>,
    pub client_id: Option<DbId>,
    pub employee_ids: Option<Vec<DbId>>,
}
