//! Report entity model and DTOs.
//!
//! Reports are normally created by the project-finish flow, not directly;
//! the create DTO exists for the administrative CRUD surface.

use gestor_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A report row from the `reports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Report {
    pub id: DbId,
    pub reported_on: Timestamp,
    pub value: f64,
    pub total_hours: i32,
    pub project_id: DbId,
    pub row_version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Report list row with the project's name joined in for display.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReportWithProject {
    pub id: DbId,
    pub reported_on: Timestamp,
    pub value: f64,
    pub total_hours: i32,
    pub project_id: DbId,
    pub project_name: String,
    pub row_version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a report directly.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReport {
    pub reported_on: Option<Timestamp>,
    pub value: f64,
    pub total_hours: i32,
    pub project_id: DbId,
}

/// DTO for updating an existing report.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateReport {
    pub id: DbId,
    pub row_version: i64,
    pub reported_on: Option<Timestamp>,
    pub value: Option<f64>,
    pub total_hours: Option<i32>,
    pub project_id: Option<DbId>,
}
