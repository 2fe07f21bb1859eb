//! Contract entity model and DTOs.

use chrono::NaiveDate;
use gestor_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A contract row from the `contracts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contract {
    pub id: DbId,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub value: f64,
    pub status: String,
    pub client_id: DbId,
    pub project_id: DbId,
    pub row_version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Contract list row with client and project names joined in for display.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContractWithRelated {
    pub id: DbId,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub value: f64,
    pub status: String,
    pub client_id: DbId,
    pub client_name: String,
    pub project_id: DbId,
    pub project_name: String,
    pub row_version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new contract.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContract {
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub value: f64,
    /// Defaults to `Active` if omitted.
    pub status: Option<String>,
    pub client_id: DbId,
    pub project_id: DbId,
}

/// DTO for updating an existing contract.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateContract {
    pub id: DbId,
    pub row_version: i64,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub value: Option<f64>,
    pub status: Option<String>,
    pub client_id: Option<DbId>,
    pub project_id: Option<DbId>,
}
