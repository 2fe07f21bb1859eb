//! Client entity model and DTOs.

use gestor_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A client row from the `clients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    pub name: String,
    pub tax_id: String,
    pub address: Option<String>,
    pub email: Option<String>,
    pub row_version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new client.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClient {
    pub name: String,
    pub tax_id: String,
    pub address: Option<String>,
    pub email: Option<String>,
}

/// DTO for updating an existing client.
///
/// `id` must match the path id and `row_version` must match the stored row
/// for the write to apply.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateClient {
    pub id: DbId,
    pub row_version: i64,
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
}
