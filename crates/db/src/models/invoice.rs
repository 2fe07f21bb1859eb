//! Invoice entity model and DTOs.

use chrono::NaiveDate;
use gestor_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An invoice row from the `invoices` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invoice {
    pub id: DbId,
    pub issued_on: NaiveDate,
    pub value: f64,
    pub contract_id: DbId,
    pub row_version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new invoice.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoice {
    pub issued_on: NaiveDate,
    pub value: f64,
    pub contract_id: DbId,
}

/// DTO for updating an existing invoice.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInvoice {
    pub id: DbId,
    pub row_version: i64,
    pub issued_on: Option<NaiveDate>,
    pub value: Option<f64>,
    pub contract_id: Option<DbId>,
}
