//! Handlers for the `/invoices` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use gestor_core::error::CoreError;
use gestor_core::policy::Operation;
use gestor_core::types::DbId;
use gestor_db::models::invoice::{CreateInvoice, Invoice, UpdateInvoice};
use gestor_db::repositories::InvoiceRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{require_matching_id, stale_or_missing};
use crate::middleware::auth::CurrentUser;
use crate::middleware::gate::require;
use crate::state::AppState;

/// POST /api/v1/invoices
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<CreateInvoice>,
) -> AppResult<(StatusCode, Json<Invoice>)> {
    require(&user, Operation::ManageInvoices)?;

    let invoice = InvoiceRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

/// GET /api/v1/invoices
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Invoice>>> {
    require(&user, Operation::ManageInvoices)?;

    let invoices = InvoiceRepo::list(&state.pool).await?;
    Ok(Json(invoices))
}

/// GET /api/v1/invoices/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Invoice>> {
    require(&user, Operation::ManageInvoices)?;

    let invoice = InvoiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }))?;
    Ok(Json(invoice))
}

/// PUT /api/v1/invoices/{id}
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateInvoice>,
) -> AppResult<Json<Invoice>> {
    require(&user, Operation::ManageInvoices)?;
    require_matching_id(id, input.id)?;

    match InvoiceRepo::update(&state.pool, &input).await? {
        Some(invoice) => Ok(Json(invoice)),
        None => Err(stale_or_missing(
            "Invoice",
            id,
            InvoiceRepo::exists(&state.pool, id).await?,
        )),
    }
}

/// DELETE /api/v1/invoices/{id}
///
/// Idempotent: deleting an id that is already gone is still 204.
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require(&user, Operation::ManageInvoices)?;

    InvoiceRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
