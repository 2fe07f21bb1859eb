//! Handlers for the `/contracts` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use gestor_core::error::CoreError;
use gestor_core::policy::Operation;
use gestor_core::types::DbId;
use gestor_db::models::contract::{Contract, ContractWithRelated, CreateContract, UpdateContract};
use gestor_db::repositories::ContractRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{require_matching_id, stale_or_missing};
use crate::middleware::auth::CurrentUser;
use crate::middleware::gate::require;
use crate::state::AppState;

/// POST /api/v1/contracts
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<CreateContract>,
) -> AppResult<(StatusCode, Json<Contract>)> {
    require(&user, Operation::ManageContracts)?;

    let contract = ContractRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(contract)))
}

/// GET /api/v1/contracts
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<ContractWithRelated>>> {
    require(&user, Operation::ManageContracts)?;

    let contracts = ContractRepo::list(&state.pool).await?;
    Ok(Json(contracts))
}

/// GET /api/v1/contracts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Contract>> {
    require(&user, Operation::ManageContracts)?;

    let contract = ContractRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Contract",
            id,
        }))?;
    Ok(Json(contract))
}

/// PUT /api/v1/contracts/{id}
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContract>,
) -> AppResult<Json<Contract>> {
    require(&user, Operation::ManageContracts)?;
    require_matching_id(id, input.id)?;

    match ContractRepo::update(&state.pool, &input).await? {
        Some(contract) => Ok(Json(contract)),
        None => Err(stale_or_missing(
            "Contract",
            id,
            ContractRepo::exists(&state.pool, id).await?,
        )),
    }
}

/// DELETE /api/v1/contracts/{id}
///
/// Idempotent: deleting an id that is already gone is still 204.
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require(&user, Operation::ManageContracts)?;

    ContractRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
