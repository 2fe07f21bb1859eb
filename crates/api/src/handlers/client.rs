//! Handlers for the `/clients` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use gestor_core::error::CoreError;
use gestor_core::policy::Operation;
use gestor_core::types::DbId;
use gestor_db::models::client::{Client, CreateClient, UpdateClient};
use gestor_db::repositories::ClientRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{require_field, require_matching_id, stale_or_missing};
use crate::middleware::auth::CurrentUser;
use crate::middleware::gate::require;
use crate::state::AppState;

/// POST /api/v1/clients
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<CreateClient>,
) -> AppResult<(StatusCode, Json<Client>)> {
    require(&user, Operation::ManageClients)?;
    require_field("name", &input.name)?;
    require_field("tax_id", &input.tax_id)?;

    let client = ClientRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// GET /api/v1/clients
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Client>>> {
    require(&user, Operation::ManageClients)?;

    let clients = ClientRepo::list(&state.pool).await?;
    Ok(Json(clients))
}

/// GET /api/v1/clients/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Client>> {
    require(&user, Operation::ManageClients)?;

    let client = ClientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id,
        }))?;
    Ok(Json(client))
}

/// PUT /api/v1/clients/{id}
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateClient>,
) -> AppResult<Json<Client>> {
    require(&user, Operation::ManageClients)?;
    require_matching_id(id, input.id)?;
    if let Some(name) = &input.name {
        require_field("name", name)?;
    }
    if let Some(tax_id) = &input.tax_id {
        require_field("tax_id", tax_id)?;
    }

    match ClientRepo::update(&state.pool, &input).await? {
        Some(client) => Ok(Json(client)),
        None => Err(stale_or_missing(
            "Client",
            id,
            ClientRepo::exists(&state.pool, id).await?,
        )),
    }
}

/// DELETE /api/v1/clients/{id}
///
/// Idempotent: deleting an id that is already gone is still 204.
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require(&user, Operation::ManageClients)?;

    ClientRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
