//! Handlers for the `/employees` resource.
//!
//! Carries the one employee-specific business rule: an employee assigned
//! to a project still in progress cannot be deactivated.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use gestor_core::error::CoreError;
use gestor_core::policy::Operation;
use gestor_core::status::STATUS_IN_PROGRESS;
use gestor_core::types::DbId;
use gestor_db::models::employee::{CreateEmployee, Employee, UpdateEmployee};
use gestor_db::repositories::EmployeeRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::{require_field, require_matching_id, stale_or_missing};
use crate::middleware::auth::CurrentUser;
use crate::middleware::gate::require;
use crate::state::AppState;

/// Response body for the active-assignment probe.
#[derive(Debug, Serialize)]
pub struct ActiveAssignments {
    pub has_active: bool,
}

/// POST /api/v1/employees
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<CreateEmployee>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    require(&user, Operation::ManageEmployees)?;
    require_field("name", &input.name)?;
    require_field("tax_id", &input.tax_id)?;

    let employee = EmployeeRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// GET /api/v1/employees
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Employee>>> {
    require(&user, Operation::ManageEmployees)?;

    let employees = EmployeeRepo::list(&state.pool).await?;
    Ok(Json(employees))
}

/// GET /api/v1/employees/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Employee>> {
    require(&user, Operation::ManageEmployees)?;

    let employee = EmployeeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id,
        }))?;
    Ok(Json(employee))
}

/// PUT /api/v1/employees/{id}
///
/// Deactivation (`active: false`) is rejected while the employee holds an
/// assignment to a project whose status is `In progress`; nothing is
/// written in that case.
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEmployee>,
) -> AppResult<Json<Employee>> {
    require(&user, Operation::ManageEmployees)?;
    require_matching_id(id, input.id)?;
    if let Some(name) = &input.name {
        require_field("name", name)?;
    }
    if let Some(tax_id) = &input.tax_id {
        require_field("tax_id", tax_id)?;
    }

    if input.active == Some(false) {
        let busy =
            EmployeeRepo::has_assignments_in_status(&state.pool, id, STATUS_IN_PROGRESS).await?;
        if busy {
            return Err(AppError::Core(CoreError::Validation(
                "This employee is assigned to projects in progress and cannot be deactivated"
                    .into(),
            )));
        }
    }

    match EmployeeRepo::update(&state.pool, &input).await? {
        Some(employee) => Ok(Json(employee)),
        None => Err(stale_or_missing(
            "Employee",
            id,
            EmployeeRepo::exists(&state.pool, id).await?,
        )),
    }
}

/// DELETE /api/v1/employees/{id}
///
/// Idempotent: deleting an id that is already gone is still 204.
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require(&user, Operation::ManageEmployees)?;

    EmployeeRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/employees/{id}/active-assignments
///
/// Whether the employee is currently assigned to any project in progress.
/// Backs the client-side guard shown before deactivation.
pub async fn active_assignments(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ActiveAssignments>> {
    require(&user, Operation::ManageEmployees)?;

    let has_active =
        EmployeeRepo::has_assignments_in_status(&state.pool, id, STATUS_IN_PROGRESS).await?;
    Ok(Json(ActiveAssignments { has_active }))
}
