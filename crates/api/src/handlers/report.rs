//! Handlers for the `/reports` resource.
//!
//! The project-finish flow is the normal producer of reports; the direct
//! create endpoint mirrors the administrative surface of the system.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use gestor_core::error::CoreError;
use gestor_core::policy::Operation;
use gestor_core::types::DbId;
use gestor_db::models::report::{CreateReport, Report, ReportWithProject, UpdateReport};
use gestor_db::repositories::{ReportRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{require_matching_id, stale_or_missing};
use crate::middleware::auth::CurrentUser;
use crate::middleware::gate::require;
use crate::state::AppState;

/// POST /api/v1/reports
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<CreateReport>,
) -> AppResult<(StatusCode, Json<Report>)> {
    require(&user, Operation::ManageReports)?;

    let report = ReportRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// GET /api/v1/reports
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<ReportWithProject>>> {
    require(&user, Operation::ManageReports)?;

    let reports = ReportRepo::list(&state.pool).await?;
    Ok(Json(reports))
}

/// GET /api/v1/reports/mine
///
/// Reports for projects owned by the session user's linked client. A user
/// without a client link simply has no reports.
pub async fn mine(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<ReportWithProject>>> {
    require(&user, Operation::ViewOwnReports)?;

    let account = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let reports = match account.client_id {
        Some(client_id) => ReportRepo::list_for_client(&state.pool, client_id).await?,
        None => Vec::new(),
    };
    Ok(Json(reports))
}

/// GET /api/v1/reports/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Report>> {
    require(&user, Operation::ManageReports)?;

    let report = ReportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Report",
            id,
        }))?;
    Ok(Json(report))
}

/// PUT /api/v1/reports/{id}
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateReport>,
) -> AppResult<Json<Report>> {
    require(&user, Operation::ManageReports)?;
    require_matching_id(id, input.id)?;

    match ReportRepo::update(&state.pool, &input).await? {
        Some(report) => Ok(Json(report)),
        None => Err(stale_or_missing(
            "Report",
            id,
            ReportRepo::exists(&state.pool, id).await?,
        )),
    }
}

/// DELETE /api/v1/reports/{id}
///
/// Idempotent: deleting an id that is already gone is still 204.
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require(&user, Operation::ManageReports)?;

    ReportRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
