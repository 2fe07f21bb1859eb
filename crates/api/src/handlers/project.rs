//! Handlers for the `/projects` resource: CRUD, the finish workflow, and
//! the employee-facing "my projects" listing.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use gestor_core::error::CoreError;
use gestor_core::policy::Operation;
use gestor_core::types::DbId;
use gestor_db::models::project::{CreateProject, ProjectDetail, ProjectWithClient, UpdateProject};
use gestor_db::models::report::Report;
use gestor_db::repositories::{ProjectRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{require_field, require_matching_id, stale_or_missing};
use crate::middleware::auth::CurrentUser;
use crate::middleware::gate::require;
use crate::state::AppState;

/// POST /api/v1/projects
///
/// The project and its assignments are written in one transaction.
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<ProjectDetail>)> {
    require(&user, Operation::ManageProjects)?;
    require_field("name", &input.name)?;

    let project = ProjectRepo::create(&state.pool, &input).await?;
    let employee_ids = ProjectRepo::employee_ids(&state.pool, project.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ProjectDetail {
            project,
            employee_ids,
        }),
    ))
}

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<ProjectWithClient>>> {
    require(&user, Operation::ManageProjects)?;

    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/mine
///
/// Projects assigned to the session user's linked employee. A user without
/// an employee link simply has no projects.
pub async fn mine(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<ProjectWithClient>>> {
    require(&user, Operation::ViewOwnProjects)?;

    let account = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let projects = match account.employee_id {
        Some(employee_id) => ProjectRepo::list_for_employee(&state.pool, employee_id).await?,
        None => Vec::new(),
    };
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectDetail>> {
    require(&user, Operation::ManageProjects)?;

    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    let employee_ids = ProjectRepo::employee_ids(&state.pool, id).await?;
    Ok(Json(ProjectDetail {
        project,
        employee_ids,
    }))
}

/// PUT /api/v1/projects/{id}
///
/// When `employee_ids` is present the assignment set is replaced wholesale
/// in the same transaction as the row update.
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<ProjectDetail>> {
    require(&user, Operation::ManageProjects)?;
    require_matching_id(id, input.id)?;
    if let Some(name) = &input.name {
        require_field("name", name)?;
    }

    match ProjectRepo::update(&state.pool, &input).await? {
        Some(project) => {
            let employee_ids = ProjectRepo::employee_ids(&state.pool, id).await?;
            Ok(Json(ProjectDetail {
                project,
                employee_ids,
            }))
        }
        None => Err(stale_or_missing(
            "Project",
            id,
            ProjectRepo::exists(&state.pool, id).await?,
        )),
    }
}

/// DELETE /api/v1/projects/{id}
///
/// Idempotent: deleting an id that is already gone is still 204.
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require(&user, Operation::ManageProjects)?;

    ProjectRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/projects/{id}/finish
///
/// Transition the project to `Finished` and record its closing report in
/// one transaction. Finishing an already-finished project records another
/// report — the operation is deliberately not idempotent.
pub async fn finish(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<Report>)> {
    require(&user, Operation::ManageProjects)?;

    match ProjectRepo::finish(&state.pool, id, Utc::now()).await? {
        Some((_project, report)) => Ok((StatusCode::CREATED, Json(report))),
        None => Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        })),
    }
}
