//! Route definitions for the `/projects` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /             -> list
/// POST   /             -> create
/// GET    /mine         -> session employee's projects
/// GET    /{id}         -> get_by_id
/// PUT    /{id}         -> update (assignments replaced wholesale)
/// DELETE /{id}         -> delete
/// POST   /{id}/finish  -> finish workflow: status + report, one transaction
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/mine", get(project::mine))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/finish", post(project::finish))
}
