pub mod auth;
pub mod client;
pub mod contract;
pub mod employee;
pub mod health;
pub mod invoice;
pub mod project;
pub mod report;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                              login (public)
/// /auth/logout                             logout (public, always succeeds)
/// /auth/me                                 session introspection
///
/// /clients                                 list, create            (admin)
/// /clients/{id}                            get, update, delete
///
/// /employees                               list, create            (admin)
/// /employees/{id}                          get, update, delete
/// /employees/{id}/active-assignments       in-progress probe
///
/// /projects                                list, create            (admin, manager)
/// /projects/mine                           session employee's projects (employee)
/// /projects/{id}                           get, update, delete
/// /projects/{id}/finish                    finish workflow (POST)
///
/// /contracts                               list, create            (admin, manager)
/// /contracts/{id}                          get, update, delete
///
/// /invoices                                list, create            (admin)
/// /invoices/{id}                           get, update, delete
///
/// /reports                                 list, create            (admin, manager)
/// /reports/mine                            session client's reports (client)
/// /reports/{id}                            get, update, delete
///
/// /users                                   list, create            (admin)
/// /users/{id}                              get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/clients", client::router())
        .nest("/employees", employee::router())
        .nest("/projects", project::router())
        .nest("/contracts", contract::router())
        .nest("/invoices", invoice::router())
        .nest("/reports", report::router())
        .nest("/users", user::router())
}
