//! HTTP-level integration tests for the employee deactivation rule.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, get_auth, post_json_auth, put_json_auth};
use sqlx::PgPool;

async fn seed_assigned_employee(
    app: Router,
    cookie: &str,
    project_status: &str,
) -> (i64, i64) {
    let client = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/clients",
            serde_json::json!({"name": "Deact Co", "tax_id": "509999999"}),
            cookie,
        )
        .await,
    )
    .await;

    let employee = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/employees",
            serde_json::json!({"name": "Busy Bee", "tax_id": "111", "hired_on": "2024-01-01"}),
            cookie,
        )
        .await,
    )
    .await;
    let employee_id = employee["id"].as_i64().unwrap();

    let project = body_json(
        post_json_auth(
            app,
            "/api/v1/projects",
            serde_json::json!({
                "name": "Busy project",
                "starts_on": "2026-01-01",
                "ends_on": "2026-12-31",
                "budget": 1000.0,
                "status": project_status,
                "client_id": client["id"],
                "employee_ids": [employee_id],
            }),
            cookie,
        )
        .await,
    )
    .await;

    (employee_id, project["id"].as_i64().unwrap())
}

/// Deactivating an employee on an in-progress project is rejected and the
/// row is left unchanged.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_deactivation_blocked_while_project_in_progress(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = common::admin_session(&pool, app.clone()).await;

    let (employee_id, _project_id) =
        seed_assigned_employee(app.clone(), &cookie, "In progress").await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/employees/{employee_id}"),
        serde_json::json!({"id": employee_id, "row_version": 1, "active": false}),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    // No write happened: still active, version untouched.
    let employee = body_json(
        get_auth(app, &format!("/api/v1/employees/{employee_id}"), &cookie).await,
    )
    .await;
    assert_eq!(employee["active"], true);
    assert_eq!(employee["row_version"], 1);
}

/// Deactivating an employee whose projects are not in progress succeeds.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_deactivation_allowed_without_active_projects(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = common::admin_session(&pool, app.clone()).await;

    let (employee_id, _project_id) = seed_assigned_employee(app.clone(), &cookie, "Planned").await;

    let response = put_json_auth(
        app,
        &format!("/api/v1/employees/{employee_id}"),
        serde_json::json!({"id": employee_id, "row_version": 1, "active": false}),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["active"], false);
}

/// The probe endpoint reports whether any in-progress assignment exists.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_active_assignment_probe(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = common::admin_session(&pool, app.clone()).await;

    let (employee_id, project_id) =
        seed_assigned_employee(app.clone(), &cookie, "In progress").await;

    let json = body_json(
        get_auth(
            app.clone(),
            &format!("/api/v1/employees/{employee_id}/active-assignments"),
            &cookie,
        )
        .await,
    )
    .await;
    assert_eq!(json["has_active"], true);

    // Finish the project; the probe flips.
    let response = common::post_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/finish"),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(
        get_auth(
            app,
            &format!("/api/v1/employees/{employee_id}/active-assignments"),
            &cookie,
        )
        .await,
    )
    .await;
    assert_eq!(json["has_active"], false);
}
