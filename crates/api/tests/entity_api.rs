//! HTTP-level integration tests for the entity CRUD pattern.
//!
//! Exercised through clients (the simplest entity), plus the
//! contract/invoice chain for FK behaviour and users for the link
//! invariant. The shared properties — idempotent delete, id-mismatch
//! rejection, stale-version conflict — hold for every entity because all
//! handlers share the same helpers.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Client CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_client_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = common::admin_session(&pool, app.clone()).await;

    let response = post_json_auth(
        app,
        "/api/v1/clients",
        serde_json::json!({"name": "Acme Ltd", "tax_id": "509123456"}),
        &cookie,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Acme Ltd");
    assert_eq!(json["row_version"], 1);
    assert!(json["id"].is_number());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_client_with_blank_name_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = common::admin_session(&pool, app.clone()).await;

    let response = post_json_auth(
        app,
        "/api/v1/clients",
        serde_json::json!({"name": "  ", "tax_id": "509123456"}),
        &cookie,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_nonexistent_client_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = common::admin_session(&pool, app.clone()).await;

    let response = get_auth(app, "/api/v1/clients/999999", &cookie).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_client(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = common::admin_session(&pool, app.clone()).await;

    let created = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/clients",
            serde_json::json!({"name": "Original", "tax_id": "111111111"}),
            &cookie,
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json_auth(
        app,
        &format!("/api/v1/clients/{id}"),
        serde_json::json!({"id": id, "row_version": 1, "name": "Renamed"}),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Renamed");
    // Untouched fields survive a partial update.
    assert_eq!(json["tax_id"], "111111111");
    assert_eq!(json["row_version"], 2);
}

/// An update whose payload id disagrees with the path is rejected before
/// any write.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_with_mismatched_id_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = common::admin_session(&pool, app.clone()).await;

    let created = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/clients",
            serde_json::json!({"name": "Mismatch", "tax_id": "222222222"}),
            &cookie,
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json_auth(
        app,
        &format!("/api/v1/clients/{id}"),
        serde_json::json!({"id": id + 1, "row_version": 1, "name": "Evil"}),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A stale row version on a still-existing row surfaces as a retryable
/// 409, not a silent overwrite.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_with_stale_version_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = common::admin_session(&pool, app.clone()).await;

    let created = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/clients",
            serde_json::json!({"name": "Contended", "tax_id": "333333333"}),
            &cookie,
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    // First writer wins, bumping the version to 2.
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/clients/{id}"),
        serde_json::json!({"id": id, "row_version": 1, "name": "First writer"}),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Second writer still holds version 1.
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/clients/{id}"),
        serde_json::json!({"id": id, "row_version": 1, "name": "Second writer"}),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The first write survived.
    let json = body_json(get_auth(app, &format!("/api/v1/clients/{id}"), &cookie).await).await;
    assert_eq!(json["name"], "First writer");
}

/// A stale update against a row deleted in the meantime is 404, not 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_of_deleted_row_is_not_found(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = common::admin_session(&pool, app.clone()).await;

    let created = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/clients",
            serde_json::json!({"name": "Doomed", "tax_id": "444444444"}),
            &cookie,
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = delete_auth(app.clone(), &format!("/api/v1/clients/{id}"), &cookie).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = put_json_auth(
        app,
        &format!("/api/v1/clients/{id}"),
        serde_json::json!({"id": id, "row_version": 1, "name": "Too late"}),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Deleting an id that was never (or no longer) present is a no-op 204 —
/// the delete flow is idempotent.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_is_idempotent(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = common::admin_session(&pool, app.clone()).await;

    let response = delete_auth(app.clone(), "/api/v1/clients/999999", &cookie).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Same for the other entities sharing the pattern.
    let response = delete_auth(app.clone(), "/api/v1/employees/999999", &cookie).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = delete_auth(app.clone(), "/api/v1/projects/999999", &cookie).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = delete_auth(app.clone(), "/api/v1/invoices/999999", &cookie).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = delete_auth(app, "/api/v1/users/999999", &cookie).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Contract / invoice chain
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_contract_and_invoice_chain(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = common::admin_session(&pool, app.clone()).await;

    let client = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/clients",
            serde_json::json!({"name": "Chained", "tax_id": "555555555"}),
            &cookie,
        )
        .await,
    )
    .await;
    let client_id = client["id"].as_i64().unwrap();

    let project = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/projects",
            serde_json::json!({
                "name": "Chained project",
                "starts_on": "2026-01-01",
                "ends_on": "2026-06-30",
                "budget": 25000.0,
                "client_id": client_id,
            }),
            &cookie,
        )
        .await,
    )
    .await;
    let project_id = project["id"].as_i64().unwrap();

    let contract = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/contracts",
            serde_json::json!({
                "starts_on": "2026-01-01",
                "ends_on": "2026-06-30",
                "value": 25000.0,
                "client_id": client_id,
                "project_id": project_id,
            }),
            &cookie,
        )
        .await,
    )
    .await;
    let contract_id = contract["id"].as_i64().unwrap();
    assert_eq!(contract["status"], "Active");

    let response = post_json_auth(
        app.clone(),
        "/api/v1/invoices",
        serde_json::json!({
            "issued_on": "2026-02-01",
            "value": 5000.0,
            "contract_id": contract_id,
        }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // The contract list eagerly joins client and project names.
    let contracts = body_json(get_auth(app, "/api/v1/contracts", &cookie).await).await;
    assert_eq!(contracts[0]["client_name"], "Chained");
    assert_eq!(contracts[0]["project_name"], "Chained project");
}

/// Creating an invoice against a nonexistent contract trips the FK and is
/// surfaced as a validation failure, not a 500.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_invoice_with_unknown_contract_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = common::admin_session(&pool, app.clone()).await;

    let response = post_json_auth(
        app,
        "/api/v1/invoices",
        serde_json::json!({
            "issued_on": "2026-02-01",
            "value": 5000.0,
            "contract_id": 999999,
        }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Users: the link invariant
// ---------------------------------------------------------------------------

/// At most one of {employee link, client link} survives user creation,
/// decided by the role.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_user_link_invariant(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = common::admin_session(&pool, app.clone()).await;

    let employee = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/employees",
            serde_json::json!({"name": "Linked Emp", "tax_id": "123", "hired_on": "2025-01-01"}),
            &cookie,
        )
        .await,
    )
    .await;
    let client = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/clients",
            serde_json::json!({"name": "Linked Cli", "tax_id": "456"}),
            &cookie,
        )
        .await,
    )
    .await;
    let employee_id = employee["id"].as_i64().unwrap();
    let client_id = client["id"].as_i64().unwrap();

    // Employee role: the client link is silently cleared.
    let user = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/users",
            serde_json::json!({
                "username": "emp_account",
                "password": "long-enough-pw",
                "role": "employee",
                "employee_id": employee_id,
                "client_id": client_id,
            }),
            &cookie,
        )
        .await,
    )
    .await;
    assert_eq!(user["employee_id"], employee_id);
    assert!(user["client_id"].is_null());
    // The password never appears in any response shape.
    assert!(user.get("password_hash").is_none());

    // Switching the role to client flips the links.
    let id = user["id"].as_i64().unwrap();
    let updated = body_json(
        put_json_auth(
            app,
            &format!("/api/v1/users/{id}"),
            serde_json::json!({
                "id": id,
                "row_version": 1,
                "role": "client",
                "employee_id": employee_id,
                "client_id": client_id,
            }),
            &cookie,
        )
        .await,
    )
    .await;
    assert!(updated["employee_id"].is_null());
    assert_eq!(updated["client_id"], client_id);
}

/// An unknown role name is rejected outright.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_user_with_unknown_role_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = common::admin_session(&pool, app.clone()).await;

    let response = post_json_auth(
        app,
        "/api/v1/users",
        serde_json::json!({
            "username": "weird",
            "password": "long-enough-pw",
            "role": "superuser",
        }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Duplicate usernames trip the unique constraint and surface as 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_username_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = common::admin_session(&pool, app.clone()).await;

    let body = serde_json::json!({
        "username": "taken",
        "password": "long-enough-pw",
        "role": "manager",
    });
    let response = post_json_auth(app.clone(), "/api/v1/users", body.clone(), &cookie).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(app, "/api/v1/users", body, &cookie).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
