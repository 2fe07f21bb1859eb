//! Integration tests for the repository layer against a real database:
//! version-guarded updates, wholesale assignment replacement, the finish
//! transaction, and session-store validity.

use chrono::{Duration, NaiveDate, Utc};
use sqlx::PgPool;

use gestor_db::models::client::CreateClient;
use gestor_db::models::employee::{CreateEmployee, UpdateEmployee};
use gestor_db::models::project::{CreateProject, UpdateProject};
use gestor_db::models::session::CreateSession;
use gestor_db::models::user::CreateUser;
use gestor_db::repositories::{
    ClientRepo, EmployeeRepo, ProjectRepo, ReportRepo, SessionRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn seed_client(pool: &PgPool) -> i64 {
    ClientRepo::create(
        pool,
        &CreateClient {
            name: "Seed client".into(),
            tax_id: "509111111".into(),
            address: None,
            email: None,
        },
    )
    .await
    .expect("client creation should succeed")
    .id
}

async fn seed_employee(pool: &PgPool, name: &str) -> i64 {
    EmployeeRepo::create(
        pool,
        &CreateEmployee {
            name: name.into(),
            tax_id: "111222333".into(),
            job_title: None,
            email: None,
            hired_on: date(2024, 1, 1),
            active: None,
        },
    )
    .await
    .expect("employee creation should succeed")
    .id
}

fn new_project(client_id: i64, employee_ids: Vec<i64>) -> CreateProject {
    CreateProject {
        name: "Seed project".into(),
        description: None,
        starts_on: date(2026, 2, 1),
        ends_on: date(2026, 2, 8),
        budget: 9000.0,
        status: Some("In progress".into()),
        client_id,
        employee_ids,
    }
}

// ---------------------------------------------------------------------------
// Version-guarded updates
// ---------------------------------------------------------------------------

/// An update with the stored row version applies and bumps the version; a
/// replay with the stale version matches nothing.
#[sqlx::test]
async fn test_update_is_version_guarded(pool: PgPool) {
    let employee_id = seed_employee(&pool, "Versioned").await;

    let applied = EmployeeRepo::update(
        &pool,
        &UpdateEmployee {
            id: employee_id,
            row_version: 1,
            name: Some("Renamed".into()),
            tax_id: None,
            job_title: None,
            email: None,
            hired_on: None,
            active: None,
        },
    )
    .await
    .unwrap()
    .expect("first update should match");
    assert_eq!(applied.row_version, 2);
    assert_eq!(applied.name, "Renamed");

    let replay = EmployeeRepo::update(
        &pool,
        &UpdateEmployee {
            id: employee_id,
            row_version: 1,
            name: Some("Replayed".into()),
            tax_id: None,
            job_title: None,
            email: None,
            hired_on: None,
            active: None,
        },
    )
    .await
    .unwrap();
    assert!(replay.is_none(), "stale version must not match");

    // The row still exists with the first writer's value.
    let row = EmployeeRepo::find_by_id(&pool, employee_id).await.unwrap().unwrap();
    assert_eq!(row.name, "Renamed");
}

// ---------------------------------------------------------------------------
// Assignments
// ---------------------------------------------------------------------------

/// Project updates replace the assignment set wholesale.
#[sqlx::test]
async fn test_assignment_replace(pool: PgPool) {
    let client_id = seed_client(&pool).await;
    let a = seed_employee(&pool, "A").await;
    let b = seed_employee(&pool, "B").await;

    let project = ProjectRepo::create(&pool, &new_project(client_id, vec![a, b]))
        .await
        .unwrap();
    assert_eq!(
        ProjectRepo::employee_ids(&pool, project.id).await.unwrap(),
        vec![a.min(b), a.max(b)]
    );

    let updated = ProjectRepo::update(
        &pool,
        &UpdateProject {
            id: project.id,
            row_version: 1,
            name: None,
            description: None,
            starts_on: None,
            ends_on: None,
            budget: None,
            status: None,
            client_id: None,
            employee_ids: Some(vec![b]),
        },
    )
    .await
    .unwrap()
    .expect("update should match");
    assert_eq!(
        ProjectRepo::employee_ids(&pool, updated.id).await.unwrap(),
        vec![b]
    );

    // The status probe follows the join.
    assert!(EmployeeRepo::has_assignments_in_status(&pool, b, "In progress")
        .await
        .unwrap());
    assert!(!EmployeeRepo::has_assignments_in_status(&pool, a, "In progress")
        .await
        .unwrap());
}

// ---------------------------------------------------------------------------
// Finish transaction
// ---------------------------------------------------------------------------

/// Finish flips the status and inserts the report with budget as value and
/// elapsed hours between the project dates.
#[sqlx::test]
async fn test_finish_creates_report_atomically(pool: PgPool) {
    let client_id = seed_client(&pool).await;
    let project = ProjectRepo::create(&pool, &new_project(client_id, vec![]))
        .await
        .unwrap();

    let (finished, report) = ProjectRepo::finish(&pool, project.id, Utc::now())
        .await
        .unwrap()
        .expect("project exists");

    assert_eq!(finished.status, "Finished");
    assert_eq!(report.project_id, project.id);
    assert_eq!(report.value, 9000.0);
    assert_eq!(report.total_hours, 168);

    let listed = ReportRepo::list(&pool).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].project_name, "Seed project");
}

/// Finishing a missing project writes nothing at all.
#[sqlx::test]
async fn test_finish_missing_project_is_none(pool: PgPool) {
    let outcome = ProjectRepo::finish(&pool, 999_999, Utc::now()).await.unwrap();
    assert!(outcome.is_none());
    assert!(ReportRepo::list(&pool).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Session store
// ---------------------------------------------------------------------------

/// Only live, unexpired sessions authenticate; deletion is terminal.
#[sqlx::test]
async fn test_session_validity(pool: PgPool) {
    let user = UserRepo::create(
        &pool,
        &CreateUser {
            username: "session_user".into(),
            password_hash: "$argon2id$irrelevant".into(),
            role: "admin".into(),
            employee_id: None,
            client_id: None,
        },
    )
    .await
    .unwrap();

    let live = CreateSession {
        token_hash: "live-hash".into(),
        user_id: user.id,
        username: user.username.clone(),
        role: user.role.clone(),
        expires_at: Utc::now() + Duration::days(7),
    };
    let expired = CreateSession {
        token_hash: "expired-hash".into(),
        user_id: user.id,
        username: user.username.clone(),
        role: user.role.clone(),
        expires_at: Utc::now() - Duration::hours(1),
    };
    SessionRepo::create(&pool, &live).await.unwrap();
    SessionRepo::create(&pool, &expired).await.unwrap();

    let found = SessionRepo::find_valid_by_token_hash(&pool, "live-hash")
        .await
        .unwrap()
        .expect("live session resolves");
    assert_eq!(found.role, "admin");

    assert!(SessionRepo::find_valid_by_token_hash(&pool, "expired-hash")
        .await
        .unwrap()
        .is_none());

    assert!(SessionRepo::delete_by_token_hash(&pool, "live-hash").await.unwrap());
    assert!(SessionRepo::find_valid_by_token_hash(&pool, "live-hash")
        .await
        .unwrap()
        .is_none());
    // Deleting again is a quiet no-op.
    assert!(!SessionRepo::delete_by_token_hash(&pool, "live-hash").await.unwrap());
}
