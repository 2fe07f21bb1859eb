//! Request handlers, one module per resource.

pub mod auth;
pub mod client;
pub mod contract;
pub mod employee;
pub mod invoice;
pub mod project;
pub mod report;
pub mod user;

use gestor_core::error::CoreError;
use gestor_core::types::DbId;

use crate::error::AppError;

/// Reject an empty required text field with a field-naming validation error.
fn require_field(field: &'static str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "{field} is required"
        ))));
    }
    Ok(())
}

/// Reject an update whose payload id disagrees with the request path.
fn require_matching_id(path_id: DbId, payload_id: DbId) -> Result<(), AppError> {
    if path_id != payload_id {
        return Err(AppError::Core(CoreError::Validation(
            "payload id does not match the request path".into(),
        )));
    }
    Ok(())
}

/// Resolve a version-guarded update that matched no row: the row either
/// vanished (404) or changed under the caller (409, retryable).
fn stale_or_missing(entity: &'static str, id: DbId, still_exists: bool) -> AppError {
    if still_exists {
        AppError::Core(CoreError::Conflict(
            "The record was changed by another user; reload and try again".into(),
        ))
    } else {
        AppError::Core(CoreError::NotFound { entity, id })
    }
}
