//! The single authorization gate.
//!
//! Thin adapter over [`gestor_core::policy::authorize`]: every guarded
//! handler names its [`Operation`] and calls [`require`] first. The policy
//! table lives in the core crate; nothing else decides access.

use gestor_core::policy::{self, Operation};

use crate::error::AppError;
use crate::middleware::auth::CurrentUser;

/// Check that the session's role may perform `op`.
///
/// Wrong role maps to 403; the missing-session case never reaches here
/// because extracting [`CurrentUser`] already rejected with 401.
pub fn require(user: &CurrentUser, op: Operation) -> Result<(), AppError> {
    policy::authorize(Some(user.role.as_str()), op).map_err(AppError::Core)
}
