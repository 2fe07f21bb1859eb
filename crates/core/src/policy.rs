//! Authorization policy: which roles may perform which operation.
//!
//! One static table and one gate function instead of per-handler role
//! lists. Handlers name the [`Operation`] they are about to perform and
//! call [`authorize`] with the session's role; the decision is
//! deterministic and deny-by-default — a missing or unknown role never
//! falls through to "allowed".

use crate::error::CoreError;
use crate::roles::{ROLE_ADMIN, ROLE_CLIENT, ROLE_EMPLOYEE, ROLE_MANAGER};

/// Guarded operation families. One variant per resource/action group that
/// shares an allowed-role set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Client CRUD.
    ManageClients,
    /// Employee CRUD and the active-assignment probe.
    ManageEmployees,
    /// User administration.
    ManageUsers,
    /// Invoice CRUD.
    ManageInvoices,
    /// Project CRUD and the finish workflow.
    ManageProjects,
    /// Contract CRUD.
    ManageContracts,
    /// Report list/get/create/delete.
    ManageReports,
    /// "My projects" listing for the session's linked employee.
    ViewOwnProjects,
    /// "My reports" listing for the session's linked client.
    ViewOwnReports,
}

/// The roles allowed to perform `op`. Always non-empty.
pub fn allowed_roles(op: Operation) -> &'static [&'static str] {
    match op {
        Operation::ManageClients => &[ROLE_ADMIN],
        Operation::ManageEmployees => &[ROLE_ADMIN],
        Operation::ManageUsers => &[ROLE_ADMIN],
        Operation::ManageInvoices => &[ROLE_ADMIN],
        Operation::ManageProjects => &[ROLE_ADMIN, ROLE_MANAGER],
        Operation::ManageContracts => &[ROLE_ADMIN, ROLE_MANAGER],
        Operation::ManageReports => &[ROLE_ADMIN, ROLE_MANAGER],
        Operation::ViewOwnProjects => &[ROLE_EMPLOYEE],
        Operation::ViewOwnReports => &[ROLE_CLIENT],
    }
}

/// The single authorization gate.
///
/// Allows iff `role` is present, non-empty, and a member of the operation's
/// allowed set. `None`/empty yields [`CoreError::Unauthorized`]; a known
/// session with the wrong role yields [`CoreError::Forbidden`]. No other
/// outcome exists.
pub fn authorize(role: Option<&str>, op: Operation) -> Result<(), CoreError> {
    let role = match role {
        Some(r) if !r.is_empty() => r,
        _ => return Err(CoreError::Unauthorized("No active session".into())),
    };

    if allowed_roles(op).contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Your role does not allow this operation".into(),
        ))
    }
}
