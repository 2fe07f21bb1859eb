//! Domain-level error taxonomy.
//!
//! Every fallible operation in the application maps its failure into one of
//! these variants; the API layer owns the translation to HTTP responses.

/// Domain error returned by handlers and domain logic.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced row does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound {
        entity: &'static str,
        id: crate::types::DbId,
    },

    /// Input failed a validation rule. The message names the field or rule.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The row changed between read and write, or a uniqueness rule was hit.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// No usable session.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A valid session whose role is not allowed the operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Anything unexpected. Logged server-side, sanitized at the boundary.
    #[error("Internal error: {0}")]
    Internal(String),
}
