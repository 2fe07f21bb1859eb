//! Session extraction and the authorization gate.
//!
//! - [`auth::CurrentUser`] -- the per-request session context, read from
//!   the session cookie and the server-side session store.
//! - [`gate::require`] -- the single policy check handlers call before any
//!   guarded operation.

pub mod auth;
pub mod gate;
