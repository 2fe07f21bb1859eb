//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO carrying the row id and expected
//!   `row_version` for the optimistic concurrency check

pub mod client;
pub mod contract;
pub mod employee;
pub mod invoice;
pub mod project;
pub mod report;
pub mod session;
pub mod user;
