//! Project status values.
//!
//! `projects.status` is free text; these are the values the workflows
//! understand. [`STATUS_IN_PROGRESS`] guards employee deactivation and
//! [`STATUS_FINISHED`] is set by the project-finish flow.

pub const STATUS_PLANNED: &str = "Planned";
pub const STATUS_IN_PROGRESS: &str = "In progress";
pub const STATUS_FINISHED: &str = "Finished";
