//! Request bodies for the task service

use serde::Serialize;

use crate::domain::{Priority, TaskStatus};

/// Body for POST /tasks
///
/// The service fills in id, status, and priority on creation.
#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
}

/// Body for PUT /tasks/{id}
///
/// Status and priority are round-tripped from the pre-edit snapshot; this
/// client cannot change them.
#[derive(Debug, Clone, Serialize)]
pub struct TaskPayload {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
}
