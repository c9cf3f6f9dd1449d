//! The Task record as served by the remote task service

use serde::{Deserialize, Serialize};

use super::priority::Priority;
use super::status::TaskStatus;

/// A task record
///
/// The remote service is the sole source of truth: it assigns `id` on
/// creation (immutable afterwards) and owns `status` and `priority`. The
/// client edits only `title` and `description`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned identifier, unique within the collection
    pub id: u64,

    /// Human-readable title, never empty
    pub title: String,

    /// Free-form description, may be empty
    #[serde(default)]
    pub description: String,

    /// Workflow status, owned by the service
    pub status: TaskStatus,

    /// Priority, owned by the service
    pub priority: Priority,
}

impl Task {
    /// Create a task with service defaults for status and priority
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            status: TaskStatus::Pending,
            priority: Priority::Low,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
