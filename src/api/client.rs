//! TaskApi trait definition

use async_trait::async_trait;

use crate::domain::Task;

use super::error::ApiError;
use super::types::{NewTask, TaskPayload};

/// Stateless task service client - each call is an independent HTTP exchange
///
/// This is the seam between the sync store and the transport. The store only
/// sees this trait, so tests drive it with an in-memory implementation.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Fetch every task, in the order the service returns them
    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError>;

    /// Create a task; the service assigns id, status, and priority
    async fn create_task(&self, new_task: NewTask) -> Result<Task, ApiError>;

    /// Update a task by id, returning the service's representation
    async fn update_task(&self, id: u64, payload: TaskPayload) -> Result<Task, ApiError>;

    /// Delete a task by id
    async fn delete_task(&self, id: u64) -> Result<(), ApiError>;
}
