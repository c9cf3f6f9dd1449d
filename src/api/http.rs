//! HTTP implementation of the task service contract
//!
//! Thin reqwest client for the REST endpoints. The request timeout is
//! enforced here at the transport level; there is no retry policy.

use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;

use crate::config::ServiceConfig;
use crate::domain::Task;

use super::client::TaskApi;
use super::error::ApiError;
use super::types::{NewTask, TaskPayload};

/// reqwest-backed task service client
pub struct HttpTaskClient {
    base_url: String,
    http: Client,
}

impl HttpTaskClient {
    /// Create a new client from configuration
    pub fn from_config(config: &ServiceConfig) -> Result<Self, ApiError> {
        debug!(base_url = %config.base_url, timeout_ms = %config.timeout_ms, "from_config: called");
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// URL of the task collection
    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    /// URL of a single task
    fn task_url(&self, id: u64) -> String {
        format!("{}/tasks/{}", self.base_url, id)
    }

    /// Map a non-success response to an ApiError with the body as message
    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        debug!(status = %status, "check_status: service returned error");
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl TaskApi for HttpTaskClient {
    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        debug!("list_tasks: called");
        let response = self.http.get(self.tasks_url()).send().await?;
        let response = Self::check_status(response).await?;

        let tasks: Vec<Task> = response.json().await?;
        debug!(task_count = %tasks.len(), "list_tasks: fetched");
        Ok(tasks)
    }

    async fn create_task(&self, new_task: NewTask) -> Result<Task, ApiError> {
        debug!(title = %new_task.title, "create_task: called");
        let response = self.http.post(self.tasks_url()).json(&new_task).send().await?;
        let response = Self::check_status(response).await?;

        let task: Task = response.json().await?;
        debug!(id = %task.id, "create_task: created");
        Ok(task)
    }

    async fn update_task(&self, id: u64, payload: TaskPayload) -> Result<Task, ApiError> {
        debug!(%id, title = %payload.title, "update_task: called");
        let response = self.http.put(self.task_url(id)).json(&payload).send().await?;
        let response = Self::check_status(response).await?;

        let task: Task = response.json().await?;
        debug!(id = %task.id, "update_task: updated");
        Ok(task)
    }

    async fn delete_task(&self, id: u64) -> Result<(), ApiError> {
        debug!(%id, "delete_task: called");
        let response = self.http.delete(self.task_url(id)).send().await?;

        // No body is consumed on delete; only the status matters
        Self::check_status(response).await?;

        debug!(%id, "delete_task: deleted");
        Ok(())
    }
}
