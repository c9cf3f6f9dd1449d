//! Tasklist - task list client for a REST task service
//!
//! Fetches, creates, edits, and deletes task records against a remote task
//! service, keeping a local collection consistent through a single-writer
//! synchronization store. The remote service is the sole source of truth;
//! nothing is persisted locally.
//!
//! # Modules
//!
//! - [`domain`] - Task record, status, and priority types
//! - [`api`] - TaskApi trait and reqwest implementation of the REST contract
//! - [`store`] - the synchronization actor and its renderer-facing handle
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod store;

// Re-export commonly used types
pub use api::{ApiError, HttpTaskClient, NewTask, TaskApi, TaskPayload};
pub use config::{Config, ServiceConfig};
pub use domain::{Priority, Task, TaskStatus};
pub use store::{
    EditBuffer, StoreConfig, StoreError, StoreEvent, StoreSnapshot, TaskSyncStore, ViewState,
};
