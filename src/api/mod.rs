//! Task service API client
//!
//! Defines the [`TaskApi`] trait consumed by the sync store, plus the
//! reqwest-backed implementation of the remote REST contract.

pub mod client;
mod error;
mod http;
mod types;

pub use client::TaskApi;
pub use error::ApiError;
pub use http::HttpTaskClient;
pub use types::{NewTask, TaskPayload};
