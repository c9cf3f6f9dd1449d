//! Sync store messages
//!
//! Intents, responses, and change events for the actor pattern.

use thiserror::Error;
use tokio::sync::oneshot;

use crate::domain::Task;

use super::state::StoreSnapshot;

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// A remote call failed; the message is the renderer-facing text
    #[error("{0}")]
    Remote(String),

    /// Begin-edit targeted an id not present in the collection
    #[error("Task not found: {0}")]
    NotFound(u64),

    /// A mutating intent arrived while the store was not ready
    #[error("Operation not allowed: {0}")]
    InvalidState(String),

    #[error("Channel error")]
    ChannelError,
}

/// Response from store operations
pub type StoreResponse<T> = Result<T, StoreError>;

/// Intents sent to the sync actor
///
/// Create and Update are distinct commands: the renderer decides which to
/// issue, there is no dispatch on hidden buffer state.
#[derive(Debug)]
pub enum StoreCommand {
    /// Fetch the full collection from the service
    Load {
        reply: oneshot::Sender<StoreResponse<usize>>,
    },

    /// Overwrite both drafts (form input bindings)
    SetDrafts {
        title: String,
        description: String,
        reply: oneshot::Sender<StoreResponse<()>>,
    },

    /// Start editing an existing task
    BeginEdit {
        id: u64,
        reply: oneshot::Sender<StoreResponse<Task>>,
    },

    /// Create a task from the current drafts
    Create {
        reply: oneshot::Sender<StoreResponse<Task>>,
    },

    /// Submit the current drafts against the task being edited
    Update {
        reply: oneshot::Sender<StoreResponse<Task>>,
    },

    /// Delete a task by id
    Delete {
        id: u64,
        reply: oneshot::Sender<StoreResponse<()>>,
    },

    /// Dismiss a surfaced failure
    ClearError {
        reply: oneshot::Sender<StoreResponse<()>>,
    },

    /// Read the renderer-facing snapshot
    Snapshot { reply: oneshot::Sender<StoreSnapshot> },

    /// Stop the actor
    Shutdown,
}

/// Event broadcast when the collection or view state changes
///
/// Renderers subscribe to repaint without polling.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// The collection was replaced from the service
    Loaded { count: usize },
    /// A task was created and appended
    Created { id: u64 },
    /// A task was updated in place
    Updated { id: u64 },
    /// A task was removed
    Deleted { id: u64 },
    /// A remote call failed; message is the renderer-facing text
    OperationFailed { message: String },
}
