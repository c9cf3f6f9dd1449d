//! TaskSyncStore - actor that owns the local task collection
//!
//! Processes intents via channels for race-free access to the collection and
//! edit buffer. Each remote call is awaited inside the actor loop, so at most
//! one is in flight and overlapping intents serialize in arrival order.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::api::{NewTask, TaskApi, TaskPayload};
use crate::domain::Task;

use super::config::StoreConfig;
use super::messages::{StoreCommand, StoreError, StoreEvent, StoreResponse};
use super::state::{CREATE_ERROR, DELETE_ERROR, LOAD_ERROR, StoreSnapshot, SyncState, UPDATE_ERROR, ViewState};

/// Handle to send intents to the sync actor
///
/// Cloneable; every clone talks to the same actor. The renderer receives one
/// of these at startup and never touches the state directly.
#[derive(Clone)]
pub struct TaskSyncStore {
    tx: mpsc::Sender<StoreCommand>,
    /// Broadcast sender for change notifications
    event_tx: broadcast::Sender<StoreEvent>,
}

impl TaskSyncStore {
    /// Spawn a new sync actor over the given service client
    ///
    /// The actor starts in `Loading` with an empty collection; issue
    /// [`TaskSyncStore::load`] once at startup to populate it.
    pub fn spawn(api: Arc<dyn TaskApi>, config: &StoreConfig) -> Self {
        debug!(command_buffer = %config.command_buffer, "spawn: called");
        let (tx, rx) = mpsc::channel(config.command_buffer);
        let (event_tx, _) = broadcast::channel(config.event_buffer);

        tokio::spawn(actor_loop(api, SyncState::new(), rx, event_tx.clone()));

        info!("TaskSyncStore spawned");
        Self { tx, event_tx }
    }

    /// Subscribe to change events (for renderers that repaint on push)
    pub fn subscribe_events(&self) -> broadcast::Receiver<StoreEvent> {
        self.event_tx.subscribe()
    }

    /// Fetch the collection from the service, returning the task count
    pub async fn load(&self) -> StoreResponse<usize> {
        debug!("load: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::Load { reply: reply_tx })
            .await
            .map_err(|_| StoreError::ChannelError)?;
        reply_rx.await.map_err(|_| StoreError::ChannelError)?
    }

    /// Overwrite both drafts
    pub async fn set_drafts(&self, title: &str, description: &str) -> StoreResponse<()> {
        debug!(%title, "set_drafts: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::SetDrafts {
                title: title.to_string(),
                description: description.to_string(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| StoreError::ChannelError)?;
        reply_rx.await.map_err(|_| StoreError::ChannelError)?
    }

    /// Start editing the task with the given id, returning its snapshot
    pub async fn begin_edit(&self, id: u64) -> StoreResponse<Task> {
        debug!(%id, "begin_edit: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::BeginEdit { id, reply: reply_tx })
            .await
            .map_err(|_| StoreError::ChannelError)?;
        reply_rx.await.map_err(|_| StoreError::ChannelError)?
    }

    /// Create a task from the current drafts
    pub async fn create(&self) -> StoreResponse<Task> {
        debug!("create: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::Create { reply: reply_tx })
            .await
            .map_err(|_| StoreError::ChannelError)?;
        reply_rx.await.map_err(|_| StoreError::ChannelError)?
    }

    /// Submit the current drafts against the task being edited
    pub async fn update(&self) -> StoreResponse<Task> {
        debug!("update: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::Update { reply: reply_tx })
            .await
            .map_err(|_| StoreError::ChannelError)?;
        reply_rx.await.map_err(|_| StoreError::ChannelError)?
    }

    /// Delete the task with the given id
    pub async fn delete(&self, id: u64) -> StoreResponse<()> {
        debug!(%id, "delete: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::Delete { id, reply: reply_tx })
            .await
            .map_err(|_| StoreError::ChannelError)?;
        reply_rx.await.map_err(|_| StoreError::ChannelError)?
    }

    /// Dismiss a surfaced failure, restoring mutation capability
    pub async fn clear_error(&self) -> StoreResponse<()> {
        debug!("clear_error: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::ClearError { reply: reply_tx })
            .await
            .map_err(|_| StoreError::ChannelError)?;
        reply_rx.await.map_err(|_| StoreError::ChannelError)?
    }

    /// Read the renderer-facing snapshot
    pub async fn snapshot(&self) -> StoreResponse<StoreSnapshot> {
        debug!("snapshot: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::Snapshot { reply: reply_tx })
            .await
            .map_err(|_| StoreError::ChannelError)?;
        reply_rx.await.map_err(|_| StoreError::ChannelError)
    }

    /// Stop the actor
    pub async fn shutdown(&self) -> Result<(), StoreError> {
        debug!("shutdown: called");
        self.tx
            .send(StoreCommand::Shutdown)
            .await
            .map_err(|_| StoreError::ChannelError)
    }
}

/// Reject mutating intents unless the store is ready
fn ensure_ready(state: &SyncState) -> Result<(), StoreError> {
    if state.view_state.is_ready() {
        Ok(())
    } else {
        Err(StoreError::InvalidState(format!("store is {}", state.view_state)))
    }
}

/// The actor loop that owns the state and processes intents serially
async fn actor_loop(
    api: Arc<dyn TaskApi>,
    mut state: SyncState,
    mut rx: mpsc::Receiver<StoreCommand>,
    event_tx: broadcast::Sender<StoreEvent>,
) {
    debug!("actor_loop: started");

    while let Some(cmd) = rx.recv().await {
        match cmd {
            StoreCommand::Load { reply } => {
                debug!("actor_loop: Load command");
                state.view_state = ViewState::Loading;
                match api.list_tasks().await {
                    Ok(tasks) => {
                        let count = tasks.len();
                        state.apply_loaded(tasks);
                        let _ = event_tx.send(StoreEvent::Loaded { count });
                        let _ = reply.send(Ok(count));
                    }
                    Err(e) => {
                        warn!(error = %e, "actor_loop: load failed");
                        state.fail(LOAD_ERROR);
                        let _ = event_tx.send(StoreEvent::OperationFailed {
                            message: LOAD_ERROR.to_string(),
                        });
                        let _ = reply.send(Err(StoreError::Remote(LOAD_ERROR.to_string())));
                    }
                }
            }

            StoreCommand::SetDrafts {
                title,
                description,
                reply,
            } => {
                debug!("actor_loop: SetDrafts command");
                state.set_drafts(title, description);
                let _ = reply.send(Ok(()));
            }

            StoreCommand::BeginEdit { id, reply } => {
                debug!(%id, "actor_loop: BeginEdit command");
                let result = ensure_ready(&state)
                    .and_then(|_| state.begin_edit(id).ok_or(StoreError::NotFound(id)));
                let _ = reply.send(result);
            }

            StoreCommand::Create { reply } => {
                debug!("actor_loop: Create command");
                if let Err(e) = ensure_ready(&state) {
                    let _ = reply.send(Err(e));
                    continue;
                }

                // The title is validated by the form before the intent is
                // issued; it is not re-validated here.
                let new_task = NewTask {
                    title: state.edit_buffer.title_draft.clone(),
                    description: state.edit_buffer.description_draft.clone(),
                };

                match api.create_task(new_task).await {
                    Ok(task) => {
                        state.apply_created(task.clone());
                        let _ = event_tx.send(StoreEvent::Created { id: task.id });
                        let _ = reply.send(Ok(task));
                    }
                    Err(e) => {
                        warn!(error = %e, "actor_loop: create failed");
                        state.fail(CREATE_ERROR);
                        let _ = event_tx.send(StoreEvent::OperationFailed {
                            message: CREATE_ERROR.to_string(),
                        });
                        let _ = reply.send(Err(StoreError::Remote(CREATE_ERROR.to_string())));
                    }
                }
            }

            StoreCommand::Update { reply } => {
                debug!("actor_loop: Update command");
                if let Err(e) = ensure_ready(&state) {
                    let _ = reply.send(Err(e));
                    continue;
                }

                let Some(active) = state.edit_buffer.active_task.clone() else {
                    let _ = reply.send(Err(StoreError::InvalidState(
                        "no task selected for editing".to_string(),
                    )));
                    continue;
                };

                // Status and priority round-trip unchanged from the pre-edit
                // snapshot; this client cannot alter them.
                let payload = TaskPayload {
                    title: state.edit_buffer.title_draft.clone(),
                    description: state.edit_buffer.description_draft.clone(),
                    status: active.status,
                    priority: active.priority,
                };

                match api.update_task(active.id, payload).await {
                    Ok(task) => {
                        state.apply_updated(task.clone());
                        let _ = event_tx.send(StoreEvent::Updated { id: task.id });
                        let _ = reply.send(Ok(task));
                    }
                    Err(e) => {
                        warn!(error = %e, "actor_loop: update failed");
                        state.fail(UPDATE_ERROR);
                        let _ = event_tx.send(StoreEvent::OperationFailed {
                            message: UPDATE_ERROR.to_string(),
                        });
                        let _ = reply.send(Err(StoreError::Remote(UPDATE_ERROR.to_string())));
                    }
                }
            }

            StoreCommand::Delete { id, reply } => {
                debug!(%id, "actor_loop: Delete command");
                if let Err(e) = ensure_ready(&state) {
                    let _ = reply.send(Err(e));
                    continue;
                }

                match api.delete_task(id).await {
                    Ok(()) => {
                        // No optimistic removal: the entry leaves the
                        // collection only after the service confirms.
                        state.apply_deleted(id);
                        let _ = event_tx.send(StoreEvent::Deleted { id });
                        let _ = reply.send(Ok(()));
                    }
                    Err(e) => {
                        warn!(error = %e, "actor_loop: delete failed");
                        state.fail(DELETE_ERROR);
                        let _ = event_tx.send(StoreEvent::OperationFailed {
                            message: DELETE_ERROR.to_string(),
                        });
                        let _ = reply.send(Err(StoreError::Remote(DELETE_ERROR.to_string())));
                    }
                }
            }

            StoreCommand::ClearError { reply } => {
                debug!("actor_loop: ClearError command");
                state.clear_error();
                let _ = reply.send(Ok(()));
            }

            StoreCommand::Snapshot { reply } => {
                debug!("actor_loop: Snapshot command");
                let _ = reply.send(state.snapshot());
            }

            StoreCommand::Shutdown => {
                debug!("actor_loop: Shutdown command");
                info!("TaskSyncStore shutting down");
                break;
            }
        }
    }

    debug!("actor_loop: stopped");
}
