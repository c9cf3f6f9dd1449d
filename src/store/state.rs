//! Pure synchronization state
//!
//! The view state, edit buffer, and collection mutations, with no I/O.
//! The actor in [`super::manager`] drives these against the results of
//! remote calls.

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::Task;

/// Renderer-facing message for a failed load
pub const LOAD_ERROR: &str = "Error al cargar las tareas.";
/// Renderer-facing message for a failed create
pub const CREATE_ERROR: &str = "Error al crear la tarea.";
/// Renderer-facing message for a failed update
pub const UPDATE_ERROR: &str = "Error al actualizar la tarea.";
/// Renderer-facing message for a failed delete
pub const DELETE_ERROR: &str = "Error al eliminar la tarea.";

/// Three-way status gating what the renderer displays
///
/// `Error` is transient: a dismiss intent returns the store to `Ready`, and
/// a load may be re-issued after a failed initial load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Loading,
    Ready,
    Error(String),
}

impl ViewState {
    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready)
    }

    /// The failure message, if any
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl std::fmt::Display for ViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Ready => write!(f, "ready"),
            Self::Error(_) => write!(f, "error"),
        }
    }
}

/// Transient draft state for the create/update form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditBuffer {
    /// Title input, as typed so far
    pub title_draft: String,

    /// Description input, as typed so far
    pub description_draft: String,

    /// Pre-edit snapshot of the task being edited
    ///
    /// None = create mode. Some = update mode; its `status`/`priority` are
    /// round-tripped unchanged on submit.
    pub active_task: Option<Task>,
}

impl EditBuffer {
    pub fn is_editing(&self) -> bool {
        self.active_task.is_some()
    }
}

/// Read-only snapshot handed to renderers
#[derive(Debug, Clone, Serialize)]
pub struct StoreSnapshot {
    pub view_state: ViewState,
    pub tasks: Vec<Task>,
    pub edit_buffer: EditBuffer,
}

/// State owned exclusively by the sync actor
#[derive(Debug, Default)]
pub struct SyncState {
    pub view_state: ViewState,
    pub collection: Vec<Task>,
    pub edit_buffer: EditBuffer,
}

impl SyncState {
    /// Initial state: loading, empty collection, empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone the renderer-facing view of the state
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            view_state: self.view_state.clone(),
            tasks: self.collection.clone(),
            edit_buffer: self.edit_buffer.clone(),
        }
    }

    /// Replace the collection with the service's list, in its order
    pub fn apply_loaded(&mut self, tasks: Vec<Task>) {
        debug!(task_count = %tasks.len(), "apply_loaded: called");
        self.collection = tasks;
        self.view_state = ViewState::Ready;
    }

    /// Append a freshly created task and reset the drafts
    pub fn apply_created(&mut self, task: Task) {
        debug!(id = %task.id, "apply_created: called");
        self.collection.push(task);
        self.edit_buffer.title_draft.clear();
        self.edit_buffer.description_draft.clear();
    }

    /// Replace the entry matching the updated task's id, in place
    ///
    /// The buffer is cleared whether or not the entry is still present; the
    /// service already accepted the update.
    pub fn apply_updated(&mut self, task: Task) {
        debug!(id = %task.id, "apply_updated: called");
        match self.collection.iter_mut().find(|t| t.id == task.id) {
            Some(entry) => *entry = task,
            None => warn!(id = %task.id, "apply_updated: task no longer in collection"),
        }
        self.edit_buffer = EditBuffer::default();
    }

    /// Remove the entry with the given id, preserving the order of the rest
    pub fn apply_deleted(&mut self, id: u64) {
        debug!(%id, "apply_deleted: called");
        self.collection.retain(|t| t.id != id);
    }

    /// Start editing a task already in the collection
    ///
    /// Pre-fills both drafts from the task and records the pre-edit
    /// snapshot. Overwrites any unsaved edit of a different task without
    /// warning. Returns None if the id is unknown; nothing changes then.
    pub fn begin_edit(&mut self, id: u64) -> Option<Task> {
        debug!(%id, "begin_edit: called");
        let task = self.collection.iter().find(|t| t.id == id)?.clone();
        self.edit_buffer.title_draft = task.title.clone();
        self.edit_buffer.description_draft = task.description.clone();
        self.edit_buffer.active_task = Some(task.clone());
        Some(task)
    }

    /// Overwrite both drafts (the form's input bindings)
    pub fn set_drafts(&mut self, title: String, description: String) {
        self.edit_buffer.title_draft = title;
        self.edit_buffer.description_draft = description;
    }

    /// Surface a failure to the renderer; collection and buffer are untouched
    pub fn fail(&mut self, message: &str) {
        debug!(%message, "fail: called");
        self.view_state = ViewState::Error(message.to_string());
    }

    /// Dismiss a surfaced failure, restoring mutation capability
    pub fn clear_error(&mut self) {
        if let ViewState::Error(_) = self.view_state {
            debug!("clear_error: dismissing error");
            self.view_state = ViewState::Ready;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Priority, TaskStatus};

    fn loaded_state(tasks: Vec<Task>) -> SyncState {
        let mut state = SyncState::new();
        state.apply_loaded(tasks);
        state
    }

    #[test]
    fn test_initial_state() {
        let state = SyncState::new();
        assert_eq!(state.view_state, ViewState::Loading);
        assert!(state.collection.is_empty());
        assert_eq!(state.edit_buffer, EditBuffer::default());
    }

    #[test]
    fn test_apply_loaded_keeps_service_order() {
        let state = loaded_state(vec![Task::new(3, "C"), Task::new(1, "A"), Task::new(2, "B")]);

        assert_eq!(state.view_state, ViewState::Ready);
        let ids: Vec<u64> = state.collection.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_apply_created_appends_and_resets_drafts() {
        let mut state = loaded_state(vec![Task::new(1, "A")]);
        state.set_drafts("B".to_string(), "desc".to_string());

        state.apply_created(Task::new(2, "B").with_description("desc"));

        assert_eq!(state.collection.len(), 2);
        assert_eq!(state.collection[1].id, 2);
        assert_eq!(state.edit_buffer.title_draft, "");
        assert_eq!(state.edit_buffer.description_draft, "");
    }

    #[test]
    fn test_apply_updated_replaces_in_place() {
        let mut state = loaded_state(vec![Task::new(1, "A"), Task::new(2, "B"), Task::new(3, "C")]);
        state.begin_edit(2).unwrap();

        let mut updated = Task::new(2, "B2");
        updated.status = TaskStatus::InProgress;
        updated.priority = Priority::High;
        state.apply_updated(updated.clone());

        // Same position, new contents, everything else untouched
        assert_eq!(state.collection[0].title, "A");
        assert_eq!(state.collection[1], updated);
        assert_eq!(state.collection[2].title, "C");

        // Buffer fully cleared
        assert_eq!(state.edit_buffer, EditBuffer::default());
    }

    #[test]
    fn test_apply_updated_missing_id_leaves_collection() {
        let mut state = loaded_state(vec![Task::new(1, "A")]);

        state.apply_updated(Task::new(9, "ghost"));

        assert_eq!(state.collection.len(), 1);
        assert_eq!(state.collection[0].id, 1);
    }

    #[test]
    fn test_apply_deleted_preserves_relative_order() {
        let mut state = loaded_state(vec![Task::new(1, "A"), Task::new(2, "B"), Task::new(3, "C")]);

        state.apply_deleted(2);

        let ids: Vec<u64> = state.collection.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_delete_only_task_empties_collection() {
        let mut state = loaded_state(vec![Task::new(1, "A")]);

        state.apply_deleted(1);

        assert!(state.collection.is_empty());
        assert_eq!(state.view_state, ViewState::Ready);
    }

    #[test]
    fn test_begin_edit_prefills_drafts() {
        let mut state = loaded_state(vec![Task::new(1, "A").with_description("first")]);

        let task = state.begin_edit(1).unwrap();

        assert_eq!(task.id, 1);
        assert_eq!(state.edit_buffer.title_draft, "A");
        assert_eq!(state.edit_buffer.description_draft, "first");
        assert!(state.edit_buffer.is_editing());
    }

    #[test]
    fn test_begin_edit_is_idempotent() {
        let mut state = loaded_state(vec![Task::new(1, "A")]);

        state.begin_edit(1).unwrap();
        let once = state.edit_buffer.clone();
        state.begin_edit(1).unwrap();

        assert_eq!(state.edit_buffer, once);
    }

    #[test]
    fn test_begin_edit_overwrites_unsaved_edit() {
        let mut state = loaded_state(vec![Task::new(1, "A"), Task::new(2, "B")]);

        state.begin_edit(1).unwrap();
        state.set_drafts("A edited but never saved".to_string(), String::new());
        state.begin_edit(2).unwrap();

        // The unsaved edit of task 1 is discarded without warning
        assert_eq!(state.edit_buffer.title_draft, "B");
        assert_eq!(state.edit_buffer.active_task.as_ref().unwrap().id, 2);
    }

    #[test]
    fn test_begin_edit_unknown_id_changes_nothing() {
        let mut state = loaded_state(vec![Task::new(1, "A")]);
        state.set_drafts("typed".to_string(), String::new());

        assert!(state.begin_edit(9).is_none());
        assert_eq!(state.edit_buffer.title_draft, "typed");
        assert!(!state.edit_buffer.is_editing());
    }

    #[test]
    fn test_fail_keeps_collection_and_drafts() {
        let mut state = loaded_state(vec![Task::new(1, "A")]);
        state.set_drafts("B".to_string(), "kept for retry".to_string());

        state.fail(CREATE_ERROR);

        assert_eq!(state.view_state, ViewState::Error(CREATE_ERROR.to_string()));
        assert_eq!(state.collection.len(), 1);
        assert_eq!(state.edit_buffer.title_draft, "B");
        assert_eq!(state.edit_buffer.description_draft, "kept for retry");
    }

    #[test]
    fn test_clear_error_restores_ready() {
        let mut state = loaded_state(vec![]);
        state.fail(DELETE_ERROR);

        state.clear_error();

        assert_eq!(state.view_state, ViewState::Ready);
    }

    #[test]
    fn test_clear_error_noop_while_loading() {
        let mut state = SyncState::new();

        state.clear_error();

        assert_eq!(state.view_state, ViewState::Loading);
    }

    #[test]
    fn test_error_message_accessor() {
        assert_eq!(ViewState::Error(LOAD_ERROR.to_string()).error_message(), Some(LOAD_ERROR));
        assert_eq!(ViewState::Ready.error_message(), None);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        // Collections with unique ids 0..n in arbitrary title order
        fn collection_strategy() -> impl Strategy<Value = Vec<Task>> {
            prop::collection::vec(any::<u8>(), 0..20).prop_map(|titles| {
                titles
                    .into_iter()
                    .enumerate()
                    .map(|(i, t)| Task::new(i as u64, format!("task-{}", t)))
                    .collect()
            })
        }

        proptest! {
            #[test]
            fn delete_preserves_order_of_rest(tasks in collection_strategy(), id in 0u64..25) {
                let mut state = SyncState::new();
                state.apply_loaded(tasks.clone());
                state.apply_deleted(id);

                let expected: Vec<u64> = tasks.iter().map(|t| t.id).filter(|t| *t != id).collect();
                let actual: Vec<u64> = state.collection.iter().map(|t| t.id).collect();
                prop_assert_eq!(actual, expected);
            }

            #[test]
            fn update_never_changes_positions(tasks in collection_strategy(), id in 0u64..25) {
                let mut state = SyncState::new();
                state.apply_loaded(tasks.clone());
                state.apply_updated(Task::new(id, "renamed"));

                let before: Vec<u64> = tasks.iter().map(|t| t.id).collect();
                let after: Vec<u64> = state.collection.iter().map(|t| t.id).collect();
                prop_assert_eq!(after, before);
            }

            #[test]
            fn create_appends_exactly_one(tasks in collection_strategy()) {
                let mut state = SyncState::new();
                state.apply_loaded(tasks.clone());
                let new_id = tasks.len() as u64 + 100;
                state.apply_created(Task::new(new_id, "appended"));

                prop_assert_eq!(state.collection.len(), tasks.len() + 1);
                prop_assert_eq!(state.collection.last().unwrap().id, new_id);
            }
        }
    }
}
