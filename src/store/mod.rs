//! Client-side task synchronization store
//!
//! A single-writer actor owns the local copy of the task collection, the
//! in-progress edit buffer, and the view state. Renderers hold a cloneable
//! [`TaskSyncStore`] handle: they dispatch intents over a channel and read
//! snapshots; they never mutate state directly.

mod config;
mod manager;
mod messages;
mod state;

pub use config::StoreConfig;
pub use manager::TaskSyncStore;
pub use messages::{StoreCommand, StoreError, StoreEvent, StoreResponse};
pub use state::{CREATE_ERROR, DELETE_ERROR, EditBuffer, LOAD_ERROR, StoreSnapshot, SyncState, UPDATE_ERROR, ViewState};
