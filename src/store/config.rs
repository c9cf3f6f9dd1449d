//! Sync store configuration

use serde::{Deserialize, Serialize};

/// Sync store tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Buffer size of the intent channel
    #[serde(rename = "command-buffer")]
    pub command_buffer: usize,

    /// Buffer size of the broadcast event channel
    #[serde(rename = "event-buffer")]
    pub event_buffer: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            command_buffer: 64,
            event_buffer: 64,
        }
    }
}
