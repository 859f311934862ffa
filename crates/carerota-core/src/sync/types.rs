//! Core types for document synchronization.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Current sync status of a controller.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncStatus {
    /// No snapshot has arrived yet.
    pub loading: bool,
    /// A write is in flight.
    pub syncing: bool,
    /// When the last snapshot was applied to the mirror.
    pub last_snapshot_at: Option<DateTime<Utc>>,
}

/// Store error types.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Subscription failed: {0}")]
    SubscribeFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_idle() {
        let status = SyncStatus::default();
        assert!(!status.loading);
        assert!(!status.syncing);
        assert!(status.last_snapshot_at.is_none());
    }

    #[test]
    fn errors_render_their_cause() {
        let err = StoreError::WriteFailed("disk full".to_string());
        assert_eq!(err.to_string(), "Write failed: disk full");
    }
}
