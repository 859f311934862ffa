//! Port trait for shared-document backends.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::rota::RotaDocument;
use crate::sync::types::StoreError;

/// Ordered snapshot delivery for one subscriber.
///
/// Each item is either a full replacement document or the error that
/// broke the channel. The stream closing without an error is a normal
/// end of delivery, not a failure.
pub type SnapshotStream = mpsc::Receiver<Result<RotaDocument, StoreError>>;

/// A shared-document backend.
///
/// The document named by `path` is only ever read and written whole:
/// `subscribe` pushes the entire map on every change (starting with the
/// current value, or an empty map when none exists), and `overwrite`
/// replaces the entire map. There is deliberately no field-level
/// primitive; merge semantics live with the callers.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Open a live snapshot stream for the document at `path`.
    async fn subscribe(&self, path: &str) -> Result<SnapshotStream, StoreError>;

    /// Replace the document at `path`.
    async fn overwrite(&self, path: &str, document: RotaDocument) -> Result<(), StoreError>;
}
