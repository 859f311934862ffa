//! In-process shared-document store.
//!
//! Fans every overwrite out to all live subscribers of the same path.
//! Serves as the reference [`DocumentStore`] for tests and for running
//! several controllers against one document inside one process. The
//! failure hooks exist so callers can exercise the degraded paths a real
//! transport produces.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::rota::RotaDocument;
use crate::sync::store::{DocumentStore, SnapshotStream};
use crate::sync::types::StoreError;

const CHANNEL_CAPACITY: usize = 32;

type SnapshotSender = mpsc::Sender<Result<RotaDocument, StoreError>>;

#[derive(Default)]
struct Inner {
    documents: HashMap<String, RotaDocument>,
    subscribers: HashMap<String, Vec<SnapshotSender>>,
    fail_overwrites: usize,
}

/// Shared in-memory document store.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current persisted document, empty when never written.
    pub fn snapshot(&self, path: &str) -> RotaDocument {
        self.inner
            .lock()
            .unwrap()
            .documents
            .get(path)
            .cloned()
            .unwrap_or_default()
    }

    /// Make the next `count` overwrites fail without touching the
    /// stored document.
    pub fn fail_next_overwrites(&self, count: usize) {
        self.inner.lock().unwrap().fail_overwrites = count;
    }

    /// Sever all subscriptions to `path`: each live stream receives a
    /// terminal error and then closes.
    pub async fn break_subscriptions(&self, path: &str) {
        let senders = self
            .inner
            .lock()
            .unwrap()
            .subscribers
            .remove(path)
            .unwrap_or_default();
        for tx in senders {
            let _ = tx
                .send(Err(StoreError::SubscribeFailed(
                    "subscription severed".to_string(),
                )))
                .await;
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn subscribe(&self, path: &str) -> Result<SnapshotStream, StoreError> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

        let initial = {
            let mut inner = self.inner.lock().unwrap();
            inner
                .subscribers
                .entry(path.to_string())
                .or_default()
                .push(tx.clone());
            inner.documents.get(path).cloned().unwrap_or_default()
        };

        // The channel is fresh, so this cannot block.
        let _ = tx.send(Ok(initial)).await;
        Ok(rx)
    }

    async fn overwrite(&self, path: &str, document: RotaDocument) -> Result<(), StoreError> {
        let senders = {
            let mut inner = self.inner.lock().unwrap();
            if inner.fail_overwrites > 0 {
                inner.fail_overwrites -= 1;
                return Err(StoreError::WriteFailed("induced failure".to_string()));
            }
            inner
                .documents
                .insert(path.to_string(), document.clone());
            inner
                .subscribers
                .get(path)
                .cloned()
                .unwrap_or_default()
        };

        for tx in senders {
            let _ = tx.send(Ok(document.clone())).await;
        }

        // Drop subscribers whose streams have gone away.
        self.inner
            .lock()
            .unwrap()
            .subscribers
            .entry(path.to_string())
            .or_default()
            .retain(|tx| !tx.is_closed());

        Ok(())
    }
}
