//! JSON-file document store.
//!
//! Persists the whole document as one JSON file. Subscribing delivers a
//! single snapshot of the file's current contents and then ends; the
//! file is not watched. Good enough for one household sharing a synced
//! folder, and for inspecting a rota offline.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::rota::RotaDocument;
use crate::sync::store::{DocumentStore, SnapshotStream};
use crate::sync::types::StoreError;

/// Store backed by a single JSON file.
///
/// The file is fixed at construction; the document `path` argument of
/// the port is ignored.
pub struct FileStore {
    file: PathBuf,
}

impl FileStore {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    async fn read_document(&self) -> Result<RotaDocument, StoreError> {
        match tokio::fs::read_to_string(&self.file).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(RotaDocument::new()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn subscribe(&self, _path: &str) -> Result<SnapshotStream, StoreError> {
        let document = self.read_document().await?;
        let (tx, rx) = mpsc::channel(1);
        let _ = tx.send(Ok(document)).await;
        // tx drops here; the stream ends after the one snapshot
        Ok(rx)
    }

    async fn overwrite(&self, _path: &str, document: RotaDocument) -> Result<(), StoreError> {
        if let Some(parent) = self.file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(&document)?;
        tokio::fs::write(&self.file, json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rota::OverrideField;
    use crate::shift::ShiftId;

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("rota.json"));
        let mut stream = store.subscribe("shifts").await.unwrap();
        assert!(stream.recv().await.unwrap().unwrap().is_empty());
        assert!(stream.recv().await.is_none());
    }

    #[tokio::test]
    async fn overwrite_then_subscribe_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("rota.json");
        let doc = RotaDocument::new().with_field(
            "2026-08-24",
            ShiftId::Morning,
            OverrideField::Name,
            "Alice",
        );

        FileStore::new(&file).overwrite("shifts", doc.clone()).await.unwrap();

        let mut stream = FileStore::new(&file).subscribe("shifts").await.unwrap();
        assert_eq!(stream.recv().await.unwrap().unwrap(), doc);
    }

    #[tokio::test]
    async fn damaged_file_fails_subscription() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("rota.json");
        tokio::fs::write(&file, "not json").await.unwrap();

        let result = FileStore::new(&file).subscribe("shifts").await;
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[tokio::test]
    async fn overwrite_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested/deeper/rota.json");
        FileStore::new(&file)
            .overwrite("shifts", RotaDocument::new())
            .await
            .unwrap();
        assert!(file.exists());
    }
}
