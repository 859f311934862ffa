//! Optimistic mirror over a shared rota document.
//!
//! One controller per client. It subscribes to the store and replaces
//! its local mirror with every inbound snapshot; edits replace the
//! mirror immediately and push the whole document to the store in the
//! background. The mirror is never rolled back: a failed write leaves
//! the local copy ahead of the store until the next snapshot arrives.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;

use crate::clock::time_to_minutes;
use crate::engine;
use crate::engine::EffectiveShift;
use crate::error::TimeParseError;
use crate::rota::{OverrideField, RotaDocument};
use crate::shift::ShiftId;
use crate::sync::store::{DocumentStore, SnapshotStream};
use crate::sync::types::{StoreError, SyncStatus};

const LOAD_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Client-side sync state for one shared document.
pub struct SyncController {
    store: Arc<dyn DocumentStore>,
    path: String,
    mirror: Arc<Mutex<RotaDocument>>,
    loading: Arc<AtomicBool>,
    syncing: Arc<AtomicBool>,
    last_snapshot_at: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl SyncController {
    /// Create a controller for the document at `path`. The controller
    /// starts in the loading state until [`subscribe`](Self::subscribe)
    /// delivers the first snapshot.
    pub fn new(store: Arc<dyn DocumentStore>, path: impl Into<String>) -> Self {
        Self {
            store,
            path: path.into(),
            mirror: Arc::new(Mutex::new(RotaDocument::new())),
            loading: Arc::new(AtomicBool::new(true)),
            syncing: Arc::new(AtomicBool::new(false)),
            last_snapshot_at: Arc::new(Mutex::new(None)),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Snapshot of the local mirror.
    pub fn document(&self) -> RotaDocument {
        self.mirror.lock().unwrap().clone()
    }

    /// True until the first snapshot (or a subscription failure) lands.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// True while a write is in flight. Overlapping writes share this
    /// one flag, so the first to settle clears it even if another is
    /// still running.
    pub fn is_syncing(&self) -> bool {
        self.syncing.load(Ordering::SeqCst)
    }

    pub fn status(&self) -> SyncStatus {
        SyncStatus {
            loading: self.is_loading(),
            syncing: self.is_syncing(),
            last_snapshot_at: *self.last_snapshot_at.lock().unwrap(),
        }
    }

    /// Wait for the first snapshot. Never returns if the subscription
    /// stalls without failing; there is no timeout at this layer.
    pub async fn wait_until_loaded(&self) {
        while self.is_loading() {
            tokio::time::sleep(LOAD_POLL_INTERVAL).await;
        }
    }

    /// Resolve one shift of one day against the current mirror.
    pub fn effective_shift(&self, date_key: &str, shift_id: ShiftId) -> EffectiveShift {
        engine::effective_shift(&self.document(), date_key, shift_id)
    }

    /// The shifts the current mirror shows for a day, morning first.
    pub fn visible_shifts(&self, date_key: &str) -> Vec<EffectiveShift> {
        engine::visible_shifts(&self.document(), date_key)
    }

    /// Whether the current mirror suppresses the evening slot for a day.
    pub fn is_evening_suppressed(&self, date_key: &str) -> bool {
        engine::is_evening_suppressed(&self.document(), date_key)
    }

    // ── Subscription ─────────────────────────────────────────────────

    /// Open the live snapshot channel and start mirroring it. Call once.
    ///
    /// If the channel cannot be established the mirror degrades to an
    /// empty document and the loading state ends; the error is returned
    /// for reporting but no retry is attempted here.
    pub async fn subscribe(&self) -> Result<(), StoreError> {
        match self.store.subscribe(&self.path).await {
            Ok(stream) => {
                tokio::spawn(run_reader(
                    stream,
                    Arc::clone(&self.mirror),
                    Arc::clone(&self.loading),
                    Arc::clone(&self.last_snapshot_at),
                ));
                Ok(())
            }
            Err(e) => {
                tracing::warn!("subscription to '{}' failed, starting empty: {e}", self.path);
                *self.mirror.lock().unwrap() = RotaDocument::new();
                self.loading.store(false, Ordering::SeqCst);
                Err(e)
            }
        }
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Replace the mirror with `next` and push it to the store.
    ///
    /// The mirror update is synchronous; the store write runs in the
    /// background and the returned handle resolves when it settles. On
    /// failure the mirror keeps the optimistic value and the error is
    /// only logged.
    ///
    /// Writes are not queued. Two in-flight writes race the store and
    /// whichever lands last persists; since each write carries this
    /// client's whole snapshot, a concurrent edit from another client
    /// can be discarded wholesale. The document is last-writer-wins.
    pub fn write(&self, next: RotaDocument) -> JoinHandle<()> {
        *self.mirror.lock().unwrap() = next.clone();
        self.syncing.store(true, Ordering::SeqCst);

        let store = Arc::clone(&self.store);
        let syncing = Arc::clone(&self.syncing);
        let path = self.path.clone();
        tokio::spawn(async move {
            if let Err(e) = store.overwrite(&path, next).await {
                tracing::warn!("write to '{path}' failed, keeping local copy: {e}");
            }
            syncing.store(false, Ordering::SeqCst);
        })
    }

    /// Patch one field of one shift and write the result.
    ///
    /// Time fields must parse as `HH:MM`; names and comments are
    /// trimmed before storage.
    pub fn update_shift_field(
        &self,
        date_key: &str,
        shift_id: ShiftId,
        field: OverrideField,
        value: &str,
    ) -> Result<JoinHandle<()>, TimeParseError> {
        let value = match field {
            OverrideField::TimeStart | OverrideField::TimeEnd => {
                time_to_minutes(value)?;
                value.to_string()
            }
            OverrideField::Name | OverrideField::Comment => value.trim().to_string(),
        };
        let next = self.document().with_field(date_key, shift_id, field, value);
        Ok(self.write(next))
    }

    /// Save both times of a shift in one write. Saving the morning
    /// routes through the cascade so the evening start follows.
    pub fn save_shift_times(
        &self,
        date_key: &str,
        shift_id: ShiftId,
        start: &str,
        end: &str,
    ) -> Result<JoinHandle<()>, TimeParseError> {
        match shift_id {
            ShiftId::Morning => self.save_morning_cascade(date_key, start, end),
            ShiftId::Evening => {
                time_to_minutes(start)?;
                time_to_minutes(end)?;
                let next = self.document().with_shift_times(date_key, shift_id, start, end);
                Ok(self.write(next))
            }
        }
    }

    /// Save the morning times and force the evening start to the new
    /// morning end, in one write. This overwrites an independently set
    /// evening start; the evening keeps its end, carer and comment.
    pub fn save_morning_cascade(
        &self,
        date_key: &str,
        start: &str,
        end: &str,
    ) -> Result<JoinHandle<()>, TimeParseError> {
        time_to_minutes(start)?;
        time_to_minutes(end)?;
        let next = self.document().with_morning_cascade(date_key, start, end);
        Ok(self.write(next))
    }

    /// Set a field to the explicit empty string and write the result.
    /// The cleared field resolves like an absent one but stays recorded.
    pub fn clear_field(
        &self,
        date_key: &str,
        shift_id: ShiftId,
        field: OverrideField,
    ) -> JoinHandle<()> {
        let next = self.document().with_field_cleared(date_key, shift_id, field);
        self.write(next)
    }
}

async fn run_reader(
    mut stream: SnapshotStream,
    mirror: Arc<Mutex<RotaDocument>>,
    loading: Arc<AtomicBool>,
    last_snapshot_at: Arc<Mutex<Option<DateTime<Utc>>>>,
) {
    while let Some(event) = stream.recv().await {
        match event {
            Ok(snapshot) => {
                tracing::debug!("applied snapshot with {} records", snapshot.len());
                *mirror.lock().unwrap() = snapshot;
                *last_snapshot_at.lock().unwrap() = Some(Utc::now());
                loading.store(false, Ordering::SeqCst);
            }
            Err(e) => {
                tracing::warn!("snapshot channel broke, clearing mirror: {e}");
                *mirror.lock().unwrap() = RotaDocument::new();
                break;
            }
        }
    }
    // Stream over, by error or by normal close. Nothing more arrives,
    // so a still-pending load is over too.
    loading.store(false, Ordering::SeqCst);
}
