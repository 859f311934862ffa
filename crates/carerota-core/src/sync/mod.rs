//! Shared-document synchronization layer.
//!
//! Every client mirrors one remote document, the full override map.
//! Reads arrive as pushed whole-document snapshots; writes replace the
//! whole document. [`SyncController`] keeps the optimistic local mirror,
//! [`DocumentStore`] is the port a transport implements. Two stores ship
//! with the crate: an in-process fan-out store and a JSON file store.

pub mod controller;
pub mod file;
pub mod memory;
pub mod store;
pub mod types;


pub use controller::SyncController;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::{DocumentStore, SnapshotStream};
pub use types::{StoreError, SyncStatus};
