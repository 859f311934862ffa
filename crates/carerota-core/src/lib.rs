//! # Carerota Core Library
//!
//! This library provides the core business logic for Carerota, a shared
//! two-shift-per-day care rota. It implements a CLI-first philosophy where
//! all operations are available via a standalone CLI binary, with any
//! frontend being a thin presentation layer over the same core library.
//!
//! ## Architecture
//!
//! - **Shift Rules**: Template defaults, per-day overrides, the evening
//!   cascade, and the late-morning suppression rule
//! - **Sync**: An optimistic mirror over a replaceable shared-document
//!   store; every edit replaces the whole document
//! - **Palette**: Deterministic carer-name coloring shared by every client
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`SyncController`]: Optimistic local mirror plus fire-and-forget writes
//! - [`DocumentStore`]: Port trait a shared-document backend implements
//! - [`RotaDocument`]: The flat override map every client replaces wholesale
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod config;
pub mod days;
pub mod engine;
pub mod error;
pub mod palette;
pub mod rota;
pub mod shift;
pub mod sync;

pub use clock::{
    adjust, adjust_time, format_display, minutes_to_time, time_to_minutes, DEFAULT_STEP_MINUTES,
};
pub use config::Config;
pub use days::{generate_days, ScheduleDay};
pub use engine::{effective_shift, is_evening_suppressed, visible_shifts, EffectiveShift};
pub use error::{ConfigError, CoreError, TimeParseError};
pub use palette::{color_for, ColorPair};
pub use rota::{override_key, OverrideField, RotaDocument, ShiftOverride};
pub use shift::{template, ShiftId, ShiftTemplate, DEFAULT_SHIFTS};
pub use sync::{
    DocumentStore, FileStore, MemoryStore, SnapshotStream, StoreError, SyncController, SyncStatus,
};
