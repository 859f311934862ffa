//! The shared rota document and its override records.
//!
//! Everything every client edits lives in one flat map from
//! `"{dateKey}-{shiftId}"` strings to partial override records. The map
//! is only ever replaced wholesale, never patched in place remotely, so
//! all edit operations here are pure builders that produce the next full
//! document from the current one.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shift::ShiftId;

/// A partial per-day, per-shift patch. Unset fields fall back to computed
/// defaults; an explicit empty string renders the same as absent but
/// stays distinguishable in storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftOverride {
    #[serde(rename = "timeStart", default, skip_serializing_if = "Option::is_none")]
    pub time_start: Option<String>,
    #[serde(rename = "timeEnd", default, skip_serializing_if = "Option::is_none")]
    pub time_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ShiftOverride {
    /// Read one field. Returns `None` when the field was never set.
    pub fn field(&self, field: OverrideField) -> Option<&str> {
        match field {
            OverrideField::TimeStart => self.time_start.as_deref(),
            OverrideField::TimeEnd => self.time_end.as_deref(),
            OverrideField::Name => self.name.as_deref(),
            OverrideField::Comment => self.comment.as_deref(),
        }
    }

    fn set_field(&mut self, field: OverrideField, value: String) {
        match field {
            OverrideField::TimeStart => self.time_start = Some(value),
            OverrideField::TimeEnd => self.time_end = Some(value),
            OverrideField::Name => self.name = Some(value),
            OverrideField::Comment => self.comment = Some(value),
        }
    }
}

/// The editable fields of a [`ShiftOverride`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideField {
    TimeStart,
    TimeEnd,
    Name,
    Comment,
}

impl OverrideField {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverrideField::TimeStart => "timeStart",
            OverrideField::TimeEnd => "timeEnd",
            OverrideField::Name => "name",
            OverrideField::Comment => "comment",
        }
    }
}

impl fmt::Display for OverrideField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverrideField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "timeStart" | "time-start" | "start" => Ok(OverrideField::TimeStart),
            "timeEnd" | "time-end" | "end" => Ok(OverrideField::TimeEnd),
            "name" => Ok(OverrideField::Name),
            "comment" => Ok(OverrideField::Comment),
            other => Err(format!(
                "unknown field '{other}' (expected start, end, name or comment)"
            )),
        }
    }
}

/// Build the document key for a date/shift pair.
pub fn override_key(date_key: &str, shift_id: ShiftId) -> String {
    format!("{date_key}-{shift_id}")
}

/// Split a document key back into `(dateKey, shiftId)`.
///
/// Date keys contain `-` themselves, so the shift id is whatever follows
/// the last separator.
pub fn parse_override_key(key: &str) -> Option<(&str, ShiftId)> {
    let (date_key, shift) = key.rsplit_once('-')?;
    let shift_id = shift.parse().ok()?;
    Some((date_key, shift_id))
}

/// The full override map, exactly as persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RotaDocument(HashMap<String, ShiftOverride>);

impl RotaDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override record for a date/shift, if any was ever written.
    pub fn get(&self, date_key: &str, shift_id: ShiftId) -> Option<&ShiftOverride> {
        self.0.get(&override_key(date_key, shift_id))
    }

    /// Override record for a date/shift, defaulting to the all-unset
    /// record when none exists.
    pub fn shift_data(&self, date_key: &str, shift_id: ShiftId) -> ShiftOverride {
        self.get(date_key, shift_id).cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ShiftOverride)> {
        self.0.iter()
    }

    // ── Patch builders ───────────────────────────────────────────────
    // Each returns the next full document; the caller hands it to
    // `SyncController::write` as a whole-document replace.

    /// One field patched on one record.
    pub fn with_field(
        &self,
        date_key: &str,
        shift_id: ShiftId,
        field: OverrideField,
        value: impl Into<String>,
    ) -> RotaDocument {
        let mut next = self.clone();
        next.0
            .entry(override_key(date_key, shift_id))
            .or_default()
            .set_field(field, value.into());
        next
    }

    /// One field set to the explicit empty string. The record stays in
    /// the document so "cleared" survives later snapshots.
    pub fn with_field_cleared(
        &self,
        date_key: &str,
        shift_id: ShiftId,
        field: OverrideField,
    ) -> RotaDocument {
        self.with_field(date_key, shift_id, field, "")
    }

    /// Both times patched on one record.
    pub fn with_shift_times(
        &self,
        date_key: &str,
        shift_id: ShiftId,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> RotaDocument {
        let mut next = self.clone();
        let record = next.0.entry(override_key(date_key, shift_id)).or_default();
        record.time_start = Some(start.into());
        record.time_end = Some(end.into());
        next
    }

    /// The morning-save cascade: the morning record gets both new times,
    /// and the evening record's start is force-set to the new morning
    /// end, overwriting any independent evening start. Evening's end,
    /// name and comment are untouched. Both records land in one
    /// document, so one write carries the whole cascade.
    pub fn with_morning_cascade(
        &self,
        date_key: &str,
        new_start: impl Into<String>,
        new_end: impl Into<String>,
    ) -> RotaDocument {
        let new_end = new_end.into();
        let mut next = self.clone();

        let morning = next
            .0
            .entry(override_key(date_key, ShiftId::Morning))
            .or_default();
        morning.time_start = Some(new_start.into());
        morning.time_end = Some(new_end.clone());

        let evening = next
            .0
            .entry(override_key(date_key, ShiftId::Evening))
            .or_default();
        evening.time_start = Some(new_end);

        next
    }
}
