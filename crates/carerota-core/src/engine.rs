//! Effective-shift resolution.
//!
//! Overrides are partial patches; this module turns a document plus the
//! static templates into the values a day actually shows. Two rules make
//! it more than a field-by-field fallback:
//!
//! - the evening's default start tracks the morning's effective end, so
//!   an edited morning pushes the unedited evening along with it
//! - a morning that runs to 21:00 or later absorbs the evening slot
//!   entirely, and the day renders a single all-day shift
//!
//! An explicitly cleared field (stored as `""`) resolves exactly like an
//! absent one. Storage keeps the two distinguishable; resolution does not.

use serde::Serialize;

use crate::clock::time_to_minutes;
use crate::rota::RotaDocument;
use crate::shift::{template, ShiftId, ALL_DAY_ICON};

/// Minute-of-day at which a morning shift swallows the evening.
pub const EVENING_CUTOFF: u32 = 21 * 60;

/// A shift as a day actually shows it: times, carer and note resolved,
/// icon adjusted for suppression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveShift {
    pub id: ShiftId,
    pub icon: &'static str,
    pub label: &'static str,
    pub start: String,
    pub end: String,
    pub name: String,
    pub comment: String,
}

/// Treat explicitly cleared values like absent ones.
fn set_value(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn effective_times(doc: &RotaDocument, date_key: &str, shift_id: ShiftId) -> (String, String) {
    let tpl = template(shift_id);
    let data = doc.shift_data(date_key, shift_id);

    let end = set_value(data.time_end.as_deref()).unwrap_or(tpl.time_end);
    let start = match shift_id {
        ShiftId::Morning => set_value(data.time_start.as_deref())
            .unwrap_or(tpl.time_start)
            .to_string(),
        ShiftId::Evening => match set_value(data.time_start.as_deref()) {
            Some(explicit) => explicit.to_string(),
            None => effective_times(doc, date_key, ShiftId::Morning).1,
        },
    };

    (start, end.to_string())
}

/// Resolve one shift of one day.
pub fn effective_shift(doc: &RotaDocument, date_key: &str, shift_id: ShiftId) -> EffectiveShift {
    let tpl = template(shift_id);
    let data = doc.shift_data(date_key, shift_id);
    let (start, end) = effective_times(doc, date_key, shift_id);

    let icon = if shift_id == ShiftId::Morning && is_evening_suppressed(doc, date_key) {
        ALL_DAY_ICON
    } else {
        tpl.icon
    };

    EffectiveShift {
        id: shift_id,
        icon,
        label: tpl.label,
        start,
        end,
        name: data.name.unwrap_or_default(),
        comment: data.comment.unwrap_or_default(),
    }
}

/// True when the morning's effective end reaches the cutoff and the
/// evening slot should not be shown. A stored end that fails to parse
/// never suppresses; a damaged value must stay visible to be fixed.
pub fn is_evening_suppressed(doc: &RotaDocument, date_key: &str) -> bool {
    let (_, end) = effective_times(doc, date_key, ShiftId::Morning);
    match time_to_minutes(&end) {
        Ok(minutes) => minutes >= EVENING_CUTOFF,
        Err(_) => false,
    }
}

/// The shifts a day displays, morning first, evening only when not
/// suppressed.
pub fn visible_shifts(doc: &RotaDocument, date_key: &str) -> Vec<EffectiveShift> {
    let mut shifts = vec![effective_shift(doc, date_key, ShiftId::Morning)];
    if !is_evening_suppressed(doc, date_key) {
        shifts.push(effective_shift(doc, date_key, ShiftId::Evening));
    }
    shifts
}
