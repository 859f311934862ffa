//! Minute-of-day arithmetic for `HH:MM` shift times.
//!
//! Shift times travel as `HH:MM` strings end to end; this module is the
//! only place they are converted to numbers. All arithmetic happens in
//! minutes since midnight.

use crate::error::TimeParseError;

/// Minutes in one day.
pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// Parse an `HH:MM` string into minutes since midnight.
///
/// Strict: exactly two numeric fields, hour in `0..=23`, minute in
/// `0..=59`. Anything else is rejected so a bad edit never reaches the
/// shared document.
pub fn time_to_minutes(time: &str) -> Result<u32, TimeParseError> {
    let mut fields = time.split(':');
    let (hour, minute) = match (fields.next(), fields.next(), fields.next()) {
        (Some(h), Some(m), None) => (h, m),
        _ => return Err(TimeParseError::Malformed(time.to_string())),
    };

    let hour: u32 = hour.parse().map_err(|_| TimeParseError::NotANumber {
        input: time.to_string(),
        field: hour.to_string(),
    })?;
    let minute: u32 = minute.parse().map_err(|_| TimeParseError::NotANumber {
        input: time.to_string(),
        field: minute.to_string(),
    })?;

    if hour > 23 {
        return Err(TimeParseError::HourOutOfRange {
            input: time.to_string(),
            hour,
        });
    }
    if minute > 59 {
        return Err(TimeParseError::MinuteOutOfRange {
            input: time.to_string(),
            minute,
        });
    }

    Ok(hour * 60 + minute)
}

/// Render minutes since midnight as a zero-padded `HH:MM` string.
///
/// Out-of-range totals are pulled back into the day by a single wrap
/// step: one day is added to a negative total, one day subtracted from a
/// total past midnight. One step is all the edit flows can need, since
/// times enter valid and move by [`adjust_time`] deltas of well under a
/// day.
pub fn minutes_to_time(total: i32) -> String {
    let total = if total < 0 {
        total + MINUTES_PER_DAY
    } else if total >= MINUTES_PER_DAY {
        total - MINUTES_PER_DAY
    } else {
        total
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Default minutes per adjustment step.
pub const DEFAULT_STEP_MINUTES: u32 = 30;

/// Move an `HH:MM` time by `delta` minutes, wrapping across midnight.
///
/// The delta saturates rather than overflows; an absurd step count from
/// the CLI produces an out-of-range total (which the single-step wrap
/// leaves unnormalized) instead of a panic.
pub fn adjust_time(time: &str, delta: i32) -> Result<String, TimeParseError> {
    let minutes = time_to_minutes(time)? as i32;
    Ok(minutes_to_time(minutes.saturating_add(delta)))
}

/// Move a time by whole steps, the way the time editor's plus/minus
/// buttons do.
pub fn adjust(time: &str, delta_steps: i32, step_minutes: u32) -> Result<String, TimeParseError> {
    adjust_time(time, delta_steps.saturating_mul(step_minutes as i32))
}

/// Compact 12-hour rendering for display: `"17:00"` becomes `"5pm"`,
/// `"08:30"` becomes `"8:30am"`.
///
/// Empty input renders as empty. Input that does not parse is returned
/// unchanged rather than dropped, so a damaged stored value stays visible
/// to whoever can fix it.
pub fn format_display(time: &str) -> String {
    if time.is_empty() {
        return String::new();
    }
    let minutes = match time_to_minutes(time) {
        Ok(m) => m,
        Err(_) => return time.to_string(),
    };

    let hour = minutes / 60;
    let minute = minutes % 60;
    let suffix = if hour >= 12 { "pm" } else { "am" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };

    if minute == 0 {
        format!("{hour12}{suffix}")
    } else {
        format!("{hour12}:{minute:02}{suffix}")
    }
}
