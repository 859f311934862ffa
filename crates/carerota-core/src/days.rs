//! Calendar day sequence for the rota view.
//!
//! The view always starts at today and only ever grows; callers bump the
//! count (21 initially, +14 per load) and regenerate.

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use serde::Serialize;

/// One calendar row of the rota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleDay {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_weekend: bool,
}

impl ScheduleDay {
    /// The document key prefix for this day, `YYYY-MM-DD`.
    pub fn date_key(&self) -> String {
        date_key(self.date)
    }

    /// Short display parts: weekday, day of month, month.
    pub fn display_parts(&self) -> (String, u32, String) {
        (
            self.date.format("%a").to_string(),
            self.date.day(),
            self.date.format("%b").to_string(),
        )
    }
}

/// Format a date as the `YYYY-MM-DD` key the document uses.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `count` consecutive days starting at the local calendar date of "now".
///
/// Exactly the first element carries `is_today`; the flag compares
/// calendar dates, not instants.
pub fn generate_days(count: usize) -> Vec<ScheduleDay> {
    days_from(Local::now().date_naive(), count)
}

fn days_from(today: NaiveDate, count: usize) -> Vec<ScheduleDay> {
    (0..count)
        .filter_map(|offset| today.checked_add_days(Days::new(offset as u64)))
        .map(|date| ScheduleDay {
            date,
            is_today: date == today,
            is_weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
        })
        .collect()
}
