//! Static shift templates.
//!
//! A rota day has exactly two shifts, morning then evening. Templates
//! carry the default times and display labels; per-day values come from
//! overrides resolved in [`crate::engine`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two shift slots of a day, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftId {
    Morning,
    Evening,
}

impl ShiftId {
    /// Wire name, as used in override keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftId::Morning => "morning",
            ShiftId::Evening => "evening",
        }
    }

    /// Both ids in display order.
    pub fn all() -> [ShiftId; 2] {
        [ShiftId::Morning, ShiftId::Evening]
    }
}

impl fmt::Display for ShiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(ShiftId::Morning),
            "evening" => Ok(ShiftId::Evening),
            other => Err(format!("unknown shift '{other}' (expected morning or evening)")),
        }
    }
}

/// Immutable default definition of a shift slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShiftTemplate {
    pub id: ShiftId,
    #[serde(rename = "timeStart")]
    pub time_start: &'static str,
    #[serde(rename = "timeEnd")]
    pub time_end: &'static str,
    pub icon: &'static str,
    pub label: &'static str,
}

/// The process-wide template set. Morning's default end and evening's
/// default start are the same instant, which is what makes the evening
/// fallback of [`crate::engine::effective_shift`] seamless.
pub const DEFAULT_SHIFTS: [ShiftTemplate; 2] = [
    ShiftTemplate {
        id: ShiftId::Morning,
        time_start: "08:00",
        time_end: "17:00",
        icon: "☀️",
        label: "Day",
    },
    ShiftTemplate {
        id: ShiftId::Evening,
        time_start: "17:00",
        time_end: "21:00",
        icon: "🌙",
        label: "Night",
    },
];

/// Icon shown on the morning shift when it runs late enough to absorb
/// the evening slot.
pub const ALL_DAY_ICON: &str = "📅";

/// Look up the template for a shift id.
pub fn template(id: ShiftId) -> &'static ShiftTemplate {
    match id {
        ShiftId::Morning => &DEFAULT_SHIFTS[0],
        ShiftId::Evening => &DEFAULT_SHIFTS[1],
    }
}
