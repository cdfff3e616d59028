//! Parsing completed masks into calendar values.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::mask::digits;

/// Years below this are treated as unfinished input.
const MIN_YEAR: u32 = 1000;

/// A validated calendar date with no time or timezone component.
///
/// Serialized as ISO-8601 (`YYYY-MM-DD`); displayed as `DD/MM/YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build a date from its parts, refusing triples that do not exist on
    /// the calendar (31 February is `None`, not 3 March).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        // from_ymd_opt never normalizes, but the round-trip is the contract.
        if date.year() != year || date.month() != month || date.day() != day {
            return None;
        }
        Some(Self(date))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// The next calendar day, if representable.
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// The previous calendar day, if representable.
    pub fn pred(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// Combine with a time of day into a local, zone-less timestamp.
    pub fn at(&self, time: TimeOfDay) -> NaiveDateTime {
        self.0.and_time(time.as_naive())
    }

    /// Render as a complete `DD/MM/YYYY` mask.
    pub fn to_mask(&self) -> String {
        format!("{:02}/{:02}/{:04}", self.day(), self.month(), self.year())
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_mask())
    }
}

/// AM/PM designator for 12-hour time entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Meridiem {
    #[default]
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "PM")]
    Pm,
}

impl Meridiem {
    /// The other designator (the booking screen's AM/PM button).
    pub fn toggle(self) -> Self {
        match self {
            Self::Am => Self::Pm,
            Self::Pm => Self::Am,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is neither `AM` nor `PM`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid meridiem: {0} (use AM or PM)")]
pub struct ParseMeridiemError(pub String);

impl FromStr for Meridiem {
    type Err = ParseMeridiemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AM" => Ok(Self::Am),
            "PM" => Ok(Self::Pm),
            _ => Err(ParseMeridiemError(s.to_string())),
        }
    }
}

/// A wall-clock time on the 24-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOfDay {
    pub hour24: u32,
    pub minute: u32,
}

impl TimeOfDay {
    pub fn as_naive(&self) -> NaiveTime {
        // Fields are range-checked by parse_time; midnight is the fallback
        // for hand-built values.
        NaiveTime::from_hms_opt(self.hour24, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }

    /// Split back into a 12-hour reading and its meridiem.
    pub fn to_twelve_hour(&self) -> (u32, Meridiem) {
        let meridiem = if self.hour24 >= 12 {
            Meridiem::Pm
        } else {
            Meridiem::Am
        };
        let hour = match self.hour24 % 12 {
            0 => 12,
            h => h,
        };
        (hour, meridiem)
    }

    /// Render as `hh:mm AM|PM`.
    pub fn to_display_12h(&self) -> String {
        let (hour, meridiem) = self.to_twelve_hour();
        format!("{:02}:{:02} {}", hour, self.minute, meridiem)
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        use chrono::Timelike;
        Self {
            hour24: time.hour(),
            minute: time.minute(),
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour24, self.minute)
    }
}

/// Numeric value of `digits[start..end]`, treating a missing slice as 0.
fn slice_value(digits: &str, start: usize, end: usize) -> u32 {
    digits
        .get(start..end.min(digits.len()))
        .and_then(|slice| slice.parse().ok())
        .unwrap_or(0)
}

/// Parse a `DD/MM/YYYY` mask into a calendar date.
///
/// Separators are optional: the first eight digits are read as day, month
/// and year. Returns `None` for years below 1000, out-of-range months or
/// days, and dates that do not exist (29/02 outside leap years, 31/04, ...).
pub fn parse_date(mask: &str) -> Option<CalendarDate> {
    let digits = digits(mask, 8);
    let day = slice_value(&digits, 0, 2);
    let month = slice_value(&digits, 2, 4);
    let year = slice_value(&digits, 4, 8);

    if year < MIN_YEAR || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }

    CalendarDate::from_ymd(year as i32, month, day)
}

/// Parse an `HH:MM` mask read on a 12-hour clock.
///
/// Hours must be 1–12 and minutes 0–59. 12 AM is midnight and 12 PM is noon.
pub fn parse_time(mask: &str, meridiem: Meridiem) -> Option<TimeOfDay> {
    let digits = digits(mask, 4);
    let hour = slice_value(&digits, 0, 2);
    let minute = slice_value(&digits, 2, 4);

    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }

    let mut hour24 = hour % 12;
    if meridiem == Meridiem::Pm {
        hour24 = (hour24 + 12) % 24;
    }

    Some(TimeOfDay { hour24, minute })
}
