//! Sources of "today" and "now".

use chrono::{DateTime, Local, NaiveTime, Utc};

use super::parse::CalendarDate;

/// Supplies the current date for policy checks and timestamps for records.
pub trait Clock {
    /// Today's date on the local calendar.
    fn today(&self) -> CalendarDate;

    /// The current instant, used for `createdAt` stamps.
    fn now(&self) -> DateTime<Utc>;
}

/// The device wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> CalendarDate {
        CalendarDate::from(Local::now().date_naive())
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one day. `now()` is local midnight of that day, read
/// as UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    today: CalendarDate,
}

impl FixedClock {
    pub fn new(today: CalendarDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> CalendarDate {
        self.today
    }

    fn now(&self) -> DateTime<Utc> {
        self.today.as_naive().and_time(NaiveTime::MIN).and_utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let day = CalendarDate::from_ymd(2025, 6, 15).unwrap();
        let clock = FixedClock::new(day);
        assert_eq!(clock.today(), day);
        assert_eq!(clock.now().to_rfc3339(), "2025-06-15T00:00:00+00:00");
    }

    #[test]
    fn test_system_clock_today_is_plausible() {
        assert!(SystemClock.today().year() >= 2024);
    }
}
