//! Wall-clock abstraction.
//!
//! Sales are stamped with the time they were recorded, and "today's sales" is
//! computed against the current calendar day. Both read the time through
//! [`Clock`] so tests can pin it.

use chrono::{DateTime, FixedOffset, Local, NaiveDate};

/// Source of the current time.
pub trait Clock: Send + Sync + core::fmt::Debug {
    fn now(&self) -> DateTime<FixedOffset>;

    /// Current calendar day in the clock's own offset.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Local system time.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock frozen at one instant. Prefer this in tests for determinism.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FixedClock(DateTime<FixedOffset>);

impl FixedClock {
    pub fn new(at: DateTime<FixedOffset>) -> Self {
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_its_own_calendar_day() {
        let at = DateTime::parse_from_rfc3339("2024-03-10T23:30:00-03:00").unwrap();
        let clock = FixedClock::new(at);
        assert_eq!(clock.now(), at);
        // Day is taken in the timestamp's offset, not UTC.
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    }
}
