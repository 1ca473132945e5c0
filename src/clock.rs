//! Source of the current time for business logic.
//!
//! Expiry checks and day-over-day comparisons read "now" through the
//! [`Clock`] trait so they can be pinned to a fixed instant in tests.

use chrono::{DateTime, NaiveDate, Utc};

pub trait Clock: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date in UTC.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl FixedClock {
    /// Noon UTC on the given date.
    pub fn on(year: i32, month: u32, day: u32) -> Self {
        let date = NaiveDate::from_ymd_opt(year, month, day).expect("valid date");
        Self(date.and_hms_opt(12, 0, 0).expect("valid time").and_utc())
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
