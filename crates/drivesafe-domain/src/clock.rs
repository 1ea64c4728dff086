//! Injected source of the current instant

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Source of "now" in local wall-clock time.
///
/// Domain calculations never read the system clock themselves; callers pass
/// the value obtained from a `Clock`.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    /// Start of the current calendar day
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads the local system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(NaiveDateTime);

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self(now)
    }

    pub fn at_midnight(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::MIN))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
