//! Expiration dates, statuses and countdowns for vehicle obligations
//!
//! Every comparison is made between calendar days, so the time of day of
//! either input never changes the result.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::{CalendarDay, Countdown, ExpirationStatus, DEFAULT_NEAR_THRESHOLD_DAYS};

/// Length of a "month" in countdowns. Deliberately not calendar months.
pub const COUNTDOWN_MONTH_DAYS: i64 = 30;

/// Insurance coverage ends one calendar year after payment.
///
/// Feb 29 rolls to Feb 28 of the following year.
pub fn compute_insurance_expiration<D: CalendarDay>(paid_date: Option<D>) -> Option<NaiveDate> {
    paid_date.and_then(|paid| paid.calendar_day().checked_add_months(Months::new(12)))
}

/// Whole calendar days from `now` to `expiration`; negative when already past
pub fn days_until<E: CalendarDay, N: CalendarDay>(expiration: &E, now: &N) -> i64 {
    (expiration.calendar_day() - now.calendar_day()).num_days()
}

/// Classify with the default 30-day near threshold
pub fn classify<E: CalendarDay, N: CalendarDay>(expiration: Option<E>, now: N) -> ExpirationStatus {
    classify_with_threshold(expiration, now, DEFAULT_NEAR_THRESHOLD_DAYS)
}

pub fn classify_with_threshold<E: CalendarDay, N: CalendarDay>(
    expiration: Option<E>,
    now: N,
    near_threshold_days: i64,
) -> ExpirationStatus {
    let Some(expiration) = expiration else {
        return ExpirationStatus::Unknown;
    };
    let days = days_until(&expiration, &now);
    match days {
        d if d < 0 => ExpirationStatus::Expired,
        0 => ExpirationStatus::Today,
        d if d <= near_threshold_days => ExpirationStatus::Near,
        _ => ExpirationStatus::Future,
    }
}

/// Split the remaining time into display parts.
///
/// Past dates yield `Countdown::None`; labeling them is the job of [`classify`].
pub fn countdown<E: CalendarDay, N: CalendarDay>(expiration: Option<E>, now: N) -> Countdown {
    let Some(expiration) = expiration else {
        return Countdown::None;
    };
    let days = days_until(&expiration, &now);
    if days < 0 {
        return Countdown::None;
    }
    if days == 0 {
        return Countdown::DueToday;
    }
    if days < COUNTDOWN_MONTH_DAYS {
        return Countdown::Days { days };
    }

    let months = days / COUNTDOWN_MONTH_DAYS;
    let remaining = days % COUNTDOWN_MONTH_DAYS;
    match (months > 0, remaining > 0) {
        (true, true) => Countdown::MonthsAndDays { months, days: remaining },
        (false, true) => Countdown::Days { days: remaining },
        _ => Countdown::Months { months },
    }
}

/// Calculator bound to a configured near threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpirationCalculator {
    pub near_threshold_days: i64,
}

impl Default for ExpirationCalculator {
    fn default() -> Self {
        Self {
            near_threshold_days: DEFAULT_NEAR_THRESHOLD_DAYS,
        }
    }
}

impl ExpirationCalculator {
    pub fn new(near_threshold_days: i64) -> Self {
        Self { near_threshold_days }
    }

    pub fn insurance_expiration<D: CalendarDay>(&self, paid_date: Option<D>) -> Option<NaiveDate> {
        compute_insurance_expiration(paid_date)
    }

    pub fn classify<E: CalendarDay, N: CalendarDay>(&self, expiration: Option<E>, now: N) -> ExpirationStatus {
        classify_with_threshold(expiration, now, self.near_threshold_days)
    }

    pub fn countdown<E: CalendarDay, N: CalendarDay>(&self, expiration: Option<E>, now: N) -> Countdown {
        countdown(expiration, now)
    }
}
