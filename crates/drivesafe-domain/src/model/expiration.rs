//! Expiration status and countdown values derived for display

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Obligations due within this many days are flagged as near
pub const DEFAULT_NEAR_THRESHOLD_DAYS: i64 = 30;

/// Categorical state of an obligation date relative to "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpirationStatus {
    Expired,
    Today,
    Near,
    Future,
    Unknown,
}

impl ExpirationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ExpirationStatus::Expired => "expired",
            ExpirationStatus::Today => "due today",
            ExpirationStatus::Near => "due soon",
            ExpirationStatus::Future => "ok",
            ExpirationStatus::Unknown => "not set",
        }
    }

    /// Expired, today, or within the near threshold
    pub fn needs_attention(&self) -> bool {
        matches!(
            self,
            ExpirationStatus::Expired | ExpirationStatus::Today | ExpirationStatus::Near
        )
    }
}

impl std::fmt::Display for ExpirationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Time remaining until an obligation date, split into display parts.
///
/// Months are 30-day blocks, not calendar months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Countdown {
    /// No date, or the date has already passed
    None,
    DueToday,
    Days { days: i64 },
    Months { months: i64 },
    MonthsAndDays { months: i64, days: i64 },
}

impl Countdown {
    pub fn is_empty(&self) -> bool {
        matches!(self, Countdown::None)
    }

    pub fn months(&self) -> Option<i64> {
        match self {
            Countdown::Months { months } | Countdown::MonthsAndDays { months, .. } => Some(*months),
            _ => None,
        }
    }

    pub fn days(&self) -> Option<i64> {
        match self {
            Countdown::Days { days } | Countdown::MonthsAndDays { days, .. } => Some(*days),
            _ => None,
        }
    }
}

/// Anything that can be normalized to the start of a calendar day
pub trait CalendarDay {
    fn calendar_day(&self) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDay for NaiveDateTime {
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

/// Normalized in the instant's own time zone
impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    fn calendar_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

impl<T: CalendarDay + ?Sized> CalendarDay for &T {
    fn calendar_day(&self) -> NaiveDate {
        (**self).calendar_day()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_calendar_day_ignores_time_of_day() {
        let late = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(23, 30, 0)
            .unwrap();
        assert_eq!(late.calendar_day(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test]
    fn test_calendar_day_uses_instant_time_zone() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        // 23:30 UTC on Apr 30 is already May 1 at +02:00
        let instant = tz.with_ymd_and_hms(2024, 5, 1, 1, 30, 0).unwrap();
        assert_eq!(instant.calendar_day(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test]
    fn test_countdown_accessors() {
        let c = Countdown::MonthsAndDays { months: 1, days: 5 };
        assert_eq!(c.months(), Some(1));
        assert_eq!(c.days(), Some(5));
        assert!(!c.is_empty());
        assert_eq!(Countdown::Months { months: 2 }.days(), None);
        assert!(Countdown::None.is_empty());
    }

    #[test]
    fn test_status_serializes_upper_case() {
        let json = serde_json::to_string(&ExpirationStatus::Near).unwrap();
        assert_eq!(json, "\"NEAR\"");
    }
}
