use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use std::cmp::Ordering;

use super::{DateValue, TimeOfDay, relocate};

/// A date of any supported kind, for hosts that mix plain dates, local
/// date-times and zoned date-times behind one placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyDate {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Zoned(DateTime<FixedOffset>),
}

impl AnyDate {
    fn wall_clock(&self) -> NaiveDateTime {
        match self {
            Self::Date(date) => date.and_time(NaiveTime::MIN),
            Self::DateTime(value) => *value,
            Self::Zoned(value) => value.naive_local(),
        }
    }
}

impl From<NaiveDate> for AnyDate {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for AnyDate {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<DateTime<FixedOffset>> for AnyDate {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::Zoned(value)
    }
}

impl DateValue for AnyDate {
    fn calendar_date(&self) -> NaiveDate {
        match self {
            Self::Date(date) => *date,
            Self::DateTime(value) => value.date(),
            Self::Zoned(value) => value.date_naive(),
        }
    }

    fn with_calendar_date(&self, date: NaiveDate) -> Self {
        match self {
            Self::Date(_) => Self::Date(date),
            Self::DateTime(value) => Self::DateTime(date.and_time(value.time())),
            Self::Zoned(value) => Self::Zoned(relocate(value, date.and_time(value.time()))),
        }
    }

    fn time_of_day(&self) -> Option<TimeOfDay> {
        match self {
            Self::Date(_) => None,
            Self::DateTime(value) => Some(TimeOfDay::from_naive(value.time())),
            Self::Zoned(value) => Some(TimeOfDay::from_naive(value.time())),
        }
    }

    fn with_time_of_day(&self, time: TimeOfDay) -> Self {
        match self {
            Self::Date(_) => *self,
            Self::DateTime(value) => Self::DateTime(value.date().and_time(time.to_naive())),
            Self::Zoned(value) => Self::Zoned(relocate(
                value,
                value.date_naive().and_time(time.to_naive()),
            )),
        }
    }

    /// Zoned values compare as instants among themselves; mixed kinds compare
    /// by wall clock, with a plain date sitting at midnight.
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Zoned(a), Self::Zoned(b)) => a.cmp(b),
            _ => self.wall_clock().cmp(&other.wall_clock()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::{DateDuration, preserve_time_of_day};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn plain_dates_do_not_support_time() {
        let plain = AnyDate::from(ymd(2024, 6, 1));
        assert!(!plain.supports_time_of_day());
        assert_eq!(plain.with_time_of_day(TimeOfDay::new(9, 0, 0, 0)), plain);
    }

    #[test]
    fn picked_date_time_inherits_previous_clock() {
        let previous = AnyDate::from(ymd(2024, 6, 1).and_hms_opt(9, 30, 0).expect("valid"));
        let picked = AnyDate::from(ymd(2024, 6, 12).and_hms_opt(0, 0, 0).expect("valid"));
        let merged = preserve_time_of_day(&picked, Some(&previous));
        assert_eq!(merged.calendar_date(), ymd(2024, 6, 12));
        assert_eq!(merged.time_of_day(), Some(TimeOfDay::new(9, 30, 0, 0)));
    }

    #[test]
    fn arithmetic_keeps_the_variant() {
        let zone = FixedOffset::west_opt(5 * 3600).expect("valid offset");
        let zoned = AnyDate::from(
            ymd(2024, 1, 31)
                .and_hms_opt(18, 0, 0)
                .expect("valid")
                .and_local_timezone(zone)
                .single()
                .expect("unambiguous"),
        );
        let moved = zoned.add(DateDuration::months(1));
        assert!(matches!(moved, AnyDate::Zoned(_)));
        assert_eq!(moved.calendar_date(), ymd(2024, 2, 29));
    }

    #[test]
    fn mixed_kinds_compare_by_wall_clock() {
        let plain = AnyDate::from(ymd(2024, 6, 1));
        let later = AnyDate::from(ymd(2024, 6, 1).and_hms_opt(0, 0, 1).expect("valid"));
        assert!(plain.is_before(&later));
        assert!(plain.is_same_day(&later));
    }
}
