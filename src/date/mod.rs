use chrono::{DateTime, Datelike, Days, Local, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

use crate::error::{CalendarError, CalendarResult};

mod any;

pub use any::AnyDate;

// ── Time of day ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32, second: u32, millisecond: u32) -> Self {
        Self {
            hour,
            minute,
            second,
            millisecond,
        }
    }

    pub fn from_naive(time: NaiveTime) -> Self {
        Self {
            hour: time.hour(),
            minute: time.minute(),
            second: time.second(),
            millisecond: time.nanosecond() / 1_000_000,
        }
    }

    /// Out-of-range fields collapse to midnight.
    pub fn to_naive(self) -> NaiveTime {
        NaiveTime::from_hms_milli_opt(self.hour, self.minute, self.second, self.millisecond)
            .unwrap_or(NaiveTime::MIN)
    }

    pub fn to_iso(self) -> String {
        format!("{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

// ── Durations ─────────────────────────────────────────────────────────────────

/// Calendar duration applied years first, then months (day clamped to the
/// target month), then days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateDuration {
    pub years: i32,
    pub months: i32,
    pub days: i64,
}

impl DateDuration {
    pub fn days(days: i64) -> Self {
        Self {
            days,
            ..Self::default()
        }
    }

    pub fn months(months: i32) -> Self {
        Self {
            months,
            ..Self::default()
        }
    }

    pub fn years(years: i32) -> Self {
        Self {
            years,
            ..Self::default()
        }
    }

    pub fn negate(self) -> Self {
        Self {
            years: -self.years,
            months: -self.months,
            days: -self.days,
        }
    }
}

// ── DateValue ─────────────────────────────────────────────────────────────────

/// Capability set shared by every date kind the calendar can display.
///
/// Implementors only describe how to read and replace their calendar day and
/// time of day; arithmetic is derived from those and always works on whole
/// calendar days, so a zoned value moves by local days rather than by
/// 24-hour spans.
pub trait DateValue: Clone + fmt::Debug + PartialEq {
    fn calendar_date(&self) -> NaiveDate;

    /// Replace the calendar day, keeping time of day and zone.
    fn with_calendar_date(&self, date: NaiveDate) -> Self;

    fn time_of_day(&self) -> Option<TimeOfDay>;

    fn with_time_of_day(&self, time: TimeOfDay) -> Self;

    fn compare(&self, other: &Self) -> Ordering;

    fn supports_time_of_day(&self) -> bool {
        self.time_of_day().is_some()
    }

    fn year(&self) -> i32 {
        parts(self.calendar_date()).0
    }

    fn month(&self) -> u32 {
        parts(self.calendar_date()).1
    }

    fn day(&self) -> u32 {
        parts(self.calendar_date()).2
    }

    /// 0 = Sunday … 6 = Saturday.
    fn day_of_week(&self) -> u32 {
        self.calendar_date().weekday().num_days_from_sunday()
    }

    fn days_in_month(&self) -> u32 {
        let (year, month, _) = parts(self.calendar_date());
        days_in_month(year, month)
    }

    fn add(&self, duration: DateDuration) -> Self {
        self.with_calendar_date(shift_date(self.calendar_date(), duration))
    }

    fn subtract(&self, duration: DateDuration) -> Self {
        self.add(duration.negate())
    }

    /// Day is constrained to the month, so `set_day(35)` lands on the last day.
    fn set_day(&self, day: u32) -> Self {
        let date = self.calendar_date();
        let (year, month, _) = parts(date);
        self.with_calendar_date(constrained(year, month, day).unwrap_or(date))
    }

    fn set_month(&self, month: u32) -> Self {
        let date = self.calendar_date();
        let (year, _, day) = parts(date);
        self.with_calendar_date(constrained(year, month.clamp(1, 12), day).unwrap_or(date))
    }

    fn set_year(&self, year: i32) -> Self {
        let date = self.calendar_date();
        let (_, month, day) = parts(date);
        self.with_calendar_date(constrained(year, month, day).unwrap_or(date))
    }

    fn is_same_day(&self, other: &Self) -> bool {
        self.calendar_date() == other.calendar_date()
    }

    fn is_same_month(&self, other: &Self) -> bool {
        let (a, b) = (parts(self.calendar_date()), parts(other.calendar_date()));
        a.0 == b.0 && a.1 == b.1
    }

    fn is_before(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Less
    }

    fn is_after(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Greater
    }

    fn to_iso(&self) -> String {
        self.calendar_date().format("%Y-%m-%d").to_string()
    }
}

impl DateValue for NaiveDate {
    fn calendar_date(&self) -> NaiveDate {
        *self
    }

    fn with_calendar_date(&self, date: NaiveDate) -> Self {
        date
    }

    fn time_of_day(&self) -> Option<TimeOfDay> {
        None
    }

    fn with_time_of_day(&self, _time: TimeOfDay) -> Self {
        *self
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl DateValue for NaiveDateTime {
    fn calendar_date(&self) -> NaiveDate {
        self.date()
    }

    fn with_calendar_date(&self, date: NaiveDate) -> Self {
        date.and_time(self.time())
    }

    fn time_of_day(&self) -> Option<TimeOfDay> {
        Some(TimeOfDay::from_naive(self.time()))
    }

    fn with_time_of_day(&self, time: TimeOfDay) -> Self {
        self.date().and_time(time.to_naive())
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl<Tz: TimeZone> DateValue for DateTime<Tz> {
    fn calendar_date(&self) -> NaiveDate {
        self.date_naive()
    }

    fn with_calendar_date(&self, date: NaiveDate) -> Self {
        relocate(self, date.and_time(self.time()))
    }

    fn time_of_day(&self) -> Option<TimeOfDay> {
        Some(TimeOfDay::from_naive(self.time()))
    }

    fn with_time_of_day(&self, time: TimeOfDay) -> Self {
        relocate(self, self.date_naive().and_time(time.to_naive()))
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

/// Map a wall-clock time back into the zone. Local times skipped by a
/// transition fall back to shifting the instant by the wall-clock delta.
fn relocate<Tz: TimeZone>(value: &DateTime<Tz>, local: NaiveDateTime) -> DateTime<Tz> {
    if let Some(mapped) = value.timezone().from_local_datetime(&local).earliest() {
        return mapped;
    }
    let delta = local.signed_duration_since(value.naive_local());
    value.clone().checked_add_signed(delta).unwrap_or_else(|| {
        debug!(?local, "zoned date could not be relocated; keeping previous value");
        value.clone()
    })
}

// ── Calendar helpers ──────────────────────────────────────────────────────────

/// Zero for a month outside 1..=12.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.and_then(|first| first.pred_opt())
        .map_or(0, |last| Datelike::day(&last))
}

fn parts(date: NaiveDate) -> (i32, u32, u32) {
    (Datelike::year(&date), Datelike::month(&date), Datelike::day(&date))
}

fn constrained(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let last = days_in_month(year, month);
    if last == 0 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day.clamp(1, last))
}

fn shift_date(date: NaiveDate, duration: DateDuration) -> NaiveDate {
    let total_months = i64::from(duration.years) * 12 + i64::from(duration.months);
    let months = u32::try_from(total_months.unsigned_abs()).ok().map(Months::new);
    let shifted = match months {
        Some(months) if total_months >= 0 => date.checked_add_months(months),
        Some(months) => date.checked_sub_months(months),
        None => None,
    };
    let shifted = shifted.and_then(|d| {
        let days = Days::new(duration.days.unsigned_abs());
        if duration.days >= 0 {
            d.checked_add_days(days)
        } else {
            d.checked_sub_days(days)
        }
    });
    shifted.unwrap_or_else(|| {
        debug!(%date, ?duration, "date arithmetic overflowed; keeping previous date");
        date
    })
}

pub fn start_of_month<D: DateValue>(date: &D) -> D {
    date.set_day(1)
}

pub fn end_of_month<D: DateValue>(date: &D) -> D {
    date.set_day(date.days_in_month())
}

/// Signed number of calendar days from `start` to `end`.
pub fn day_offset<D: DateValue>(start: &D, end: &D) -> i64 {
    end.calendar_date()
        .signed_duration_since(start.calendar_date())
        .num_days()
}

/// Dates strictly between `start` and `end`.
pub fn days_between<D: DateValue>(start: &D, end: &D) -> Vec<D> {
    let span = day_offset(start, end);
    (1..span).map(|i| start.add(DateDuration::days(i))).collect()
}

/// Number of calendar days covered by `a..=b`, in either order.
pub fn span_in_days<D: DateValue>(a: &D, b: &D) -> i64 {
    day_offset(a, b).abs() + 1
}

/// Carry the previous value's time of day onto a newly picked date.
pub fn preserve_time_of_day<D: DateValue>(picked: &D, previous: Option<&D>) -> D {
    match previous.and_then(|value| value.time_of_day()) {
        Some(time) if picked.supports_time_of_day() => picked.with_time_of_day(time),
        _ => picked.clone(),
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_iso_date(text: &str) -> CalendarResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| CalendarError::InvalidDate(text.to_string()))
}
