use chrono::{Datelike, NaiveDate};

mod week_data;

pub use week_data::first_day_of_week_for_locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekdayFormat {
    Narrow,
    #[default]
    Short,
    Long,
}

/// Locale-aware text the calendar needs for headings and weekday headers.
///
/// A formatter is bound to one locale for its whole life; hosts that switch
/// locale build a new one.
pub trait Formatter: Send + Sync {
    fn locale(&self) -> &str;

    fn day_of_week(&self, date: NaiveDate, format: WeekdayFormat) -> String;

    /// 0 = Sunday … 6 = Saturday.
    fn locale_first_day_of_week(&self, locale: &str) -> u8 {
        first_day_of_week_for_locale(locale)
    }

    fn full_month(&self, date: NaiveDate) -> String;

    fn full_year(&self, date: NaiveDate) -> String {
        date.year().to_string()
    }

    fn full_month_and_year(&self, date: NaiveDate) -> String {
        format!("{} {}", self.full_month(date), self.full_year(date))
    }
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAY_LONG: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// English names with locale-driven week data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultFormatter {
    locale: String,
}

impl DefaultFormatter {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }
}

impl Default for DefaultFormatter {
    fn default() -> Self {
        Self::new("en-US")
    }
}

impl Formatter for DefaultFormatter {
    fn locale(&self) -> &str {
        &self.locale
    }

    fn day_of_week(&self, date: NaiveDate, format: WeekdayFormat) -> String {
        let name = WEEKDAY_LONG[date.weekday().num_days_from_sunday() as usize];
        match format {
            WeekdayFormat::Narrow => name[..1].to_string(),
            WeekdayFormat::Short => name[..3].to_string(),
            WeekdayFormat::Long => name.to_string(),
        }
    }

    fn full_month(&self, date: NaiveDate) -> String {
        MONTH_NAMES[(date.month() as usize).saturating_sub(1) % 12].to_string()
    }
}
