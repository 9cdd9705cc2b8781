use tracing::trace;

use crate::date::{DateDuration, DateValue, days_between, end_of_month, start_of_month};
use crate::format::{Formatter, WeekdayFormat};

pub mod cell;

pub use cell::{CellRules, DateMatcher, DayCell, day_cells, selectable_cells};

const FIXED_GRID_DAYS: usize = 42;

// ── Display state ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekStart {
    /// Ask the formatter for the locale's first day of week.
    #[default]
    LocaleDefault,
    /// 0 = Sunday … 6 = Saturday.
    Day(u8),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState<D> {
    pub anchor: D,
    pub week_starts_on: WeekStart,
    pub fixed_weeks: bool,
    pub number_of_months: usize,
    pub paged_navigation: bool,
    pub locale: String,
}

impl<D: DateValue> DisplayState<D> {
    pub fn new(anchor: D) -> Self {
        Self {
            anchor,
            week_starts_on: WeekStart::LocaleDefault,
            fixed_weeks: false,
            number_of_months: 1,
            paged_navigation: false,
            locale: "en-US".to_string(),
        }
    }

    pub fn with_week_starts_on(mut self, day: u8) -> Self {
        self.week_starts_on = WeekStart::Day(day);
        self
    }

    pub fn with_fixed_weeks(mut self, fixed_weeks: bool) -> Self {
        self.fixed_weeks = fixed_weeks;
        self
    }

    pub fn with_number_of_months(mut self, number_of_months: usize) -> Self {
        self.number_of_months = number_of_months;
        self
    }

    pub fn with_paged_navigation(mut self, paged: bool) -> Self {
        self.paged_navigation = paged;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_anchor(&self, anchor: D) -> Self {
        Self {
            anchor,
            ..self.clone()
        }
    }

    /// Zero is treated as a single month.
    pub fn month_count(&self) -> usize {
        self.number_of_months.max(1)
    }

    pub fn resolved_week_start(&self, formatter: &dyn Formatter) -> u32 {
        match self.week_starts_on {
            WeekStart::Day(day) => u32::from(day) % 7,
            WeekStart::LocaleDefault => u32::from(formatter.locale_first_day_of_week(&self.locale)) % 7,
        }
    }
}

// ── Month ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Month<D> {
    /// First day of the month.
    pub value: D,
    pub dates: Vec<D>,
    pub weeks: Vec<Vec<D>>,
}

impl<D: DateValue> Month<D> {
    pub fn contains(&self, date: &D) -> bool {
        self.value.is_same_month(date)
    }
}

// ── Grid building ─────────────────────────────────────────────────────────────

pub fn build_months<D: DateValue>(display: &DisplayState<D>, formatter: &dyn Formatter) -> Vec<Month<D>> {
    let week_start = display.resolved_week_start(formatter);
    let months: Vec<Month<D>> = (0..display.month_count())
        .map(|offset| {
            let anchor = display.anchor.add(DateDuration::months(offset as i32));
            build_month(&anchor, week_start, display.fixed_weeks)
        })
        .collect();
    let anchor = display.anchor.to_iso();
    trace!(
        %anchor,
        months = months.len(),
        week_start,
        "built month grids"
    );
    months
}

pub fn build_month<D: DateValue>(anchor: &D, week_start: u32, fixed_weeks: bool) -> Month<D> {
    let first = start_of_month(anchor);
    let last = end_of_month(anchor);
    let in_month: Vec<D> = (0..i64::from(anchor.days_in_month()))
        .map(|i| first.add(DateDuration::days(i)))
        .collect();

    let week_first = first_day_of_week_on_or_before(&first, week_start);
    let week_last = last_day_of_week_on_or_after(&last, week_start);
    let leading = days_between(&week_first.subtract(DateDuration::days(1)), &first);
    let mut trailing = days_between(&last, &week_last.add(DateDuration::days(1)));

    let total = leading.len() + in_month.len() + trailing.len();
    if fixed_weeks && total < FIXED_GRID_DAYS {
        let extra = FIXED_GRID_DAYS - total;
        let (seed, count) = match trailing.last() {
            Some(seed) => (seed.clone(), extra),
            None => {
                let seed = anchor.add(DateDuration::months(1)).set_day(1);
                trailing.push(seed.clone());
                (seed, extra - 1)
            }
        };
        trailing.extend((1..=count as i64).map(|i| seed.add(DateDuration::days(i))));
    }

    let mut dates = leading;
    dates.extend(in_month);
    dates.extend(trailing);
    let weeks = dates.chunks(7).map(<[D]>::to_vec).collect();

    Month {
        value: first,
        dates,
        weeks,
    }
}

/// Week boundaries are plain day-count arithmetic on an absolute weekday
/// (0 = Sunday); the locale only matters when choosing `week_start`.
fn first_day_of_week_on_or_before<D: DateValue>(date: &D, week_start: u32) -> D {
    let back = (date.day_of_week() + 7 - week_start) % 7;
    date.subtract(DateDuration::days(i64::from(back)))
}

fn last_day_of_week_on_or_after<D: DateValue>(date: &D, week_start: u32) -> D {
    let week_end = (week_start + 6) % 7;
    let forward = (week_end + 7 - date.day_of_week()) % 7;
    date.add(DateDuration::days(i64::from(forward)))
}

// ── Labels ────────────────────────────────────────────────────────────────────

/// "January 1980", "January - February 1980" or "December 1980 - January 1981".
pub fn heading<D: DateValue>(months: &[Month<D>], formatter: &dyn Formatter) -> String {
    let (Some(first), Some(last)) = (months.first(), months.last()) else {
        return String::new();
    };
    let first = first.value.calendar_date();
    let last = last.value.calendar_date();
    if months.len() == 1 {
        return formatter.full_month_and_year(first);
    }
    if first.year() == last.year() {
        format!(
            "{} - {}",
            formatter.full_month(first),
            formatter.full_month_and_year(last)
        )
    } else {
        format!(
            "{} - {}",
            formatter.full_month_and_year(first),
            formatter.full_month_and_year(last)
        )
    }
}

/// Column headers, taken from the first week of the first month.
pub fn weekday_labels<D: DateValue>(
    months: &[Month<D>],
    formatter: &dyn Formatter,
    format: WeekdayFormat,
) -> Vec<String> {
    months
        .first()
        .and_then(|month| month.weeks.first())
        .map(|week| {
            week.iter()
                .map(|date| formatter.day_of_week(date.calendar_date(), format))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::DefaultFormatter;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn display(anchor: NaiveDate) -> DisplayState<NaiveDate> {
        DisplayState::new(anchor).with_week_starts_on(0)
    }

    #[test]
    fn january_1980_starts_on_the_preceding_sunday() {
        let formatter = DefaultFormatter::default();
        let months = build_months(&display(ymd(1980, 1, 20)), &formatter);
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].value, ymd(1980, 1, 1));
        assert_eq!(months[0].weeks[0][0], ymd(1979, 12, 30));
        assert_eq!(months[0].weeks[0][2], ymd(1980, 1, 1));
        assert_eq!(heading(&months, &formatter), "January 1980");
    }

    #[test]
    fn weeks_are_always_seven_days() {
        let formatter = DefaultFormatter::default();
        for week_start in 0..7u8 {
            for month in 1..=12 {
                let state = DisplayState::new(ymd(2023, month, 10)).with_week_starts_on(week_start);
                for grid in build_months(&state, &formatter) {
                    assert!(grid.weeks.iter().all(|week| week.len() == 7));
                    assert_eq!(grid.weeks.len() * 7, grid.dates.len());
                    assert_eq!(grid.weeks[0][0].day_of_week(), u32::from(week_start));
                }
            }
        }
    }

    #[test]
    fn fixed_weeks_always_render_six_rows() {
        let formatter = DefaultFormatter::default();
        for week_start in 0..7u8 {
            for year in [2015, 2020, 2024] {
                for month in 1..=12 {
                    let state = DisplayState::new(ymd(year, month, 1))
                        .with_week_starts_on(week_start)
                        .with_fixed_weeks(true);
                    let grid = &build_months(&state, &formatter)[0];
                    assert_eq!(grid.weeks.len(), 6, "{year}-{month} start {week_start}");
                    let consecutive = grid
                        .dates
                        .windows(2)
                        .all(|pair| crate::date::day_offset(&pair[0], &pair[1]) == 1);
                    assert!(consecutive);
                }
            }
        }
    }

    #[test]
    fn fixed_weeks_seed_next_month_when_trailing_pad_is_empty() {
        // February 2015 fills exactly four Sunday-first weeks.
        let formatter = DefaultFormatter::default();
        let state = display(ymd(2015, 2, 14)).with_fixed_weeks(true);
        let grid = &build_months(&state, &formatter)[0];
        assert_eq!(grid.dates[0], ymd(2015, 2, 1));
        assert_eq!(grid.dates[28], ymd(2015, 3, 1));
        assert_eq!(grid.dates[41], ymd(2015, 3, 14));
    }

    #[test]
    fn multiple_months_step_one_month_each() {
        let formatter = DefaultFormatter::default();
        let state = display(ymd(2023, 11, 30)).with_number_of_months(3);
        let months = build_months(&state, &formatter);
        let firsts: Vec<NaiveDate> = months.iter().map(|m| m.value).collect();
        assert_eq!(firsts, vec![ymd(2023, 11, 1), ymd(2023, 12, 1), ymd(2024, 1, 1)]);
        assert_eq!(heading(&months, &formatter), "November 2023 - January 2024");
        assert_eq!(heading(&months[..2], &formatter), "November - December 2023");
    }

    #[test]
    fn building_twice_is_identical() {
        let formatter = DefaultFormatter::default();
        let state = display(ymd(2024, 2, 29)).with_number_of_months(2).with_fixed_weeks(true);
        assert_eq!(build_months(&state, &formatter), build_months(&state, &formatter));
    }

    #[test]
    fn locale_default_week_start_comes_from_the_formatter() {
        let formatter = DefaultFormatter::new("de-DE");
        let state = DisplayState::new(ymd(2024, 5, 1)).with_locale("de-DE");
        let grid = &build_months(&state, &formatter)[0];
        assert_eq!(grid.weeks[0][0], ymd(2024, 4, 29));
        assert_eq!(
            weekday_labels(std::slice::from_ref(grid), &formatter, WeekdayFormat::Short),
            vec!["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
        );
    }

    #[test]
    fn padding_ignores_locale_once_week_start_is_explicit() {
        // An explicit start wins even when the locale would pick another day.
        let formatter = DefaultFormatter::new("en-US");
        let state = DisplayState::new(ymd(2024, 5, 1))
            .with_locale("en-US")
            .with_week_starts_on(1)
            .with_fixed_weeks(true);
        let grid = &build_months(&state, &formatter)[0];
        assert_eq!(grid.weeks[0][0], ymd(2024, 4, 29));
        assert_eq!(grid.dates.last().copied(), Some(ymd(2024, 6, 9)));
    }
}
