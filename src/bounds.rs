use chrono::NaiveDate;
use tracing::debug;

use crate::date::{DateDuration, DateValue};
use crate::grid::Month;

const YEARS_BACK: i32 = 100;
const YEARS_FORWARD: i32 = 10;
const EXTRA_YEARS_BACK: i32 = 10;

// ── Paging buttons ────────────────────────────────────────────────────────────

/// Probes the last day of the month before the first visible one; the day is
/// constrained, so `set_day(35)` reads as "end of that month".
pub fn is_prev_disabled<D: DateValue>(months: &[Month<D>], min_value: Option<NaiveDate>, disabled: bool) -> bool {
    if disabled {
        return true;
    }
    let Some(min) = min_value else {
        return false;
    };
    let Some(first) = months.first() else {
        debug!("prev-page check skipped: no months rendered");
        return false;
    };
    let edge = first.value.subtract(DateDuration::months(1)).set_day(35);
    edge.calendar_date() < min
}

pub fn is_next_disabled<D: DateValue>(months: &[Month<D>], max_value: Option<NaiveDate>, disabled: bool) -> bool {
    if disabled {
        return true;
    }
    let Some(max) = max_value else {
        return false;
    };
    let Some(last) = months.last() else {
        debug!("next-page check skipped: no months rendered");
        return false;
    };
    let edge = last.value.add(DateDuration::months(1)).set_day(1);
    edge.calendar_date() > max
}

// ── Jump-to pools ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearPoolOptions {
    pub placeholder_year: i32,
    pub current_year: i32,
    pub min_value: Option<NaiveDate>,
    pub max_value: Option<NaiveDate>,
}

/// A supplied bound replaces the default window on its side only.
pub fn compute_year_pool(options: &YearPoolOptions) -> Vec<i32> {
    let latest = options.placeholder_year.max(options.current_year);
    let min_year = match options.min_value {
        Some(min) => min.year(),
        None => {
            let default_min = latest - YEARS_BACK;
            if options.placeholder_year < default_min {
                options.placeholder_year - EXTRA_YEARS_BACK
            } else {
                default_min
            }
        }
    };
    let max_year = options
        .max_value
        .map(|max| max.year())
        .unwrap_or(latest + YEARS_FORWARD);
    (min_year..=max_year).collect()
}

/// Months of `year` that overlap `[min_value, max_value]`, numbered 1..=12.
pub fn compute_month_pool(year: i32, min_value: Option<NaiveDate>, max_value: Option<NaiveDate>) -> Vec<u32> {
    (1..=12u32)
        .filter(|&month| {
            let after_min = min_value.is_none_or(|min| (year, month) >= (min.year(), min.month()));
            let before_max = max_value.is_none_or(|max| (year, month) <= (max.year(), max.month()));
            after_min && before_max
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::DefaultFormatter;
    use crate::grid::{DisplayState, build_months};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn months(anchor: NaiveDate, count: usize) -> Vec<Month<NaiveDate>> {
        let state = DisplayState::new(anchor)
            .with_week_starts_on(0)
            .with_number_of_months(count);
        build_months(&state, &DefaultFormatter::default())
    }

    #[test]
    fn prev_is_disabled_only_when_the_previous_month_ends_before_min() {
        let grid = months(ymd(2024, 3, 10), 1);
        assert!(!is_prev_disabled(&grid, Some(ymd(2024, 2, 29)), false));
        assert!(is_prev_disabled(&grid, Some(ymd(2024, 3, 1)), false));
        assert!(!is_prev_disabled(&grid, None, false));
        assert!(is_prev_disabled(&grid, None, true));
    }

    #[test]
    fn next_uses_the_last_visible_month() {
        let grid = months(ymd(2024, 3, 10), 2);
        assert!(!is_next_disabled(&grid, Some(ymd(2024, 5, 1)), false));
        assert!(is_next_disabled(&grid, Some(ymd(2024, 4, 30)), false));
    }

    #[test]
    fn empty_grid_never_disables_paging() {
        assert!(!is_prev_disabled::<NaiveDate>(&[], Some(ymd(2024, 1, 1)), false));
        assert!(!is_next_disabled::<NaiveDate>(&[], Some(ymd(2024, 1, 1)), false));
    }

    #[test]
    fn default_year_pool_spans_a_century_back_and_a_decade_forward() {
        let pool = compute_year_pool(&YearPoolOptions {
            placeholder_year: 2020,
            current_year: 2026,
            min_value: None,
            max_value: None,
        });
        assert_eq!(pool.first().copied(), Some(1926));
        assert_eq!(pool.last().copied(), Some(2036));
    }

    #[test]
    fn old_placeholder_expands_the_pool_downward() {
        let pool = compute_year_pool(&YearPoolOptions {
            placeholder_year: 1900,
            current_year: 2026,
            min_value: None,
            max_value: None,
        });
        assert_eq!(pool.first().copied(), Some(1890));
        assert_eq!(pool.last().copied(), Some(2036));
    }

    #[test]
    fn bounds_override_one_side_each() {
        let pool = compute_year_pool(&YearPoolOptions {
            placeholder_year: 2024,
            current_year: 2024,
            min_value: Some(ymd(2020, 6, 1)),
            max_value: None,
        });
        assert_eq!(pool.first().copied(), Some(2020));
        assert_eq!(pool.last().copied(), Some(2034));
    }

    #[test]
    fn month_pool_trims_to_bounds() {
        assert_eq!(compute_month_pool(2024, None, None).len(), 12);
        assert_eq!(
            compute_month_pool(2024, Some(ymd(2024, 10, 20)), None),
            vec![10, 11, 12]
        );
        assert_eq!(
            compute_month_pool(2024, Some(ymd(2023, 1, 1)), Some(ymd(2024, 2, 1))),
            vec![1, 2]
        );
        assert!(compute_month_pool(2025, None, Some(ymd(2024, 12, 31))).is_empty());
    }
}
