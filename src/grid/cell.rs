use chrono::NaiveDate;
use std::fmt;

use crate::date::{DateValue, end_of_month};
use crate::grid::Month;

pub type DateMatcher<D> = Box<dyn Fn(&D) -> bool + Send + Sync>;

// ── Rules ─────────────────────────────────────────────────────────────────────

/// Host predicates plus the `[min_value, max_value]` window, combined into the
/// disabled/unavailable checks shared by the grid and the selection engine.
pub struct CellRules<D> {
    pub min_value: Option<NaiveDate>,
    pub max_value: Option<NaiveDate>,
    pub disable_days_outside_month: bool,
    is_date_disabled: Option<DateMatcher<D>>,
    is_date_unavailable: Option<DateMatcher<D>>,
}

impl<D: DateValue> CellRules<D> {
    pub fn new() -> Self {
        Self {
            min_value: None,
            max_value: None,
            disable_days_outside_month: true,
            is_date_disabled: None,
            is_date_unavailable: None,
        }
    }

    pub fn with_min_value(mut self, min: NaiveDate) -> Self {
        self.min_value = Some(min);
        self
    }

    pub fn with_max_value(mut self, max: NaiveDate) -> Self {
        self.max_value = Some(max);
        self
    }

    pub fn with_disabled(mut self, matcher: impl Fn(&D) -> bool + Send + Sync + 'static) -> Self {
        self.is_date_disabled = Some(Box::new(matcher));
        self
    }

    pub fn with_unavailable(mut self, matcher: impl Fn(&D) -> bool + Send + Sync + 'static) -> Self {
        self.is_date_unavailable = Some(Box::new(matcher));
        self
    }

    pub fn with_days_outside_month(mut self, disabled: bool) -> Self {
        self.disable_days_outside_month = disabled;
        self
    }

    pub fn is_outside_bounds(&self, date: &D) -> bool {
        let day = date.calendar_date();
        self.min_value.is_some_and(|min| day < min) || self.max_value.is_some_and(|max| day > max)
    }

    pub fn is_disabled(&self, date: &D) -> bool {
        self.is_date_disabled.as_ref().is_some_and(|matcher| matcher(date)) || self.is_outside_bounds(date)
    }

    pub fn is_unavailable(&self, date: &D) -> bool {
        self.is_date_unavailable
            .as_ref()
            .is_some_and(|matcher| matcher(date))
    }

    /// A date the selection engine may accept.
    pub fn accepts(&self, date: &D) -> bool {
        !self.is_disabled(date) && !self.is_unavailable(date)
    }
}

impl<D: DateValue> Default for CellRules<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> fmt::Debug for CellRules<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellRules")
            .field("min_value", &self.min_value)
            .field("max_value", &self.max_value)
            .field("disable_days_outside_month", &self.disable_days_outside_month)
            .field("is_date_disabled", &self.is_date_disabled.is_some())
            .field("is_date_unavailable", &self.is_date_unavailable.is_some())
            .finish()
    }
}

// ── Cells ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell<D> {
    pub date: D,
    /// Index of the month grid this cell was rendered in.
    pub month_index: usize,
    pub outside_month: bool,
    pub outside_visible_months: bool,
    pub disabled: bool,
    pub unavailable: bool,
}

impl<D: DateValue> DayCell<D> {
    /// Keyboard focus can land here.
    pub fn is_focusable(&self) -> bool {
        !self.disabled && !self.outside_visible_months
    }

    /// ISO value the rendering layer attaches to the cell.
    pub fn data_value(&self) -> String {
        self.date.to_iso()
    }
}

/// Every rendered cell, month by month in row-major order.
pub fn day_cells<D: DateValue>(months: &[Month<D>], rules: &CellRules<D>) -> Vec<DayCell<D>> {
    let (Some(first), Some(last)) = (months.first(), months.last()) else {
        return Vec::new();
    };
    let visible_start = first.value.calendar_date();
    let visible_end = end_of_month(&last.value).calendar_date();

    months
        .iter()
        .enumerate()
        .flat_map(|(month_index, month)| {
            month.dates.iter().map(move |date| {
                let day = date.calendar_date();
                let outside_month = !month.contains(date);
                DayCell {
                    date: date.clone(),
                    month_index,
                    outside_month,
                    outside_visible_months: day < visible_start || day > visible_end,
                    disabled: rules.is_disabled(date) || (outside_month && rules.disable_days_outside_month),
                    unavailable: rules.is_unavailable(date),
                }
            })
        })
        .collect()
}

/// Cells keyboard focus walks over, in render order.
pub fn selectable_cells<D: DateValue>(months: &[Month<D>], rules: &CellRules<D>) -> Vec<DayCell<D>> {
    day_cells(months, rules)
        .into_iter()
        .filter(DayCell::is_focusable)
        .collect()
}
