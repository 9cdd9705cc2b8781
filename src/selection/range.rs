use tracing::trace;

use crate::date::{DateDuration, DateValue, day_offset, preserve_time_of_day, span_in_days};
use crate::grid::CellRules;
use crate::selection::{Selection, SelectionRules};

/// `end` is only ever set alongside a `start` that does not come after it.
#[derive(Debug, Clone, PartialEq)]
pub struct DateRange<D> {
    pub start: Option<D>,
    pub end: Option<D>,
}

impl<D: DateValue> DateRange<D> {
    pub fn empty() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    fn anchored(start: D) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// Endpoints are swapped if given out of order.
    pub fn new(start: D, end: D) -> Self {
        let (start, end) = ordered(start, end);
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn contains(&self, date: &D) -> bool {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) => day_offset(start, date) >= 0 && day_offset(date, end) >= 0,
            (Some(start), None) => start.is_same_day(date),
            _ => false,
        }
    }
}

fn ordered<D: DateValue>(a: D, b: D) -> (D, D) {
    if day_offset(&a, &b) < 0 { (b, a) } else { (a, b) }
}

fn has_disabled_day<D: DateValue>(start: &D, end: &D, cells: &CellRules<D>) -> bool {
    (0..=day_offset(start, end)).any(|i| cells.is_disabled(&start.add(DateDuration::days(i))))
}

fn violates_span<D: DateValue>(start: &D, end: &D, rules: &SelectionRules) -> bool {
    let span = span_in_days(start, end) as usize;
    rules.max_days.is_some_and(|max| span > max) || rules.min_days.is_some_and(|min| span < min)
}

/// Returns the next range and whether this click completed it.
///
/// A second click that would span a disabled day (with `exclude_disabled`) or
/// break `min_days`/`max_days` restarts the range at the clicked date, as does
/// any click on an already complete range.
pub fn toggle<D: DateValue>(
    candidate: &D,
    current: &DateRange<D>,
    rules: &SelectionRules,
    cells: &CellRules<D>,
) -> (DateRange<D>, bool) {
    let restart = || DateRange::anchored(preserve_time_of_day(candidate, current.start.as_ref()));

    let (Some(start), None) = (&current.start, &current.end) else {
        return (restart(), false);
    };

    if start.is_same_day(candidate) && !rules.prevent_deselect {
        return (DateRange::empty(), false);
    }

    let picked = preserve_time_of_day(candidate, Some(start));
    let (lo, hi) = ordered(start.clone(), picked);

    if rules.exclude_disabled && has_disabled_day(&lo, &hi, cells) {
        trace!(start = %lo.to_iso(), end = %hi.to_iso(), "range spans a disabled day; restarting");
        return (restart(), false);
    }
    if violates_span(&lo, &hi, rules) {
        trace!(start = %lo.to_iso(), end = %hi.to_iso(), "range span out of bounds; restarting");
        return (restart(), false);
    }

    (DateRange::new(lo, hi), true)
}

/// Tentative range shown while hovering with only a start picked. Spans that
/// a click would reject are not highlighted.
pub fn highlighted_range<D: DateValue>(
    selection: &Selection<D>,
    hovered: &D,
    rules: &SelectionRules,
    cells: &CellRules<D>,
) -> Option<DateRange<D>> {
    let Selection::Range(range) = selection else {
        return None;
    };
    let (Some(start), None) = (&range.start, &range.end) else {
        return None;
    };
    if start.is_same_day(hovered) {
        return None;
    }
    let (lo, hi) = ordered(start.clone(), hovered.clone());
    if rules.exclude_disabled && has_disabled_day(&lo, &hi, cells) {
        return None;
    }
    if violates_span(&lo, &hi, rules) {
        return None;
    }
    Some(DateRange::new(lo, hi))
}
