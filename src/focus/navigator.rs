use tracing::{debug, trace};

use crate::date::{DateDuration, DateValue};
use crate::grid::{CellRules, DayCell, DisplayState, Month, selectable_cells};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusDelta {
    Up,
    Down,
    Left,
    Right,
}

impl FocusDelta {
    pub fn offset(self) -> isize {
        match self {
            Self::Up => -7,
            Self::Down => 7,
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// Whether the previous/next page controls are currently disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageButtons {
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

/// How far a focus move ran past the edge of the old grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    /// Count back from the end of the new grid.
    Before(usize),
    /// Count forward from the start of the new grid.
    After(usize),
}

/// Second half of a cross-page focus move. The host applies the new display
/// state, commits the rebuilt grid, then calls [`PendingFocus::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingFocus {
    pub overflow: Overflow,
}

impl PendingFocus {
    pub fn resolve<D: DateValue>(&self, months: &[Month<D>], rules: &CellRules<D>) -> Option<DayCell<D>> {
        let cells = selectable_cells(months, rules);
        if cells.is_empty() {
            debug!("deferred focus dropped: new grid has no selectable cells");
            return None;
        }
        let index = match self.overflow {
            Overflow::Before(n) => cells.len().checked_sub(n),
            Overflow::After(n) => Some(n),
        };
        let cell = index.and_then(|i| cells.get(i)).cloned();
        if cell.is_none() {
            debug!(overflow = ?self.overflow, len = cells.len(), "deferred focus dropped: index outside new grid");
        }
        cell
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FocusResult<D> {
    /// Focus this cell now and move the placeholder to its date.
    FocusedNow(DayCell<D>),
    /// Re-render with `display`, then resolve `pending` against the new grid.
    DeferUntilNextGrid {
        display: DisplayState<D>,
        pending: PendingFocus,
    },
    Unchanged,
}

/// Move keyboard focus from `current` (an index into the selectable cells of
/// `months`) by `delta`, paging when the move leaves the grid.
pub fn shift_focus<D: DateValue>(
    current: usize,
    delta: FocusDelta,
    months: &[Month<D>],
    display: &DisplayState<D>,
    rules: &CellRules<D>,
    buttons: PageButtons,
) -> FocusResult<D> {
    let cells = selectable_cells(months, rules);
    let Some(first) = months.first() else {
        debug!("focus shift ignored: no months rendered");
        return FocusResult::Unchanged;
    };
    if cells.is_empty() {
        debug!("focus shift ignored: no selectable cells");
        return FocusResult::Unchanged;
    }

    let target = current as isize + delta.offset();
    let len = cells.len() as isize;
    let page = display.month_count() as i32;

    if (0..len).contains(&target) {
        let cell = cells[target as usize].clone();
        trace!(date = %cell.data_value(), "focus moved");
        return FocusResult::FocusedNow(cell);
    }

    if target < 0 {
        if buttons.prev_disabled {
            return FocusResult::Unchanged;
        }
        let anchor = first.value.subtract(DateDuration::months(page));
        trace!(anchor = %anchor.to_iso(), "focus crossed the top of the grid");
        return FocusResult::DeferUntilNextGrid {
            display: display.with_anchor(anchor),
            pending: PendingFocus {
                overflow: Overflow::Before(target.unsigned_abs()),
            },
        };
    }

    if buttons.next_disabled {
        return FocusResult::Unchanged;
    }
    let anchor = first.value.add(DateDuration::months(page));
    trace!(anchor = %anchor.to_iso(), "focus crossed the bottom of the grid");
    FocusResult::DeferUntilNextGrid {
        display: display.with_anchor(anchor),
        pending: PendingFocus {
            overflow: Overflow::After((target - len) as usize),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::DefaultFormatter;
    use crate::grid::build_months;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn display(anchor: NaiveDate) -> DisplayState<NaiveDate> {
        DisplayState::new(anchor).with_week_starts_on(0)
    }

    fn months(display: &DisplayState<NaiveDate>) -> Vec<Month<NaiveDate>> {
        build_months(display, &DefaultFormatter::default())
    }

    fn index_of(months: &[Month<NaiveDate>], rules: &CellRules<NaiveDate>, date: NaiveDate) -> usize {
        selectable_cells(months, rules)
            .iter()
            .position(|cell| cell.date == date)
            .expect("date is selectable")
    }

    #[test]
    fn moves_within_the_grid_synchronously() {
        let state = display(ymd(2024, 3, 1));
        let grid = months(&state);
        let rules = CellRules::new();
        let from = index_of(&grid, &rules, ymd(2024, 3, 13));

        let result = shift_focus(from, FocusDelta::Down, &grid, &state, &rules, PageButtons::default());
        let FocusResult::FocusedNow(cell) = result else {
            panic!("expected synchronous focus");
        };
        assert_eq!(cell.date, ymd(2024, 3, 20));

        let result = shift_focus(from, FocusDelta::Left, &grid, &state, &rules, PageButtons::default());
        assert!(matches!(result, FocusResult::FocusedNow(cell) if cell.date == ymd(2024, 3, 12)));
    }

    #[test]
    fn crossing_the_top_with_prev_disabled_is_a_no_op() {
        let state = display(ymd(2024, 3, 1));
        let grid = months(&state);
        let buttons = PageButtons {
            prev_disabled: true,
            next_disabled: false,
        };
        let result = shift_focus(2, FocusDelta::Up, &grid, &state, &CellRules::new(), buttons);
        assert_eq!(result, FocusResult::Unchanged);
    }

    #[test]
    fn crossing_the_top_defers_to_the_previous_page() {
        let state = display(ymd(2024, 3, 1));
        let grid = months(&state);
        let rules = CellRules::new();
        let from = index_of(&grid, &rules, ymd(2024, 3, 3));

        let result = shift_focus(from, FocusDelta::Up, &grid, &state, &rules, PageButtons::default());
        let FocusResult::DeferUntilNextGrid { display: next, pending } = result else {
            panic!("expected deferred focus");
        };
        assert_eq!(next.anchor, ymd(2024, 2, 1));
        assert_eq!(pending.overflow, Overflow::Before(5));

        // February 2024 has 29 selectable days; five back from the end is the 25th.
        let cell = pending.resolve(&months(&next), &rules).expect("cell in new grid");
        assert_eq!(cell.date, ymd(2024, 2, 25));
    }

    #[test]
    fn crossing_the_bottom_defers_to_the_next_page() {
        let state = display(ymd(2024, 3, 1)).with_number_of_months(2);
        let grid = months(&state);
        let rules = CellRules::new();
        let from = index_of(&grid, &rules, ymd(2024, 4, 30));

        let result = shift_focus(from, FocusDelta::Right, &grid, &state, &rules, PageButtons::default());
        let FocusResult::DeferUntilNextGrid { display: next, pending } = result else {
            panic!("expected deferred focus");
        };
        assert_eq!(next.anchor, ymd(2024, 5, 1));
        assert_eq!(pending.overflow, Overflow::After(0));
        let cell = pending.resolve(&months(&next), &rules).expect("cell in new grid");
        assert_eq!(cell.date, ymd(2024, 5, 1));
    }

    #[test]
    fn pending_focus_outside_the_new_grid_resolves_to_nothing() {
        let grid = months(&display(ymd(2024, 2, 1)));
        let pending = PendingFocus {
            overflow: Overflow::Before(40),
        };
        assert_eq!(pending.resolve(&grid, &CellRules::new()), None);
    }
}
