use chrono::NaiveDate;

use crate::date::DateValue;
use crate::grid::{CellRules, DayCell, Month, selectable_cells};
use crate::selection::Selection;

mod navigator;

pub use navigator::{FocusDelta, FocusResult, Overflow, PageButtons, PendingFocus, shift_focus};

/// Focusable cells of the current grid and which one holds focus.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusState<D> {
    cells: Vec<DayCell<D>>,
    index: Option<usize>,
}

impl<D: DateValue> Default for FocusState<D> {
    fn default() -> Self {
        Self {
            cells: Vec::new(),
            index: None,
        }
    }
}

impl<D: DateValue> FocusState<D> {
    pub fn from_months(months: &[Month<D>], rules: &CellRules<D>) -> Self {
        let mut state = Self::default();
        state.rebuild(months, rules);
        state
    }

    /// Re-collect cells after the grid changed. Focus stays on the same cell
    /// when that grid still renders it, else on the same day.
    pub fn rebuild(&mut self, months: &[Month<D>], rules: &CellRules<D>) {
        let previous = self.current().cloned();
        self.cells = selectable_cells(months, rules);
        self.index = previous.and_then(|cell| {
            self.position_of_cell(&cell)
                .or_else(|| self.position_of(&cell.date))
        });
    }

    pub fn cells(&self) -> &[DayCell<D>] {
        &self.cells
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn current(&self) -> Option<&DayCell<D>> {
        self.index.and_then(|i| self.cells.get(i))
    }

    pub fn focused_date(&self) -> Option<&D> {
        self.current().map(|cell| &cell.date)
    }

    /// A day can be rendered twice when padding is focusable; the copy inside
    /// its own month wins.
    pub fn position_of(&self, date: &D) -> Option<usize> {
        first_match(&self.cells, |cell| cell.date.is_same_day(date))
    }

    pub fn position_of_cell(&self, cell: &DayCell<D>) -> Option<usize> {
        self.cells
            .iter()
            .position(|c| c.month_index == cell.month_index && c.date.is_same_day(&cell.date))
    }

    /// Returns false, leaving focus unchanged, when the day is not focusable.
    pub fn set_focus_by_date(&mut self, date: &D) -> bool {
        self.focus_at(self.position_of(date))
    }

    /// Focus the exact cell a navigation step picked.
    pub fn set_focus_to_cell(&mut self, cell: &DayCell<D>) -> bool {
        self.focus_at(self.position_of_cell(cell))
    }

    fn focus_at(&mut self, index: Option<usize>) -> bool {
        match index {
            Some(index) => {
                self.index = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.index = None;
    }

    pub fn focus_initial(&mut self, selection: &Selection<D>, today: NaiveDate) {
        self.index = initial_index(&self.cells, selection, today);
    }
}

fn first_match<D: DateValue>(cells: &[DayCell<D>], matches: impl Fn(&DayCell<D>) -> bool) -> Option<usize> {
    cells
        .iter()
        .position(|cell| !cell.outside_month && matches(cell))
        .or_else(|| cells.iter().position(|cell| matches(cell)))
}

fn initial_index<D: DateValue>(cells: &[DayCell<D>], selection: &Selection<D>, today: NaiveDate) -> Option<usize> {
    let selected = first_match(cells, |cell| selection.is_selected(&cell.date));
    let today = first_match(cells, |cell| cell.date.calendar_date() == today);
    let first = (!cells.is_empty()).then_some(0);
    selected.or(today).or(first)
}

/// Selected day in view, else today, else the first focusable cell.
pub fn initial_focus<D: DateValue>(
    months: &[Month<D>],
    rules: &CellRules<D>,
    selection: &Selection<D>,
    today: NaiveDate,
) -> Option<DayCell<D>> {
    let cells = selectable_cells(months, rules);
    initial_index(&cells, selection, today).map(|i| cells[i].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::DefaultFormatter;
    use crate::grid::{DisplayState, build_months};
    use crate::selection::SelectionMode;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn march() -> Vec<Month<NaiveDate>> {
        let state = DisplayState::new(ymd(2024, 3, 1)).with_week_starts_on(0);
        build_months(&state, &DefaultFormatter::default())
    }

    #[test]
    fn initial_focus_prefers_selection_then_today() {
        let rules = CellRules::new();
        let mut focus = FocusState::from_months(&march(), &rules);

        focus.focus_initial(&Selection::Single(Some(ymd(2024, 3, 20))), ymd(2024, 3, 4));
        assert_eq!(focus.focused_date(), Some(&ymd(2024, 3, 20)));

        focus.focus_initial(&Selection::empty(SelectionMode::Single), ymd(2024, 3, 4));
        assert_eq!(focus.focused_date(), Some(&ymd(2024, 3, 4)));

        focus.focus_initial(&Selection::empty(SelectionMode::Single), ymd(2025, 1, 1));
        assert_eq!(focus.focused_date(), Some(&ymd(2024, 3, 1)));
    }

    #[test]
    fn initial_focus_skips_disabled_today() {
        let rules = CellRules::new().with_disabled(|d: &NaiveDate| d.day() < 10);
        let mut focus = FocusState::from_months(&march(), &rules);
        focus.focus_initial(&Selection::empty(SelectionMode::Range), ymd(2024, 3, 4));
        assert_eq!(focus.focused_date(), Some(&ymd(2024, 3, 10)));
    }

    #[test]
    fn no_focusable_cells_means_no_focus() {
        let rules = CellRules::new().with_disabled(|_: &NaiveDate| true);
        let mut focus = FocusState::from_months(&march(), &rules);
        focus.focus_initial(&Selection::empty(SelectionMode::Single), ymd(2024, 3, 4));
        assert_eq!(focus.current(), None);
        assert_eq!(
            initial_focus(&march(), &rules, &Selection::empty(SelectionMode::Single), ymd(2024, 3, 4)),
            None
        );
    }

    #[test]
    fn rebuild_keeps_focus_on_the_same_day() {
        let rules = CellRules::new();
        let mut focus = FocusState::from_months(&march(), &rules);
        assert!(focus.set_focus_by_date(&ymd(2024, 3, 31)));
        let state = DisplayState::new(ymd(2024, 3, 1))
            .with_week_starts_on(0)
            .with_number_of_months(2);
        focus.rebuild(&build_months(&state, &DefaultFormatter::default()), &rules);
        assert_eq!(focus.focused_date(), Some(&ymd(2024, 3, 31)));
        assert!(!focus.set_focus_by_date(&ymd(2024, 6, 1)));
    }

    #[test]
    fn duplicated_padding_days_keep_their_own_cell() {
        let rules = CellRules::new().with_days_outside_month(false);
        let state = DisplayState::new(ymd(2024, 3, 1))
            .with_week_starts_on(0)
            .with_number_of_months(2);
        let months = build_months(&state, &DefaultFormatter::default());
        let mut focus = FocusState::from_months(&months, &rules);

        // April 1 is rendered as March's trailing padding and inside April.
        assert!(focus.set_focus_by_date(&ymd(2024, 4, 1)));
        let in_month = focus.current().cloned().expect("focused");
        assert_eq!(in_month.month_index, 1);
        assert!(!in_month.outside_month);

        let padded = focus
            .cells()
            .iter()
            .find(|cell| cell.date == ymd(2024, 4, 1) && cell.outside_month)
            .cloned()
            .expect("padding cell");
        assert!(focus.set_focus_to_cell(&padded));
        assert_eq!(focus.current(), Some(&padded));

        focus.rebuild(&months, &rules);
        assert_eq!(focus.current(), Some(&padded));
    }
}
