use chrono::NaiveDate;
use crossterm::event::KeyEvent;
use tracing::{debug, trace};

use crate::bounds::{self, YearPoolOptions};
use crate::date::DateValue;
use crate::focus::{FocusDelta, FocusResult, FocusState, PageButtons, PendingFocus, shift_focus};
use crate::format::{DefaultFormatter, Formatter, WeekdayFormat};
use crate::grid::{self, CellRules, DayCell, DisplayState, Month, build_months, day_cells};
use crate::keys::{CalendarCommand, KeyBindings};
use crate::paging::{self, PageDirection};
use crate::selection::{DateRange, Selection, SelectionMode, SelectionRules, highlighted_range, toggle_selection};

// ── Outcome ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum CalendarEffect<D> {
    ValueChanged(Selection<D>),
    PlaceholderChanged(D),
    /// Keyboard focus landed on this day of the current grid.
    FocusCell(D),
    /// The grid was re-anchored and a focus move is waiting on it; call
    /// [`Calendar::on_grid_committed`] once the new grid is on screen.
    DeferFocus,
    /// A range was completed and the host asked to close on range select.
    CloseRequested,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarOutcome<D> {
    pub handled: bool,
    /// The key must not fall through to the host's default handling.
    pub prevent_default: bool,
    pub effects: Vec<CalendarEffect<D>>,
}

impl<D> Default for CalendarOutcome<D> {
    fn default() -> Self {
        Self {
            handled: false,
            prevent_default: false,
            effects: Vec::new(),
        }
    }
}

impl<D> CalendarOutcome<D> {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            prevent_default: true,
            effects: Vec::new(),
        }
    }

    pub fn push(&mut self, effect: CalendarEffect<D>) {
        self.effects.push(effect);
    }

    pub fn merge(&mut self, other: Self) {
        self.handled |= other.handled;
        self.prevent_default |= other.prevent_default;
        self.effects.extend(other.effects);
    }
}

// ── Calendar ──────────────────────────────────────────────────────────────────

/// Owns display, selection and focus state and turns key presses and clicks
/// into whole-state transitions reported as [`CalendarEffect`]s.
pub struct Calendar<D: DateValue> {
    display: DisplayState<D>,
    months: Vec<Month<D>>,
    placeholder: D,

    selection: Selection<D>,
    selection_rules: SelectionRules,
    cell_rules: CellRules<D>,

    focus: FocusState<D>,
    pending_focus: Option<PendingFocus>,

    today: NaiveDate,
    formatter: Box<dyn Formatter>,
    key_bindings: KeyBindings,

    disabled: bool,
    readonly: bool,
    close_on_range_select: bool,
}

impl<D: DateValue> Calendar<D> {
    pub fn new(placeholder: D, today: NaiveDate) -> Self {
        let mut calendar = Self {
            display: DisplayState::new(placeholder.clone()),
            months: Vec::new(),
            placeholder,
            selection: Selection::empty(SelectionMode::Single),
            selection_rules: SelectionRules::default(),
            cell_rules: CellRules::new(),
            focus: FocusState::default(),
            pending_focus: None,
            today,
            formatter: Box::new(DefaultFormatter::default()),
            key_bindings: KeyBindings::new(),
            disabled: false,
            readonly: false,
            close_on_range_select: false,
        };
        calendar.rebuild();
        calendar
    }

    /// The anchor is taken from the current placeholder.
    pub fn with_display(mut self, display: DisplayState<D>) -> Self {
        self.display = display.with_anchor(self.placeholder.clone());
        self.rebuild();
        self
    }

    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection = Selection::empty(mode);
        self.refocus();
        self
    }

    pub fn with_selection(mut self, selection: Selection<D>) -> Self {
        self.selection = selection;
        self.refocus();
        self
    }

    pub fn with_selection_rules(mut self, rules: SelectionRules) -> Self {
        self.selection_rules = rules;
        self
    }

    pub fn with_cell_rules(mut self, rules: CellRules<D>) -> Self {
        self.cell_rules = rules;
        self.refocus();
        self
    }

    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self.rebuild();
        self
    }

    pub fn with_key_bindings(mut self, bindings: KeyBindings) -> Self {
        self.key_bindings = bindings;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    pub fn with_close_on_range_select(mut self, close: bool) -> Self {
        self.close_on_range_select = close;
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn display(&self) -> &DisplayState<D> {
        &self.display
    }

    pub fn months(&self) -> &[Month<D>] {
        &self.months
    }

    pub fn placeholder(&self) -> &D {
        &self.placeholder
    }

    pub fn selection(&self) -> &Selection<D> {
        &self.selection
    }

    pub fn cell_rules(&self) -> &CellRules<D> {
        &self.cell_rules
    }

    pub fn focused_date(&self) -> Option<&D> {
        self.focus.focused_date()
    }

    pub fn focused_cell(&self) -> Option<&DayCell<D>> {
        self.focus.current()
    }

    pub fn has_pending_focus(&self) -> bool {
        self.pending_focus.is_some()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    /// Every rendered cell, for drawing.
    pub fn cells(&self) -> Vec<DayCell<D>> {
        day_cells(&self.months, &self.cell_rules)
    }

    pub fn heading(&self) -> String {
        grid::heading(&self.months, self.formatter.as_ref())
    }

    pub fn weekday_labels(&self, format: WeekdayFormat) -> Vec<String> {
        grid::weekday_labels(&self.months, self.formatter.as_ref(), format)
    }

    pub fn is_prev_disabled(&self) -> bool {
        bounds::is_prev_disabled(&self.months, self.cell_rules.min_value, self.disabled)
    }

    pub fn is_next_disabled(&self) -> bool {
        bounds::is_next_disabled(&self.months, self.cell_rules.max_value, self.disabled)
    }

    pub fn year_pool(&self) -> Vec<i32> {
        bounds::compute_year_pool(&YearPoolOptions {
            placeholder_year: self.placeholder.year(),
            current_year: self.today.year(),
            min_value: self.cell_rules.min_value,
            max_value: self.cell_rules.max_value,
        })
    }

    pub fn month_pool(&self) -> Vec<u32> {
        bounds::compute_month_pool(self.placeholder.year(), self.cell_rules.min_value, self.cell_rules.max_value)
    }

    pub fn highlighted_range(&self, hovered: &D) -> Option<DateRange<D>> {
        highlighted_range(&self.selection, hovered, &self.selection_rules, &self.cell_rules)
    }

    // ── Grid ──────────────────────────────────────────────────────────────────

    fn rebuild(&mut self) {
        self.months = build_months(&self.display, self.formatter.as_ref());
        self.refocus();
    }

    fn refocus(&mut self) {
        self.focus.rebuild(&self.months, &self.cell_rules);
        if self.focus.current().is_none() {
            self.focus.focus_initial(&self.selection, self.today);
        }
    }

    fn is_visible(&self, date: &D) -> bool {
        self.months.iter().any(|month| month.contains(date))
    }

    /// Returns true when the grid had to be re-anchored.
    pub fn set_placeholder(&mut self, placeholder: D) -> bool {
        self.placeholder = placeholder;
        if self.is_visible(&self.placeholder) {
            return false;
        }
        self.display = self.display.with_anchor(self.placeholder.clone());
        self.rebuild();
        true
    }

    pub fn set_year(&mut self, year: i32) -> CalendarOutcome<D> {
        self.jump_to(self.placeholder.set_year(year))
    }

    pub fn set_month(&mut self, month: u32) -> CalendarOutcome<D> {
        self.jump_to(self.placeholder.set_month(month))
    }

    fn jump_to(&mut self, placeholder: D) -> CalendarOutcome<D> {
        if self.disabled {
            return CalendarOutcome::ignored();
        }
        self.set_placeholder(placeholder.clone());
        let mut outcome = CalendarOutcome::handled();
        outcome.push(CalendarEffect::PlaceholderChanged(placeholder));
        outcome
    }

    // ── Paging ────────────────────────────────────────────────────────────────

    pub fn next_page(&mut self) -> CalendarOutcome<D> {
        self.turn_page(PageDirection::Next)
    }

    pub fn prev_page(&mut self) -> CalendarOutcome<D> {
        self.turn_page(PageDirection::Prev)
    }

    fn turn_page(&mut self, direction: PageDirection) -> CalendarOutcome<D> {
        let blocked = match direction {
            PageDirection::Prev => self.is_prev_disabled(),
            PageDirection::Next => self.is_next_disabled(),
        };
        if blocked {
            debug!(?direction, "page turn ignored: control disabled");
            return CalendarOutcome::ignored();
        }

        self.display = paging::turn_page(&self.display, &self.months, direction);
        self.placeholder = self.display.anchor.clone();
        self.pending_focus = None;
        self.rebuild();

        let mut outcome = CalendarOutcome::handled();
        outcome.push(CalendarEffect::PlaceholderChanged(self.placeholder.clone()));
        outcome
    }

    // ── Focus ─────────────────────────────────────────────────────────────────

    pub fn shift_focus(&mut self, delta: FocusDelta) -> CalendarOutcome<D> {
        if self.disabled {
            return CalendarOutcome::ignored();
        }
        if self.focus.current().is_none() {
            self.focus.focus_initial(&self.selection, self.today);
        }
        let Some(current) = self.focus.index() else {
            debug!("focus shift ignored: nothing focusable");
            return CalendarOutcome::handled();
        };

        let buttons = PageButtons {
            prev_disabled: self.is_prev_disabled(),
            next_disabled: self.is_next_disabled(),
        };
        let mut outcome = CalendarOutcome::handled();
        match shift_focus(current, delta, &self.months, &self.display, &self.cell_rules, buttons) {
            FocusResult::FocusedNow(cell) => outcome.merge(self.focus_cell(cell)),
            FocusResult::DeferUntilNextGrid { display, pending } => {
                self.placeholder = display.anchor.clone();
                self.display = display;
                self.pending_focus = Some(pending);
                self.rebuild();
                outcome.push(CalendarEffect::PlaceholderChanged(self.placeholder.clone()));
                outcome.push(CalendarEffect::DeferFocus);
            }
            FocusResult::Unchanged => {}
        }
        outcome
    }

    /// Finish a focus move that crossed a page boundary.
    pub fn on_grid_committed(&mut self) -> CalendarOutcome<D> {
        let Some(pending) = self.pending_focus.take() else {
            return CalendarOutcome::ignored();
        };
        match pending.resolve(&self.months, &self.cell_rules) {
            Some(cell) => self.focus_cell(cell),
            None => CalendarOutcome::ignored(),
        }
    }

    fn focus_cell(&mut self, cell: DayCell<D>) -> CalendarOutcome<D> {
        let mut outcome = CalendarOutcome::handled();
        if !self.placeholder.is_same_day(&cell.date) {
            self.set_placeholder(cell.date.clone());
            outcome.push(CalendarEffect::PlaceholderChanged(cell.date.clone()));
        }
        if !self.focus.set_focus_to_cell(&cell) {
            self.focus.set_focus_by_date(&cell.date);
        }
        outcome.push(CalendarEffect::FocusCell(cell.date));
        outcome
    }

    // ── Selection ─────────────────────────────────────────────────────────────

    /// Replace the selection from outside, e.g. when the host owns the value.
    pub fn set_selection(&mut self, selection: Selection<D>) {
        self.selection = selection;
    }

    /// Click on a day cell.
    pub fn select_date(&mut self, date: &D) -> CalendarOutcome<D> {
        if self.disabled || self.readonly {
            debug!(date = %date.to_iso(), readonly = self.readonly, "selection ignored: calendar is locked");
            return CalendarOutcome::ignored();
        }

        let mut outcome = CalendarOutcome::handled();
        if self.focus.set_focus_by_date(date) {
            outcome.push(CalendarEffect::FocusCell(date.clone()));
        }

        let change = toggle_selection(date, &self.selection, &self.selection_rules, &self.cell_rules);
        if change.selection != self.selection {
            self.selection = change.selection;
            outcome.push(CalendarEffect::ValueChanged(self.selection.clone()));
        }
        if change.range_completed && self.close_on_range_select {
            outcome.push(CalendarEffect::CloseRequested);
        }
        outcome
    }

    /// Toggle the focused day.
    pub fn activate(&mut self) -> CalendarOutcome<D> {
        let Some(date) = self.focus.focused_date().cloned() else {
            debug!("activation ignored: no focused cell");
            return CalendarOutcome::handled();
        };
        let mut outcome = self.select_date(&date);
        outcome.handled = true;
        outcome.prevent_default = true;
        outcome
    }

    // ── Keys ──────────────────────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent) -> CalendarOutcome<D> {
        let Some(command) = self.key_bindings.resolve(key) else {
            return CalendarOutcome::ignored();
        };
        if self.disabled {
            return CalendarOutcome::ignored();
        }
        trace!(?command, "calendar key");
        match command {
            CalendarCommand::Focus(delta) => self.shift_focus(delta),
            CalendarCommand::Activate => self.activate(),
            CalendarCommand::PrevPage => self.prev_page(),
            CalendarCommand::NextPage => self.next_page(),
        }
    }
}
