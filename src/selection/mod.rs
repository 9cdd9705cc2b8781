use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::date::DateValue;
use crate::grid::CellRules;

pub mod multiple;
pub mod range;
pub mod single;

pub use multiple::MultipleSelection;
pub use range::{DateRange, highlighted_range};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    #[default]
    Single,
    Multiple,
    Range,
}

/// Cardinality and deselection constraints; each variant reads the fields it
/// understands and ignores the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectionRules {
    pub prevent_deselect: bool,
    pub min_days: Option<usize>,
    pub max_days: Option<usize>,
    pub exclude_disabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selection<D> {
    Single(Option<D>),
    Multiple(MultipleSelection<D>),
    Range(DateRange<D>),
}

impl<D: DateValue> Selection<D> {
    pub fn empty(mode: SelectionMode) -> Self {
        match mode {
            SelectionMode::Single => Self::Single(None),
            SelectionMode::Multiple => Self::Multiple(MultipleSelection::new()),
            SelectionMode::Range => Self::Range(DateRange::empty()),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        match self {
            Self::Single(_) => SelectionMode::Single,
            Self::Multiple(_) => SelectionMode::Multiple,
            Self::Range(_) => SelectionMode::Range,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(value) => value.is_none(),
            Self::Multiple(set) => set.is_empty(),
            Self::Range(range) => range.start.is_none(),
        }
    }

    /// Ranges count every day from start through end.
    pub fn is_selected(&self, date: &D) -> bool {
        match self {
            Self::Single(value) => value.as_ref().is_some_and(|v| v.is_same_day(date)),
            Self::Multiple(set) => set.contains(date),
            Self::Range(range) => range.contains(date),
        }
    }

    pub fn is_selection_start(&self, date: &D) -> bool {
        match self {
            Self::Range(range) => range.start.as_ref().is_some_and(|s| s.is_same_day(date)),
            _ => false,
        }
    }

    pub fn is_selection_end(&self, date: &D) -> bool {
        match self {
            Self::Range(range) => range.end.as_ref().is_some_and(|e| e.is_same_day(date)),
            _ => false,
        }
    }

    /// Earliest selected date, used when deciding where focus lands.
    pub fn earliest(&self) -> Option<&D> {
        match self {
            Self::Single(value) => value.as_ref(),
            Self::Multiple(set) => set.iter().min_by(|a, b| a.compare(b)),
            Self::Range(range) => range.start.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionChange<D> {
    pub selection: Selection<D>,
    /// A range just received its second endpoint.
    pub range_completed: bool,
}

impl<D> SelectionChange<D> {
    fn partial(selection: Selection<D>) -> Self {
        Self {
            selection,
            range_completed: false,
        }
    }
}

/// Apply a click on `candidate` to the current selection.
///
/// Candidates the rules reject never reach the variant logic; the caller gets
/// the current selection back unchanged.
pub fn toggle_selection<D: DateValue>(
    candidate: &D,
    current: &Selection<D>,
    rules: &SelectionRules,
    cells: &CellRules<D>,
) -> SelectionChange<D> {
    if !cells.accepts(candidate) {
        debug!(date = %candidate.to_iso(), "selection toggle ignored: date is disabled or unavailable");
        return SelectionChange::partial(current.clone());
    }

    let change = match current {
        Selection::Single(value) => SelectionChange::partial(Selection::Single(single::toggle(
            candidate,
            value.as_ref(),
            rules.prevent_deselect,
        ))),
        Selection::Multiple(set) => {
            SelectionChange::partial(Selection::Multiple(multiple::toggle(candidate, set, rules)))
        }
        Selection::Range(range) => {
            let (range, completed) = range::toggle(candidate, range, rules, cells);
            SelectionChange {
                selection: Selection::Range(range),
                range_completed: completed,
            }
        }
    };
    trace!(date = %candidate.to_iso(), completed = change.range_completed, "selection toggled");
    change
}
