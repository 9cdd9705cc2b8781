use chrono::NaiveDate;
use indexmap::IndexMap;
use tracing::debug;

use crate::date::{DateValue, preserve_time_of_day};
use crate::selection::SelectionRules;

/// Selected dates keyed by calendar day, in the order they were picked.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultipleSelection<D> {
    dates: IndexMap<NaiveDate, D>,
}

impl<D: DateValue> MultipleSelection<D> {
    pub fn new() -> Self {
        Self {
            dates: IndexMap::new(),
        }
    }

    pub fn from_dates(dates: impl IntoIterator<Item = D>) -> Self {
        let mut selection = Self::new();
        for date in dates {
            selection.insert(date);
        }
        selection
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn contains(&self, date: &D) -> bool {
        self.dates.contains_key(&date.calendar_date())
    }

    pub fn iter(&self) -> impl Iterator<Item = &D> {
        self.dates.values()
    }

    pub fn last_picked(&self) -> Option<&D> {
        self.dates.last().map(|(_, date)| date)
    }

    fn insert(&mut self, date: D) {
        self.dates.insert(date.calendar_date(), date);
    }

    fn remove(&mut self, date: &D) {
        self.dates.shift_remove(&date.calendar_date());
    }
}

/// Adding past `max_days` starts a fresh selection holding only the new date.
/// A `max_days` of zero admits nothing.
pub fn toggle<D: DateValue>(candidate: &D, current: &MultipleSelection<D>, rules: &SelectionRules) -> MultipleSelection<D> {
    let mut next = current.clone();
    if rules.max_days == Some(0) && !current.contains(candidate) {
        debug!(date = %candidate.to_iso(), "multiple selection ignored: max_days is zero");
        return next;
    }

    if current.contains(candidate) {
        if current.len() == 1 && rules.prevent_deselect {
            return next;
        }
        next.remove(candidate);
        return next;
    }

    let picked = preserve_time_of_day(candidate, current.last_picked());
    if rules.max_days.is_some_and(|max| current.len() + 1 > max) {
        return MultipleSelection::from_dates([picked]);
    }
    next.insert(picked);
    next
}
