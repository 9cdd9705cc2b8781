use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::calendar::Calendar;
use crate::date::DateValue;
use crate::error::{CalendarError, CalendarResult};
use crate::format::DefaultFormatter;
use crate::grid::{CellRules, DisplayState};
use crate::selection::{SelectionMode, SelectionRules};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalendarConfig {
    /// 0 = Sunday; unset means the locale decides.
    pub week_starts_on: Option<u8>,
    pub fixed_weeks: bool,
    pub number_of_months: usize,
    pub paged_navigation: bool,
    pub locale: String,
    pub min_value: Option<NaiveDate>,
    pub max_value: Option<NaiveDate>,
    pub disabled_dates: Vec<NaiveDate>,
    pub unavailable_dates: Vec<NaiveDate>,
    pub disable_days_outside_month: bool,
    pub disabled: bool,
    pub readonly: bool,
    pub close_on_range_select: bool,
    pub selection: SelectionConfig,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            week_starts_on: None,
            fixed_weeks: false,
            number_of_months: 1,
            paged_navigation: false,
            locale: "en-US".to_string(),
            min_value: None,
            max_value: None,
            disabled_dates: Vec::new(),
            unavailable_dates: Vec::new(),
            disable_days_outside_month: true,
            disabled: false,
            readonly: false,
            close_on_range_select: false,
            selection: SelectionConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectionConfig {
    pub mode: SelectionMode,
    pub prevent_deselect: bool,
    pub min_days: Option<usize>,
    pub max_days: Option<usize>,
    pub exclude_disabled: bool,
}

impl SelectionConfig {
    pub fn rules(&self) -> SelectionRules {
        SelectionRules {
            prevent_deselect: self.prevent_deselect,
            min_days: self.min_days,
            max_days: self.max_days,
            exclude_disabled: self.exclude_disabled,
        }
    }
}

impl CalendarConfig {
    pub fn from_yaml_str(text: &str) -> CalendarResult<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> CalendarResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CalendarResult<()> {
        if let Some(day) = self.week_starts_on
            && day > 6
        {
            return Err(CalendarError::InvalidWeekStart(day));
        }
        if self.number_of_months == 0 {
            return Err(CalendarError::InvalidMonthCount);
        }
        if self.selection.min_days == Some(0) {
            return Err(CalendarError::ZeroDayLimit { field: "min_days" });
        }
        if self.selection.max_days == Some(0) {
            return Err(CalendarError::ZeroDayLimit { field: "max_days" });
        }
        if let (Some(min), Some(max)) = (self.selection.min_days, self.selection.max_days)
            && min > max
        {
            return Err(CalendarError::InvalidDayBounds { min, max });
        }
        if let (Some(min), Some(max)) = (self.min_value, self.max_value)
            && min > max
        {
            return Err(CalendarError::InvalidValueBounds {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(())
    }

    pub fn display_state<D: DateValue>(&self, anchor: D) -> DisplayState<D> {
        let mut display = DisplayState::new(anchor)
            .with_fixed_weeks(self.fixed_weeks)
            .with_number_of_months(self.number_of_months)
            .with_paged_navigation(self.paged_navigation)
            .with_locale(self.locale.clone());
        if let Some(day) = self.week_starts_on {
            display = display.with_week_starts_on(day);
        }
        display
    }

    pub fn cell_rules<D: DateValue + 'static>(&self) -> CellRules<D> {
        let mut rules = CellRules::new().with_days_outside_month(self.disable_days_outside_month);
        if let Some(min) = self.min_value {
            rules = rules.with_min_value(min);
        }
        if let Some(max) = self.max_value {
            rules = rules.with_max_value(max);
        }
        if !self.disabled_dates.is_empty() {
            let days: HashSet<NaiveDate> = self.disabled_dates.iter().copied().collect();
            rules = rules.with_disabled(move |date: &D| days.contains(&date.calendar_date()));
        }
        if !self.unavailable_dates.is_empty() {
            let days: HashSet<NaiveDate> = self.unavailable_dates.iter().copied().collect();
            rules = rules.with_unavailable(move |date: &D| days.contains(&date.calendar_date()));
        }
        rules
    }
}

impl<D: DateValue + 'static> Calendar<D> {
    pub fn from_config(config: &CalendarConfig, placeholder: D, today: NaiveDate) -> CalendarResult<Self> {
        config.validate()?;
        Ok(Calendar::new(placeholder.clone(), today)
            .with_formatter(DefaultFormatter::new(config.locale.clone()))
            .with_display(config.display_state(placeholder))
            .with_cell_rules(config.cell_rules())
            .with_selection_mode(config.selection.mode)
            .with_selection_rules(config.selection.rules())
            .with_disabled(config.disabled)
            .with_readonly(config.readonly)
            .with_close_on_range_select(config.close_on_range_select))
    }
}
