pub mod bounds;
pub mod calendar;
pub mod config;
pub mod date;
pub mod error;
pub mod focus;
pub mod format;
pub mod grid;
pub mod keys;
pub mod paging;
pub mod selection;

pub use calendar::{Calendar, CalendarEffect, CalendarOutcome};
pub use config::{CalendarConfig, SelectionConfig};
pub use date::{AnyDate, DateDuration, DateValue, TimeOfDay};
pub use error::{CalendarError, CalendarResult};
pub use focus::{FocusDelta, FocusResult, PendingFocus, initial_focus, shift_focus};
pub use format::{DefaultFormatter, Formatter, WeekdayFormat};
pub use grid::{CellRules, DayCell, DisplayState, Month, WeekStart, build_months};
pub use keys::{CalendarCommand, KeyBinding, KeyBindings};
pub use paging::{PageDirection, next_page, prev_page};
pub use selection::{DateRange, MultipleSelection, Selection, SelectionMode, SelectionRules, toggle_selection};
