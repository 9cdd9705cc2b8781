use tracing::debug;

use crate::date::{DateDuration, DateValue};
use crate::grid::{DisplayState, Month};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Prev,
    Next,
}

impl PageDirection {
    fn sign(self) -> i32 {
        match self {
            Self::Prev => -1,
            Self::Next => 1,
        }
    }
}

/// Paged navigation jumps a whole page of `number_of_months`; contiguous
/// navigation slides the window one month and lands on its first day.
pub fn turn_page<D: DateValue>(
    display: &DisplayState<D>,
    months: &[Month<D>],
    direction: PageDirection,
) -> DisplayState<D> {
    let Some(first) = months.first() else {
        debug!(?direction, "page turn ignored: no months rendered");
        return display.clone();
    };

    let anchor = if display.paged_navigation {
        let step = display.month_count() as i32 * direction.sign();
        first.value.add(DateDuration::months(step))
    } else {
        first
            .value
            .add(DateDuration::months(direction.sign()))
            .set_day(1)
    };
    display.with_anchor(anchor)
}

pub fn next_page<D: DateValue>(display: &DisplayState<D>, months: &[Month<D>]) -> DisplayState<D> {
    turn_page(display, months, PageDirection::Next)
}

pub fn prev_page<D: DateValue>(display: &DisplayState<D>, months: &[Month<D>]) -> DisplayState<D> {
    turn_page(display, months, PageDirection::Prev)
}
