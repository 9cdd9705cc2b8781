use crate::date::{DateValue, preserve_time_of_day};

/// Clicking the selected day clears it unless deselection is prevented.
pub fn toggle<D: DateValue>(candidate: &D, current: Option<&D>, prevent_deselect: bool) -> Option<D> {
    match current {
        Some(selected) if selected.is_same_day(candidate) => {
            if prevent_deselect {
                Some(selected.clone())
            } else {
                None
            }
        }
        _ => Some(preserve_time_of_day(candidate, current)),
    }
}

#[cfg(test)]
mod tests {
    use super::toggle;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn at(date: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
        date.and_hms_opt(h, m, 0).expect("valid time")
    }

    #[test]
    fn selects_and_deselects() {
        let picked = toggle(&ymd(2024, 4, 2), None, false);
        assert_eq!(picked, Some(ymd(2024, 4, 2)));
        assert_eq!(toggle(&ymd(2024, 4, 2), picked.as_ref(), false), None);
    }

    #[test]
    fn prevent_deselect_keeps_the_date() {
        let current = ymd(2024, 4, 2);
        assert_eq!(toggle(&current, Some(&current), true), Some(current));
    }

    #[test]
    fn switching_days_keeps_previous_time() {
        let current = at(ymd(2024, 4, 2), 14, 30);
        let candidate = at(ymd(2024, 4, 9), 0, 0);
        assert_eq!(
            toggle(&candidate, Some(&current), false),
            Some(at(ymd(2024, 4, 9), 14, 30))
        );
    }
}
