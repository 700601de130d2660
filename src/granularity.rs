use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::{CalendarMode, DateValue, Unit};

/// Unit at which values of a picker kind are compared.
pub const fn granularity_for_mode(mode: CalendarMode) -> Unit {
    match mode {
        CalendarMode::Day => Unit::Day,
        CalendarMode::DayTime | CalendarMode::Time => Unit::Second,
        CalendarMode::Month => Unit::Month,
        CalendarMode::Year => Unit::Year,
    }
}

impl CalendarMode {
    pub const fn granularity(self) -> Unit {
        granularity_for_mode(self)
    }
}

fn reference_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Projects a value onto a fixed reference day, keeping hour, minute and
/// second, so two values compare by time of day alone.
pub fn truncate_to_time_only(value: &DateValue) -> DateValue {
    value.naive().map_or(DateValue::Invalid, |value| {
        let time = NaiveTime::from_hms_opt(value.hour(), value.minute(), value.second())
            .unwrap_or(NaiveTime::MIN);
        DateValue::Valid(reference_day().and_time(time))
    })
}

/// Whether `date` is on or after `from` and on or before `to` at `unit`.
/// A missing bound is open.
pub fn in_range(date: &DateValue, from: Option<&DateValue>, to: Option<&DateValue>, unit: Unit) -> bool {
    from.is_none_or(|from| date.is_same_or_after(from, unit))
        && to.is_none_or(|to| date.is_same_or_before(to, unit))
}

/// Whether a "go to current" button applies: it is enabled, the picker is
/// not a time picker, and today lies within the limits.
pub fn should_show_current(
    show_go_to_current: bool,
    mode: CalendarMode,
    min: Option<&DateValue>,
    max: Option<&DateValue>,
) -> bool {
    should_show_current_at(show_go_to_current, mode, min, max, &DateValue::now())
}

/// Same as [`should_show_current`] with an explicit `today`
pub fn should_show_current_at(
    show_go_to_current: bool,
    mode: CalendarMode,
    min: Option<&DateValue>,
    max: Option<&DateValue>,
    today: &DateValue,
) -> bool {
    show_go_to_current && mode != CalendarMode::Time && in_range(today, min, max, Unit::Day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, datetime};

    #[test]
    fn test_granularity_for_mode() {
        assert_eq!(granularity_for_mode(CalendarMode::Day), Unit::Day);
        assert_eq!(granularity_for_mode(CalendarMode::DayTime), Unit::Second);
        assert_eq!(granularity_for_mode(CalendarMode::Time), Unit::Second);
        assert_eq!(CalendarMode::Month.granularity(), Unit::Month);
        assert_eq!(CalendarMode::Year.granularity(), Unit::Year);
    }

    #[test]
    fn test_truncate_to_time_only_ignores_day() {
        let morning = truncate_to_time_only(&datetime(2017, 4, 5, 8, 0, 30));
        let other_day = truncate_to_time_only(&datetime(1999, 12, 31, 8, 0, 30));
        assert_eq!(morning, other_day);
        assert_eq!(morning.hour(), Some(8));
        assert_eq!(morning.second(), Some(30));
        assert_eq!(truncate_to_time_only(&DateValue::Invalid), DateValue::Invalid);
    }

    #[test]
    fn test_in_range() {
        let from = date(2017, 1, 10);
        let to = date(2017, 1, 20);
        assert!(in_range(&date(2017, 1, 10), Some(&from), Some(&to), Unit::Day));
        assert!(in_range(&datetime(2017, 1, 20, 23, 0, 0), Some(&from), Some(&to), Unit::Day));
        assert!(!in_range(&date(2017, 1, 21), Some(&from), Some(&to), Unit::Day));
        assert!(!in_range(&date(2017, 1, 9), Some(&from), None, Unit::Day));
        assert!(in_range(&date(1900, 1, 1), None, Some(&to), Unit::Day));
        assert!(in_range(&date(2017, 2, 1), Some(&from), Some(&to), Unit::Year));
    }

    #[test]
    fn test_should_show_current() {
        let today = date(2017, 6, 15);
        let min = date(2017, 1, 1);
        let max = date(2017, 6, 15);

        assert!(should_show_current_at(true, CalendarMode::Day, None, None, &today));
        assert!(should_show_current_at(true, CalendarMode::Month, Some(&min), Some(&max), &today));
        assert!(!should_show_current_at(false, CalendarMode::Day, None, None, &today));
        assert!(!should_show_current_at(true, CalendarMode::Time, None, None, &today));

        let past = date(2016, 12, 31);
        assert!(!should_show_current_at(true, CalendarMode::Year, None, Some(&past), &today));
    }
}
