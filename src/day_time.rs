//! Combining a picked day with a picked time of day.

use crate::{Config, DateValue, Unit};

fn combine(day: &DateValue, time: &DateValue) -> DateValue {
    match (day.date(), time.naive()) {
        (Some(day), Some(time)) => DateValue::Valid(day.and_time(time.time())),
        _ => DateValue::Invalid,
    }
}

/// Moves `current` to `day`, keeping its time of day (the current time when
/// nothing is selected). The result is clamped into the configured limits.
pub fn update_day(current: Option<&DateValue>, day: &DateValue, config: &Config) -> DateValue {
    update_day_at(current, day, config, &DateValue::now())
}

/// Same as [`update_day`] with an explicit `now`
pub fn update_day_at(current: Option<&DateValue>, day: &DateValue, config: &Config, now: &DateValue) -> DateValue {
    let mut updated = combine(day, current.unwrap_or(now));

    if let Some(min) = config.min.filter(|min| min.is_after(&updated, Unit::Second)) {
        updated = min;
    }
    if let Some(max) = config.max.filter(|max| max.is_before(&updated, Unit::Second)) {
        updated = max;
    }
    updated
}

/// Sets the time of day of `current` (today when nothing is selected)
pub fn update_time(current: Option<&DateValue>, time: &DateValue) -> DateValue {
    update_time_at(current, time, &DateValue::now())
}

/// Same as [`update_time`] with an explicit `now`
pub fn update_time_at(current: Option<&DateValue>, time: &DateValue, now: &DateValue) -> DateValue {
    combine(current.unwrap_or(now), time)
}
