//! Time select: stepping hours, minutes and seconds within limits.

use crate::consts::{FIRST_PM_HOUR, HOURS_PER_MERIDIEM};
use crate::{Config, DateValue, Direction, TimeUnit, Unit};

/// Units moved by one click: hours always step by one, minutes and seconds
/// by their configured interval
pub fn step_amount(config: &Config, unit: TimeUnit) -> i64 {
    match unit {
        TimeUnit::Hour => 1,
        TimeUnit::Minute => i64::from(config.minutes_interval.get()),
        TimeUnit::Second => i64::from(config.seconds_interval.get()),
    }
}

/// Moves `time` one step. Steps carry over into the next or previous day.
pub fn step_time(config: &Config, time: &DateValue, unit: TimeUnit, direction: Direction) -> DateValue {
    time.add(direction.sign() * step_amount(config, unit), unit.into())
}

pub fn increase(config: &Config, time: &DateValue, unit: TimeUnit) -> DateValue {
    step_time(config, time, unit, Direction::Right)
}

pub fn decrease(config: &Config, time: &DateValue, unit: TimeUnit) -> DateValue {
    step_time(config, time, unit, Direction::Left)
}

/// Switches between AM and PM, keeping the hour on the clock face
pub fn toggle_meridiem(time: &DateValue) -> DateValue {
    match time.hour() {
        Some(hour) if hour < FIRST_PM_HOUR => time.add(HOURS_PER_MERIDIEM, Unit::Hour),
        Some(_) => time.subtract(HOURS_PER_MERIDIEM, Unit::Hour),
        None => DateValue::Invalid,
    }
}

fn respects_min(config: &Config, candidate: &DateValue) -> bool {
    config.min.is_none_or(|min| min.is_same_or_before(candidate, Unit::Second))
        && config
            .min_time
            .is_none_or(|min_time| min_time.is_same_or_before(&candidate.time_only(), Unit::Second))
}

fn respects_max(config: &Config, candidate: &DateValue) -> bool {
    config.max.is_none_or(|max| max.is_same_or_after(candidate, Unit::Second))
        && config
            .max_time
            .is_none_or(|max_time| max_time.is_same_or_after(&candidate.time_only(), Unit::Second))
}

const fn has_lower_limit(config: &Config) -> bool {
    config.min.is_some() || config.min_time.is_some()
}

const fn has_upper_limit(config: &Config) -> bool {
    config.max.is_some() || config.max_time.is_some()
}

pub fn should_show_decrease(config: &Config, time: &DateValue, unit: TimeUnit) -> bool {
    if !has_lower_limit(config) {
        return true;
    }
    respects_min(config, &decrease(config, time, unit))
}

pub fn should_show_increase(config: &Config, time: &DateValue, unit: TimeUnit) -> bool {
    if !has_upper_limit(config) {
        return true;
    }
    respects_max(config, &increase(config, time, unit))
}

pub fn should_show_toggle_meridiem(config: &Config, time: &DateValue) -> bool {
    if !has_lower_limit(config) && !has_upper_limit(config) {
        return true;
    }
    let toggled = toggle_meridiem(time);
    respects_min(config, &toggled) && respects_max(config, &toggled)
}

/// Full display format of the select, e.g. `hh:mm A` or `HH:mm:ss`
pub fn time_format(config: &Config) -> String {
    let mut format = String::from(hours_format(config));
    format.push_str(&config.time_separator);
    format.push_str(&config.minutes_format);
    if config.show_seconds {
        format.push_str(&config.time_separator);
        format.push_str(&config.seconds_format);
    }
    if !config.show_twenty_four_hours {
        format.push(' ');
        format.push_str(&config.meridiem_format);
    }
    format
}

fn hours_format(config: &Config) -> &str {
    if config.show_twenty_four_hours {
        &config.hours24_format
    } else {
        &config.hours12_format
    }
}

/// Hour part of `time`, or of now when there is none
pub fn hours(config: &Config, time: Option<&DateValue>) -> String {
    display_part(config, time, hours_format(config))
}

pub fn minutes(config: &Config, time: Option<&DateValue>) -> String {
    display_part(config, time, &config.minutes_format)
}

pub fn seconds(config: &Config, time: Option<&DateValue>) -> String {
    display_part(config, time, &config.seconds_format)
}

pub fn meridiem(config: &Config, time: &DateValue) -> String {
    config.display(time, &config.meridiem_format)
}

fn display_part(config: &Config, time: Option<&DateValue>, format: &str) -> String {
    let time = time.copied().unwrap_or_else(DateValue::now);
    config.display(&time, format)
}
