//! Date and time selection engine for calendar pickers.
//!
//! Normalizes picker values into a canonical selection, generates day, month
//! and year grids, steps time values within bounds, and validates selections
//! against min/max date and time limits.

mod config;
mod consts;
mod format;
mod granularity;
mod grid;
mod prelude;
mod selection;
mod types;
mod validator;
mod value;

pub mod day_grid;
pub mod day_time;
pub mod month_grid;
pub mod time_select;
pub mod year_grid;

#[cfg(test)]
mod test_utils;

pub use config::{
    default_format, resolve_config, should_reset_current_view, Config, ConfigError, DateFormatter, DatePredicate,
    Hooks, RawOptions, WeekDayFormatter,
};
pub use consts::*;
pub use format::{resolve_locale, Pattern};
pub use granularity::{
    granularity_for_mode, in_range, should_show_current, should_show_current_at, truncate_to_time_only,
};
pub use grid::{generate_grid, generate_grid_at, CalendarGrid};
pub use selection::{default_display_date, default_display_date_at, select, toggle_selection, Selection};
pub use types::{CalendarMode, Direction, Interval, MonthRows, TimeUnit, Unit, WeekDay, YearGridSize};
pub use validator::{ConstraintKey, DateLimits, DateValidator, ValidationErrors, ValidationFailure};
pub use value::{
    classify, from_canonical, split_dates, to_canonical, to_display_string, valid_dates_from_string,
    CalendarValue, SingleValue, ValueShape,
};

/// A grid of cells, row-major.
pub type Grid<C> = Vec<Vec<C>>;

/// The anchors of a view before and after a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Navigation {
    pub from: DateValue,
    pub to:   DateValue,
}

use crate::prelude::*;
use chrono::{Datelike, Local, Locale, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use std::fmt;

/// A point in time with second precision, or the marker left behind by a
/// value that failed to parse.
///
/// Derivations (`add`, `subtract`, `start_of`) return new values; an invalid
/// date stays invalid through every derivation and compares false against
/// anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateValue {
    Valid(NaiveDateTime),
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Empty date string")]
    EmptyInput,
    #[display(fmt = "Invalid date format: {input} does not match {format}")]
    InvalidFormat { input: String, format: String },
    #[display(fmt = "Invalid date: {input} reads back as {rendered} with {format}")]
    NotStrict {
        input:    String,
        format:   String,
        rendered: String,
    },
    #[display(fmt = "Date out of range: {_0}")]
    OutOfRange(String),
}

impl std::error::Error for ParseError {}

impl DateValue {
    /// Wraps a date-time, dropping sub-second precision
    pub fn new(value: NaiveDateTime) -> Self {
        Self::Valid(value.with_nanosecond(0).unwrap_or(value))
    }

    /// Midnight of the given day, or invalid if the day does not exist
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Self {
        Self::from_ymd_hms(year, month, day, 0, 0, 0)
    }

    pub fn from_ymd_hms(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .map_or(Self::Invalid, Self::Valid)
    }

    /// The current local date-time
    pub fn now() -> Self {
        Self::new(Local::now().naive_local())
    }

    /// Strictly parses `input` against a calendar format, leaving an invalid
    /// marker behind on failure.
    pub fn parse(input: &str, format: &str) -> Self {
        Self::parse_at(input, format, Local::now().date_naive())
    }

    /// Same as [`DateValue::parse`], taking missing date parts from `today`
    pub fn parse_at(input: &str, format: &str, today: NaiveDate) -> Self {
        match Self::try_parse_at(input, format, today) {
            Ok(value) => value,
            Err(error) => {
                tracing::debug!(%input, %format, %error, "value did not parse");
                Self::Invalid
            },
        }
    }

    /// Strictly parses `input` against a calendar format
    ///
    /// # Errors
    /// Returns `ParseError` when the input is empty, does not match, or does
    /// not format back to the same text.
    pub fn try_parse(input: &str, format: &str) -> Result<Self, ParseError> {
        Self::try_parse_at(input, format, Local::now().date_naive())
    }

    /// # Errors
    /// See [`DateValue::try_parse`].
    pub fn try_parse_at(input: &str, format: &str, today: NaiveDate) -> Result<Self, ParseError> {
        Pattern::compile(format).parse(input, today).map(Self::Valid)
    }

    /// Forgiving parse used for configured limits: unpadded numbers are
    /// accepted and the input may stop short of the format. Leaves an
    /// invalid marker behind on failure.
    pub fn parse_lenient(input: &str, format: &str) -> Self {
        Self::parse_lenient_at(input, format, Local::now().date_naive())
    }

    /// Same as [`DateValue::parse_lenient`], taking missing date parts from
    /// `today`
    pub fn parse_lenient_at(input: &str, format: &str, today: NaiveDate) -> Self {
        match Pattern::compile(format).parse_lenient(input, today) {
            Ok(value) => Self::Valid(value),
            Err(error) => {
                tracing::debug!(%input, %format, %error, "limit did not parse");
                Self::Invalid
            },
        }
    }

    /// Formats with POSIX names, the form used for string values. Month and
    /// week day names are always English so the text parses back; use
    /// [`DateValue::format_localized`] for display.
    pub fn format(&self, format: &str) -> String {
        self.format_localized(format, Locale::POSIX)
    }

    /// Formats with the names of `locale`, the form used for display text
    pub fn format_localized(&self, format: &str, locale: Locale) -> String {
        match self {
            Self::Valid(value) => Pattern::compile(format).format(value, locale),
            Self::Invalid => INVALID_DATE.to_owned(),
        }
    }

    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The underlying date-time, if valid
    pub const fn naive(&self) -> Option<NaiveDateTime> {
        match *self {
            Self::Valid(value) => Some(value),
            Self::Invalid => None,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.naive().map(|value| value.date())
    }

    pub fn year(&self) -> Option<i32> {
        self.naive().map(|value| value.year())
    }

    pub fn month(&self) -> Option<u32> {
        self.naive().map(|value| value.month())
    }

    pub fn day(&self) -> Option<u32> {
        self.naive().map(|value| value.day())
    }

    pub fn hour(&self) -> Option<u32> {
        self.naive().map(|value| value.hour())
    }

    pub fn minute(&self) -> Option<u32> {
        self.naive().map(|value| value.minute())
    }

    pub fn second(&self) -> Option<u32> {
        self.naive().map(|value| value.second())
    }

    pub fn weekday(&self) -> Option<WeekDay> {
        self.naive().map(|value| value.weekday().into())
    }

    /// Adds `amount` units. Month and year steps clamp to the last day of
    /// the target month; overflow gives an invalid date.
    pub fn add(&self, amount: i64, unit: Unit) -> Self {
        self.naive()
            .and_then(|value| shift(value, amount, unit))
            .map_or(Self::Invalid, Self::Valid)
    }

    pub fn subtract(&self, amount: i64, unit: Unit) -> Self {
        amount
            .checked_neg()
            .map_or(Self::Invalid, |negated| self.add(negated, unit))
    }

    /// The first instant of the unit containing this value
    pub fn start_of(&self, unit: Unit) -> Self {
        self.naive()
            .map_or(Self::Invalid, |value| Self::Valid(truncate(value, unit)))
    }

    /// Whether both values fall in the same `unit`
    pub fn is_same(&self, other: &Self, unit: Unit) -> bool {
        self.compare(other, unit)
            .is_some_and(std::cmp::Ordering::is_eq)
    }

    pub fn is_before(&self, other: &Self, unit: Unit) -> bool {
        self.compare(other, unit)
            .is_some_and(std::cmp::Ordering::is_lt)
    }

    pub fn is_after(&self, other: &Self, unit: Unit) -> bool {
        self.compare(other, unit)
            .is_some_and(std::cmp::Ordering::is_gt)
    }

    pub fn is_same_or_before(&self, other: &Self, unit: Unit) -> bool {
        self.compare(other, unit)
            .is_some_and(std::cmp::Ordering::is_le)
    }

    pub fn is_same_or_after(&self, other: &Self, unit: Unit) -> bool {
        self.compare(other, unit)
            .is_some_and(std::cmp::Ordering::is_ge)
    }

    /// Orders two values after truncating both to `unit`; `None` if either
    /// is invalid.
    pub fn compare(&self, other: &Self, unit: Unit) -> Option<std::cmp::Ordering> {
        let (a, b) = (self.naive()?, other.naive()?);
        Some(truncate(a, unit).cmp(&truncate(b, unit)))
    }

    /// This value's time of day on the reference day used for time-only
    /// comparisons
    pub fn time_only(&self) -> Self {
        truncate_to_time_only(self)
    }
}

pub(crate) fn truncate(value: NaiveDateTime, unit: Unit) -> NaiveDateTime {
    let date = value.date();
    let time = |h, m, s| NaiveTime::from_hms_opt(h, m, s).unwrap_or(NaiveTime::MIN);
    match unit {
        Unit::Year => date.with_ordinal(1).unwrap_or(date).and_time(NaiveTime::MIN),
        Unit::Month => date.with_day(1).unwrap_or(date).and_time(NaiveTime::MIN),
        Unit::Day => date.and_time(NaiveTime::MIN),
        Unit::Hour => date.and_time(time(value.hour(), 0, 0)),
        Unit::Minute => date.and_time(time(value.hour(), value.minute(), 0)),
        Unit::Second => date.and_time(time(value.hour(), value.minute(), value.second())),
    }
}

fn shift(value: NaiveDateTime, amount: i64, unit: Unit) -> Option<NaiveDateTime> {
    match unit {
        Unit::Year => shift_months(value, amount.checked_mul(12)?),
        Unit::Month => shift_months(value, amount),
        Unit::Day => value.checked_add_signed(TimeDelta::try_days(amount)?),
        Unit::Hour => value.checked_add_signed(TimeDelta::try_hours(amount)?),
        Unit::Minute => value.checked_add_signed(TimeDelta::try_minutes(amount)?),
        Unit::Second => value.checked_add_signed(TimeDelta::try_seconds(amount)?),
    }
}

fn shift_months(value: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        value.checked_add_months(magnitude)
    } else {
        value.checked_sub_months(magnitude)
    }
}

impl From<NaiveDateTime> for DateValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::new(value)
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        Self::Valid(date.and_time(NaiveTime::MIN))
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(value) => write!(f, "{}", value.format("%Y-%m-%dT%H:%M:%S")),
            Self::Invalid => f.write_str(INVALID_DATE),
        }
    }
}

impl serde::Serialize for DateValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for DateValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s == INVALID_DATE {
            return Ok(Self::Invalid);
        }
        s.parse::<NaiveDateTime>()
            .map(Self::new)
            .map_err(serde::de::Error::custom)
    }
}
