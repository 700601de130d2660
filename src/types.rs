use crate::consts::{
    DEFAULT_INTERVAL, DEFAULT_MONTH_ROWS, DEFAULT_YEAR_COLS, DEFAULT_YEAR_ROWS, MAX_GRID_DIMENSION,
    MONTHS_IN_YEAR,
};
use crate::prelude::*;
use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;
use std::str::FromStr;

/// A calendar unit, used both for arithmetic and as a comparison granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "minute")]
    Minute,
    #[display(fmt = "second")]
    Second,
}

/// The units a time select can step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "minute")]
    Minute,
    #[display(fmt = "second")]
    Second,
}

impl From<TimeUnit> for Unit {
    fn from(unit: TimeUnit) -> Self {
        match unit {
            TimeUnit::Hour => Self::Hour,
            TimeUnit::Minute => Self::Minute,
            TimeUnit::Second => Self::Second,
        }
    }
}

/// Kind of picker. Decides default formats and the comparison granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum CalendarMode {
    #[default]
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "daytime")]
    DayTime,
    #[display(fmt = "time")]
    Time,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "year")]
    Year,
}

/// First day of the week, as the two-letter keys used in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum WeekDay {
    #[default]
    #[display(fmt = "su")]
    Su,
    #[display(fmt = "mo")]
    Mo,
    #[display(fmt = "tu")]
    Tu,
    #[display(fmt = "we")]
    We,
    #[display(fmt = "th")]
    Th,
    #[display(fmt = "fr")]
    Fr,
    #[display(fmt = "sa")]
    Sa,
}

impl WeekDay {
    /// All days, Sunday first
    pub const ALL: [Self; 7] = [
        Self::Su,
        Self::Mo,
        Self::Tu,
        Self::We,
        Self::Th,
        Self::Fr,
        Self::Sa,
    ];

    /// Days since Sunday (Sunday is 0)
    #[inline]
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// The chrono weekday for this key
    pub const fn to_chrono(self) -> chrono::Weekday {
        match self {
            Self::Su => chrono::Weekday::Sun,
            Self::Mo => chrono::Weekday::Mon,
            Self::Tu => chrono::Weekday::Tue,
            Self::We => chrono::Weekday::Wed,
            Self::Th => chrono::Weekday::Thu,
            Self::Fr => chrono::Weekday::Fri,
            Self::Sa => chrono::Weekday::Sat,
        }
    }
}

impl From<chrono::Weekday> for WeekDay {
    fn from(day: chrono::Weekday) -> Self {
        Self::ALL[day.num_days_from_sunday() as usize]
    }
}

impl FromStr for WeekDay {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| day.to_string() == s.trim().to_lowercase())
            .ok_or_else(|| ConfigError::WeekDay(s.to_owned()))
    }
}

/// Navigation direction of a calendar view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub const fn sign(self) -> i64 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// Number of rows in the month grid, guaranteed to be in `1..=12` and to
/// divide 12 evenly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MonthRows(NonZeroU8);

impl MonthRows {
    /// Creates the row count of a month grid
    ///
    /// # Errors
    /// Returns `ConfigError::MonthRows` if the value is 0, above 12,
    /// or does not divide 12.
    pub fn new(value: u8) -> Result<Self, ConfigError> {
        let non_zero = NonZeroU8::new(value).ok_or(ConfigError::MonthRows(value))?;
        if value > MAX_GRID_DIMENSION || MONTHS_IN_YEAR % value != 0 {
            return Err(ConfigError::MonthRows(value));
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Months per row
    #[inline]
    pub const fn columns(self) -> u8 {
        MONTHS_IN_YEAR / self.0.get()
    }
}

impl Default for MonthRows {
    fn default() -> Self {
        Self(NonZeroU8::new(DEFAULT_MONTH_ROWS).unwrap_or(NonZeroU8::MIN))
    }
}

impl TryFrom<u8> for MonthRows {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MonthRows> for u8 {
    fn from(rows: MonthRows) -> Self {
        rows.get()
    }
}

impl fmt::Display for MonthRows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dimensions of the year grid, each guaranteed to be in `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{rows}x{cols}")]
pub struct YearGridSize {
    rows: NonZeroU8,
    cols: NonZeroU8,
}

impl YearGridSize {
    /// Creates the dimensions of a year grid
    ///
    /// # Errors
    /// Returns `ConfigError::YearRows` or `ConfigError::YearCols`
    /// for a dimension outside `1..=12`.
    pub fn new(rows: u8, cols: u8) -> Result<Self, ConfigError> {
        let rows = NonZeroU8::new(rows)
            .filter(|r| r.get() <= MAX_GRID_DIMENSION)
            .ok_or(ConfigError::YearRows(rows))?;
        let cols = NonZeroU8::new(cols)
            .filter(|c| c.get() <= MAX_GRID_DIMENSION)
            .ok_or(ConfigError::YearCols(cols))?;
        Ok(Self { rows, cols })
    }

    #[inline]
    pub const fn rows(self) -> u8 {
        self.rows.get()
    }

    #[inline]
    pub const fn cols(self) -> u8 {
        self.cols.get()
    }

    /// Number of years shown at once
    #[inline]
    pub const fn cells(self) -> u16 {
        self.rows.get() as u16 * self.cols.get() as u16
    }
}

impl Default for YearGridSize {
    fn default() -> Self {
        Self {
            rows: NonZeroU8::new(DEFAULT_YEAR_ROWS).unwrap_or(NonZeroU8::MIN),
            cols: NonZeroU8::new(DEFAULT_YEAR_COLS).unwrap_or(NonZeroU8::MIN),
        }
    }
}

/// A non-zero step for the minute or second spinner of a time select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Interval(NonZeroU8);

impl Interval {
    /// # Errors
    /// Returns `ConfigError::Interval` if the value is 0.
    pub fn new(value: u8) -> Result<Self, ConfigError> {
        NonZeroU8::new(value)
            .map(Self)
            .ok_or(ConfigError::Interval(value))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self(NonZeroU8::new(DEFAULT_INTERVAL).unwrap_or(NonZeroU8::MIN))
    }
}

impl TryFrom<u8> for Interval {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Interval> for u8 {
    fn from(interval: Interval) -> Self {
        interval.get()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
