use std::fmt;
use std::sync::Arc;

use chrono::Locale;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{
    resolve_locale, truncate_to_time_only, CalendarMode, DateValue, Interval, MonthRows, SingleValue,
    Unit, ValueShape, WeekDay, YearGridSize,
};

/// Errors raised while resolving picker options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Month rows outside 1..=12 or not dividing 12.
    #[error("Invalid month rows: {0} (must be between 1 and 12 and divide 12)")]
    MonthRows(u8),

    #[error("Invalid year rows: {0} (must be between 1 and 12)")]
    YearRows(u8),

    #[error("Invalid year columns: {0} (must be between 1 and 12)")]
    YearCols(u8),

    /// Minute or second step of zero.
    #[error("Invalid interval: {0} (must be at least 1)")]
    Interval(u8),

    #[error("Invalid week day: {0}")]
    WeekDay(String),
}

/// Renders a date as text, e.g. a header label or a cell caption
pub type DateFormatter = Arc<dyn Fn(&DateValue) -> String + Send + Sync>;

/// Decides something about a date, e.g. whether its cell is disabled
pub type DatePredicate = Arc<dyn Fn(&DateValue) -> bool + Send + Sync>;

/// Renders the caption of a week-day column
pub type WeekDayFormatter = Arc<dyn Fn(WeekDay) -> String + Send + Sync>;

/// Caller-supplied strategies. Every hook is optional; a missing hook falls
/// back to the matching format or to the min/max limits.
#[derive(Clone, Default)]
pub struct Hooks {
    pub is_day_disabled:     Option<DatePredicate>,
    pub is_month_disabled:   Option<DatePredicate>,
    pub is_year_disabled:    Option<DatePredicate>,
    /// Header label of the day view
    pub month_formatter:     Option<DateFormatter>,
    /// Header label of the month view
    pub year_formatter:      Option<DateFormatter>,
    pub day_btn_formatter:   Option<DateFormatter>,
    pub month_btn_formatter: Option<DateFormatter>,
    pub year_btn_formatter:  Option<DateFormatter>,
    pub day_btn_css_class:   Option<DateFormatter>,
    pub month_btn_css_class: Option<DateFormatter>,
    pub year_btn_css_class:  Option<DateFormatter>,
    pub week_day_formatter:  Option<WeekDayFormatter>,
}

impl Hooks {
    fn names(&self) -> Vec<&'static str> {
        let set = [
            ("is_day_disabled", self.is_day_disabled.is_some()),
            ("is_month_disabled", self.is_month_disabled.is_some()),
            ("is_year_disabled", self.is_year_disabled.is_some()),
            ("month_formatter", self.month_formatter.is_some()),
            ("year_formatter", self.year_formatter.is_some()),
            ("day_btn_formatter", self.day_btn_formatter.is_some()),
            ("month_btn_formatter", self.month_btn_formatter.is_some()),
            ("year_btn_formatter", self.year_btn_formatter.is_some()),
            ("day_btn_css_class", self.day_btn_css_class.is_some()),
            ("month_btn_css_class", self.month_btn_css_class.is_some()),
            ("year_btn_css_class", self.year_btn_css_class.is_some()),
            ("week_day_formatter", self.week_day_formatter.is_some()),
        ];
        set.into_iter()
            .filter_map(|(name, present)| present.then_some(name))
            .collect()
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

fn same_hook<T: ?Sized>(a: &Option<Arc<T>>, b: &Option<Arc<T>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        _ => false,
    }
}

/// Hooks are equal when they share the same closures.
impl PartialEq for Hooks {
    fn eq(&self, other: &Self) -> bool {
        same_hook(&self.is_day_disabled, &other.is_day_disabled)
            && same_hook(&self.is_month_disabled, &other.is_month_disabled)
            && same_hook(&self.is_year_disabled, &other.is_year_disabled)
            && same_hook(&self.month_formatter, &other.month_formatter)
            && same_hook(&self.year_formatter, &other.year_formatter)
            && same_hook(&self.day_btn_formatter, &other.day_btn_formatter)
            && same_hook(&self.month_btn_formatter, &other.month_btn_formatter)
            && same_hook(&self.year_btn_formatter, &other.year_btn_formatter)
            && same_hook(&self.day_btn_css_class, &other.day_btn_css_class)
            && same_hook(&self.month_btn_css_class, &other.month_btn_css_class)
            && same_hook(&self.year_btn_css_class, &other.year_btn_css_class)
            && same_hook(&self.week_day_formatter, &other.week_day_formatter)
    }
}

/// Picker options as supplied by the host. Every field is optional and the
/// JSON form uses camelCase names.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawOptions {
    pub format: Option<String>,
    pub min: Option<SingleValue>,
    pub max: Option<SingleValue>,
    pub min_time: Option<SingleValue>,
    pub max_time: Option<SingleValue>,
    pub allow_multi_select: Option<bool>,
    pub first_day_of_week: Option<WeekDay>,
    pub locale: Option<String>,
    pub un_select_on_click: Option<bool>,
    pub show_near_month_days: Option<bool>,
    pub show_go_to_current: Option<bool>,
    pub is_nav_header_btn_clickable: Option<bool>,
    pub week_day_format: Option<String>,
    pub month_format: Option<String>,
    pub day_btn_format: Option<String>,
    pub year_format: Option<String>,
    pub month_btn_format: Option<String>,
    pub year_btn_format: Option<String>,
    pub num_of_month_rows: Option<u8>,
    pub num_of_year_rows: Option<u8>,
    pub num_of_year_cols: Option<u8>,
    pub multiple_years_navigate_by: Option<u8>,
    pub show_multiple_years_navigation: Option<bool>,
    pub minutes_interval: Option<u8>,
    pub seconds_interval: Option<u8>,
    pub show_seconds: Option<bool>,
    pub show_twenty_four_hours: Option<bool>,
    pub time_separator: Option<String>,
    pub hours12_format: Option<String>,
    pub hours24_format: Option<String>,
    pub meridiem_format: Option<String>,
    pub minutes_format: Option<String>,
    pub seconds_format: Option<String>,
    pub returned_value_type: Option<ValueShape>,
    #[serde(skip)]
    pub hooks: Hooks,
}

/// Resolved picker configuration. Built by [`resolve_config`]; every option
/// holds either its kind default or the caller's override.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub mode: CalendarMode,
    /// Format of string values
    pub format: String,
    pub min: Option<DateValue>,
    pub max: Option<DateValue>,
    /// Earliest time of day, on the time-only reference day
    pub min_time: Option<DateValue>,
    /// Latest time of day, on the time-only reference day
    pub max_time: Option<DateValue>,
    pub allow_multi_select: bool,
    pub first_day_of_week: WeekDay,
    pub locale: String,
    pub un_select_on_click: bool,
    pub show_near_month_days: bool,
    pub show_go_to_current: bool,
    pub is_nav_header_btn_clickable: bool,
    pub week_day_format: String,
    /// Header format of the day view
    pub month_format: String,
    pub day_btn_format: String,
    /// Header format of the month view
    pub year_format: String,
    pub month_btn_format: String,
    pub year_btn_format: String,
    pub month_rows: MonthRows,
    pub year_grid: YearGridSize,
    pub multiple_years_navigate_by: u8,
    pub show_multiple_years_navigation: bool,
    pub minutes_interval: Interval,
    pub seconds_interval: Interval,
    pub show_seconds: bool,
    pub show_twenty_four_hours: bool,
    pub time_separator: String,
    pub hours12_format: String,
    pub hours24_format: String,
    pub meridiem_format: String,
    pub minutes_format: String,
    pub seconds_format: String,
    /// Shape emitted on change; `None` keeps the shape of the incoming value
    pub returned_value_type: Option<ValueShape>,
    pub hooks: Hooks,
    pub(crate) resolved_locale: Locale,
}

/// Value format used by a picker kind when none is given
pub const fn default_format(mode: CalendarMode) -> &'static str {
    match mode {
        CalendarMode::Day => DEFAULT_DAY_FORMAT,
        CalendarMode::DayTime => DEFAULT_DAY_TIME_FORMAT,
        CalendarMode::Time => DEFAULT_TIME_FORMAT,
        CalendarMode::Month => DEFAULT_MONTH_FORMAT,
        CalendarMode::Year => DEFAULT_YEAR_FORMAT,
    }
}

impl Config {
    /// Configuration of a picker kind with no options set
    pub fn defaults(mode: CalendarMode) -> Self {
        Self {
            mode,
            format: default_format(mode).to_owned(),
            min: None,
            max: None,
            min_time: None,
            max_time: None,
            allow_multi_select: false,
            first_day_of_week: WeekDay::Su,
            locale: DEFAULT_LOCALE.to_owned(),
            un_select_on_click: true,
            show_near_month_days: true,
            show_go_to_current: true,
            is_nav_header_btn_clickable: false,
            week_day_format: DEFAULT_WEEK_DAY_FORMAT.to_owned(),
            month_format: DEFAULT_MONTH_HEADER_FORMAT.to_owned(),
            day_btn_format: DEFAULT_DAY_BTN_FORMAT.to_owned(),
            year_format: DEFAULT_YEAR_HEADER_FORMAT.to_owned(),
            month_btn_format: DEFAULT_MONTH_BTN_FORMAT.to_owned(),
            year_btn_format: DEFAULT_YEAR_BTN_FORMAT.to_owned(),
            month_rows: MonthRows::default(),
            year_grid: YearGridSize::default(),
            multiple_years_navigate_by: DEFAULT_MULTIPLE_YEARS_NAVIGATE_BY,
            show_multiple_years_navigation: false,
            minutes_interval: Interval::default(),
            seconds_interval: Interval::default(),
            show_seconds: false,
            show_twenty_four_hours: false,
            time_separator: DEFAULT_TIME_SEPARATOR.to_owned(),
            hours12_format: DEFAULT_HOURS_12_FORMAT.to_owned(),
            hours24_format: DEFAULT_HOURS_24_FORMAT.to_owned(),
            meridiem_format: DEFAULT_MERIDIEM_FORMAT.to_owned(),
            minutes_format: DEFAULT_MINUTES_FORMAT.to_owned(),
            seconds_format: DEFAULT_SECONDS_FORMAT.to_owned(),
            returned_value_type: None,
            hooks: Hooks::default(),
            resolved_locale: resolve_locale(DEFAULT_LOCALE),
        }
    }

    /// The locale used for display text
    #[inline]
    pub const fn chrono_locale(&self) -> Locale {
        self.resolved_locale
    }

    /// Comparison unit of this picker
    #[inline]
    pub const fn granularity(&self) -> Unit {
        self.mode.granularity()
    }

    /// Shape to emit for a value that came in as `input`
    pub fn output_shape(&self, input: ValueShape) -> ValueShape {
        self.returned_value_type.unwrap_or(input)
    }

    /// Formats `date` for display in the configured locale
    pub fn display(&self, date: &DateValue, format: &str) -> String {
        date.format_localized(format, self.resolved_locale)
    }

    /// Configuration of the month picker shown from the day view header
    pub fn month_view_config(&self) -> Self {
        self.sub_view(CalendarMode::Month)
    }

    /// Configuration of the year picker shown from the month view header
    pub fn year_view_config(&self) -> Self {
        self.sub_view(CalendarMode::Year)
    }

    fn sub_view(&self, mode: CalendarMode) -> Self {
        Self {
            mode,
            allow_multi_select: false,
            is_nav_header_btn_clickable: true,
            ..self.clone()
        }
    }
}

macro_rules! merge {
    ($config:ident, $raw:ident; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = &$raw.$field {
                $config.$field = ToOwned::to_owned(value);
            }
        )+
    };
}

/// Limits parse forgivingly. A limit that still does not parse is kept as
/// an invalid date, which no value compares as inside of.
pub(crate) fn resolve_bound(value: Option<&SingleValue>, format: &str, name: &'static str) -> Option<DateValue> {
    let date = value?.to_limit(format);
    if !date.is_valid() {
        tracing::warn!(bound = name, ?value, %format, "unparsable limit, nothing will satisfy it");
    }
    Some(date)
}

/// Time limits parse with the value format, falling back to `HH:mm:ss`
pub(crate) fn resolve_time_bound(value: Option<&SingleValue>, format: &str, name: &'static str) -> Option<DateValue> {
    let value = value?;
    let date = Some(value.to_limit(format))
        .filter(DateValue::is_valid)
        .unwrap_or_else(|| value.to_limit(TIME_ONLY_FORMAT));
    if !date.is_valid() {
        tracing::warn!(bound = name, ?value, %format, "unparsable time limit, nothing will satisfy it");
    }
    Some(truncate_to_time_only(&date))
}

/// Merges `raw` over the defaults of `mode`.
///
/// # Errors
/// Returns `ConfigError` when a grid dimension or interval is out of range.
pub fn resolve_config(mode: CalendarMode, raw: &RawOptions) -> Result<Config, ConfigError> {
    let mut config = Config::defaults(mode);

    merge!(config, raw;
        format,
        allow_multi_select,
        first_day_of_week,
        locale,
        un_select_on_click,
        show_near_month_days,
        show_go_to_current,
        is_nav_header_btn_clickable,
        week_day_format,
        month_format,
        day_btn_format,
        year_format,
        month_btn_format,
        year_btn_format,
        multiple_years_navigate_by,
        show_multiple_years_navigation,
        show_seconds,
        show_twenty_four_hours,
        time_separator,
        hours12_format,
        hours24_format,
        meridiem_format,
        minutes_format,
        seconds_format,
    );

    if let Some(rows) = raw.num_of_month_rows {
        config.month_rows = MonthRows::new(rows)?;
    }
    config.year_grid = YearGridSize::new(
        raw.num_of_year_rows.unwrap_or(config.year_grid.rows()),
        raw.num_of_year_cols.unwrap_or(config.year_grid.cols()),
    )?;
    if let Some(interval) = raw.minutes_interval {
        config.minutes_interval = Interval::new(interval)?;
    }
    if let Some(interval) = raw.seconds_interval {
        config.seconds_interval = Interval::new(interval)?;
    }

    config.min = resolve_bound(raw.min.as_ref(), &config.format, "min");
    config.max = resolve_bound(raw.max.as_ref(), &config.format, "max");
    config.min_time = resolve_time_bound(raw.min_time.as_ref(), &config.format, "minTime");
    config.max_time = resolve_time_bound(raw.max_time.as_ref(), &config.format, "maxTime");

    config.returned_value_type = raw.returned_value_type;
    config.resolved_locale = resolve_locale(&config.locale);
    config.hooks = raw.hooks.clone();

    tracing::debug!(
        %mode,
        format = %config.format,
        locale = %config.locale,
        multi = config.allow_multi_select,
        min = ?config.min,
        max = ?config.max,
        "resolved picker config"
    );
    Ok(config)
}

fn bound_changed(previous: Option<&DateValue>, current: Option<&DateValue>) -> bool {
    match (previous, current) {
        (None, Some(_)) => true,
        (Some(previous), Some(current)) => !previous.is_same(current, Unit::Day),
        _ => false,
    }
}

/// Whether a view must return to its default display date because `min` or
/// `max` was added or moved to another day.
pub fn should_reset_current_view(previous: &Config, current: &Config) -> bool {
    bound_changed(previous.min.as_ref(), current.min.as_ref())
        || bound_changed(previous.max.as_ref(), current.max.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::in_range;
    use crate::test_utils::{date, datetime};

    #[test]
    fn test_default_formats_per_mode() {
        struct TestCase {
            mode:     CalendarMode,
            expected: &'static str,
        }

        let cases = [
            TestCase {
                mode:     CalendarMode::Day,
                expected: "DD-MM-YYYY",
            },
            TestCase {
                mode:     CalendarMode::DayTime,
                expected: "DD-MM-YYYY HH:mm:ss",
            },
            TestCase {
                mode:     CalendarMode::Time,
                expected: "HH:mm:ss",
            },
            TestCase {
                mode:     CalendarMode::Month,
                expected: "MMM, YYYY",
            },
            TestCase {
                mode:     CalendarMode::Year,
                expected: "YYYY",
            },
        ];

        for case in &cases {
            let config = resolve_config(case.mode, &RawOptions::default()).unwrap();
            assert_eq!(config.format, case.expected, "mode {}", case.mode);
            assert_eq!(config, Config::defaults(case.mode));
        }
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let raw = RawOptions {
            format: Some("YYYY-MM-DD".to_owned()),
            min: Some("2016-10-25".into()),
            max: Some(date(2017, 10, 25).into()),
            allow_multi_select: Some(true),
            first_day_of_week: Some(WeekDay::Mo),
            hooks: Hooks {
                is_day_disabled: Some(Arc::new(|_: &DateValue| false)),
                ..Hooks::default()
            },
            ..RawOptions::default()
        };

        let first = resolve_config(CalendarMode::Day, &raw).unwrap();
        let second = resolve_config(CalendarMode::Day, &raw).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.min, Some(date(2016, 10, 25)));
        assert_eq!(first.max, Some(date(2017, 10, 25)));
        assert!(first.allow_multi_select);
        assert_eq!(first.first_day_of_week, WeekDay::Mo);
    }

    #[test]
    fn test_limits_parse_forgivingly() {
        struct TestCase {
            mode:     CalendarMode,
            min:      &'static str,
            expected: DateValue,
        }

        let cases = [
            TestCase {
                mode:     CalendarMode::Day,
                min:      "5-10-2016",
                expected: date(2016, 10, 5),
            },
            TestCase {
                mode:     CalendarMode::DayTime,
                min:      "25-10-2016",
                expected: date(2016, 10, 25),
            },
            TestCase {
                mode:     CalendarMode::DayTime,
                min:      "25-10-2016 9:5",
                expected: datetime(2016, 10, 25, 9, 5, 0),
            },
        ];

        for case in &cases {
            let raw = RawOptions {
                min: Some(case.min.into()),
                ..RawOptions::default()
            };
            let config = resolve_config(case.mode, &raw).unwrap();
            assert_eq!(config.min, Some(case.expected), "min {}", case.min);
        }
    }

    #[test]
    fn test_unparsable_limit_is_kept_invalid() {
        let raw = RawOptions {
            min: Some("25/10/2016".into()),
            ..RawOptions::default()
        };
        let config = resolve_config(CalendarMode::Day, &raw).unwrap();
        assert_eq!(config.min, Some(DateValue::Invalid));
        assert!(!in_range(&date(2016, 10, 25), config.min.as_ref(), None, Unit::Day));
    }

    #[test]
    fn test_time_limits_are_time_only() {
        let raw = RawOptions {
            min_time: Some("08:00:00".into()),
            max_time: Some("22-03-2017 18:30:00".into()),
            ..RawOptions::default()
        };
        let config = resolve_config(CalendarMode::DayTime, &raw).unwrap();

        let min_time = config.min_time.unwrap();
        let max_time = config.max_time.unwrap();
        assert_eq!(min_time, truncate_to_time_only(&datetime(2000, 1, 1, 8, 0, 0)));
        assert_eq!(max_time, truncate_to_time_only(&datetime(2000, 1, 1, 18, 30, 0)));
    }

    #[test]
    fn test_invalid_dimensions() {
        struct TestCase {
            raw:      RawOptions,
            expected: ConfigError,
        }

        let cases = [
            TestCase {
                raw:      RawOptions {
                    num_of_month_rows: Some(5),
                    ..RawOptions::default()
                },
                expected: ConfigError::MonthRows(5),
            },
            TestCase {
                raw:      RawOptions {
                    num_of_year_rows: Some(0),
                    ..RawOptions::default()
                },
                expected: ConfigError::YearRows(0),
            },
            TestCase {
                raw:      RawOptions {
                    num_of_year_cols: Some(13),
                    ..RawOptions::default()
                },
                expected: ConfigError::YearCols(13),
            },
            TestCase {
                raw:      RawOptions {
                    seconds_interval: Some(0),
                    ..RawOptions::default()
                },
                expected: ConfigError::Interval(0),
            },
        ];

        for case in &cases {
            assert_eq!(
                resolve_config(CalendarMode::Month, &case.raw),
                Err(case.expected.clone())
            );
        }
    }

    #[test]
    fn test_raw_options_from_json() {
        let raw: RawOptions = serde_json::from_str(
            r#"{
                "format": "YYYY-MM-DD",
                "firstDayOfWeek": "mo",
                "numOfMonthRows": 4,
                "minutesInterval": 15,
                "returnedValueType": "stringArray",
                "unSelectOnClick": false
            }"#,
        )
        .unwrap();

        let config = resolve_config(CalendarMode::Day, &raw).unwrap();
        assert_eq!(config.format, "YYYY-MM-DD");
        assert_eq!(config.first_day_of_week, WeekDay::Mo);
        assert_eq!(config.month_rows.columns(), 3);
        assert_eq!(config.minutes_interval.get(), 15);
        assert!(!config.un_select_on_click);
        assert_eq!(
            config.output_shape(ValueShape::SingleDate),
            ValueShape::StringArray
        );
        assert_eq!(
            Config::defaults(CalendarMode::Day).output_shape(ValueShape::SingleDate),
            ValueShape::SingleDate
        );
    }

    #[test]
    fn test_sub_view_configs() {
        let raw = RawOptions {
            allow_multi_select: Some(true),
            ..RawOptions::default()
        };
        let config = resolve_config(CalendarMode::Day, &raw).unwrap();

        let month = config.month_view_config();
        assert_eq!(month.mode, CalendarMode::Month);
        assert!(!month.allow_multi_select);
        assert!(month.is_nav_header_btn_clickable);
        assert_eq!(month.format, config.format);

        assert_eq!(config.year_view_config().mode, CalendarMode::Year);
    }

    #[test]
    fn test_should_reset_current_view() {
        let base = Config::defaults(CalendarMode::Day);
        let with_min = Config {
            min: Some(date(2017, 1, 1)),
            ..base.clone()
        };
        let same_day = Config {
            min: Some(datetime(2017, 1, 1, 12, 0, 0)),
            ..base.clone()
        };
        let moved = Config {
            min: Some(date(2017, 1, 2)),
            ..base.clone()
        };

        assert!(should_reset_current_view(&base, &with_min));
        assert!(!should_reset_current_view(&with_min, &same_day));
        assert!(should_reset_current_view(&with_min, &moved));
        assert!(!should_reset_current_view(&with_min, &base));
        assert!(!should_reset_current_view(&base, &base));
    }

    #[test]
    fn test_hooks_compare_by_identity() {
        let predicate: DatePredicate = Arc::new(|_: &DateValue| true);
        let a = Hooks {
            is_day_disabled: Some(predicate.clone()),
            ..Hooks::default()
        };
        let b = Hooks {
            is_day_disabled: Some(predicate),
            ..Hooks::default()
        };
        let c = Hooks {
            is_day_disabled: Some(Arc::new(|_: &DateValue| true)),
            ..Hooks::default()
        };

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(format!("{a:?}"), r#"{"is_day_disabled"}"#);
    }
}
