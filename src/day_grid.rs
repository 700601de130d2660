//! Day view: the weeks of one month, with week-day captions and navigation.

use serde::Serialize;

use crate::consts::{DAYS_IN_WEEK, DAY_GRID_CELLS};
use crate::{
    should_show_current_at, Config, DateValue, Direction, Grid, Navigation, Selection, Unit, WeekDay,
};

/// One day button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date:          DateValue,
    pub selected:      bool,
    pub current_month: bool,
    pub prev_month:    bool,
    pub next_month:    bool,
    pub current_day:   bool,
    pub disabled:      bool,
    pub text:          String,
    pub css_class:     String,
}

/// Everything a day view renders for one anchor month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayView {
    pub anchor:       DateValue,
    pub header:       String,
    pub weekdays:     Vec<String>,
    pub weeks:        Grid<DayCell>,
    pub show_left:    bool,
    pub show_right:   bool,
    pub show_current: bool,
}

/// The weeks of `anchor`'s month. See [`generate_month_grid_at`].
pub fn generate_month_grid(config: &Config, anchor: &DateValue, selection: &Selection) -> Grid<DayCell> {
    generate_month_grid_at(config, anchor, selection, &DateValue::now())
}

/// Six weeks of consecutive days starting on the configured first day of the
/// week on or before the 1st of `anchor`'s month. When near-month days are
/// hidden, the last week is dropped if it holds no day of the anchor month.
pub fn generate_month_grid_at(
    config: &Config,
    anchor: &DateValue,
    selection: &Selection,
    today: &DateValue,
) -> Grid<DayCell> {
    let Some(first) = first_day_of_board(anchor, config.first_day_of_week) else {
        tracing::warn!("cannot build a day grid around an invalid anchor");
        return Grid::new();
    };

    let prev_month = anchor.subtract(1, Unit::Month);
    let next_month = anchor.add(1, Unit::Month);

    let cells: Vec<DayCell> = std::iter::successors(Some(first), |day| Some(day.add(1, Unit::Day)))
        .take(DAY_GRID_CELLS)
        .map(|date| DayCell {
            selected: selection.contains(&date, Unit::Day),
            current_month: date.is_same(anchor, Unit::Month),
            prev_month: date.is_same(&prev_month, Unit::Month),
            next_month: date.is_same(&next_month, Unit::Month),
            current_day: date.is_same(today, Unit::Day),
            disabled: is_date_disabled(config, &date),
            text: day_btn_text(config, &date),
            css_class: day_btn_css_class(config, &date),
            date,
        })
        .collect();

    let mut weeks: Grid<DayCell> = cells.chunks(DAYS_IN_WEEK).map(<[DayCell]>::to_vec).collect();

    if !config.show_near_month_days && weeks.last().is_some_and(|week| !week.iter().any(|day| day.current_month)) {
        weeks.pop();
    }

    tracing::trace!(anchor = %anchor, weeks = weeks.len(), "generated day grid");
    weeks
}

fn first_day_of_board(anchor: &DateValue, first_day_of_week: WeekDay) -> Option<DateValue> {
    let start = anchor.start_of(Unit::Month);
    let weekday = start.weekday()?;
    let offset = (weekday.index() + 7 - first_day_of_week.index()) % 7;
    Some(start.subtract(i64::from(offset), Unit::Day))
}

/// Disabled by the caller's predicate if one is set, else by min/max at day
/// granularity
pub fn is_date_disabled(config: &Config, date: &DateValue) -> bool {
    if let Some(is_disabled) = &config.hooks.is_day_disabled {
        return is_disabled(date);
    }

    config.min.is_some_and(|min| date.is_before(&min, Unit::Day))
        || config.max.is_some_and(|max| date.is_after(&max, Unit::Day))
}

pub fn day_btn_text(config: &Config, date: &DateValue) -> String {
    match &config.hooks.day_btn_formatter {
        Some(formatter) => formatter(date),
        None => config.display(date, &config.day_btn_format),
    }
}

pub fn day_btn_css_class(config: &Config, date: &DateValue) -> String {
    config
        .hooks
        .day_btn_css_class
        .as_ref()
        .map(|class| class(date))
        .unwrap_or_default()
}

pub fn header_label(config: &Config, anchor: &DateValue) -> String {
    match &config.hooks.month_formatter {
        Some(formatter) => formatter(anchor),
        None => config.display(anchor, &config.month_format),
    }
}

/// The seven week days in display order
pub fn generate_weekdays(first_day_of_week: WeekDay) -> [WeekDay; DAYS_IN_WEEK] {
    let start = first_day_of_week.index() as usize;
    std::array::from_fn(|offset| WeekDay::ALL[(start + offset) % DAYS_IN_WEEK])
}

/// Caption of a week-day column
pub fn weekday_name(config: &Config, weekday: WeekDay) -> String {
    if let Some(formatter) = &config.hooks.week_day_formatter {
        return formatter(weekday);
    }

    // 1970-01-04 was a Sunday
    let sample = DateValue::from_ymd(1970, 1, 4 + weekday.index());
    config.display(&sample, &config.week_day_format)
}

pub fn should_show_left(min: Option<&DateValue>, anchor: &DateValue) -> bool {
    min.is_none_or(|min| min.is_before(anchor, Unit::Month))
}

pub fn should_show_right(max: Option<&DateValue>, anchor: &DateValue) -> bool {
    max.is_none_or(|max| max.is_after(anchor, Unit::Month))
}

/// Moves the view one month
pub fn navigate(anchor: &DateValue, direction: Direction) -> Navigation {
    Navigation {
        from: *anchor,
        to:   anchor.add(direction.sign(), Unit::Month),
    }
}

/// Builds the day view for `anchor`
pub fn set_view(config: &Config, anchor: &DateValue, selection: &Selection) -> DayView {
    set_view_at(config, anchor, selection, &DateValue::now())
}

/// Same as [`set_view`] with an explicit `today`
pub fn set_view_at(config: &Config, anchor: &DateValue, selection: &Selection, today: &DateValue) -> DayView {
    DayView {
        anchor:       *anchor,
        header:       header_label(config, anchor),
        weekdays:     generate_weekdays(config.first_day_of_week)
            .into_iter()
            .map(|weekday| weekday_name(config, weekday))
            .collect(),
        weeks:        generate_month_grid_at(config, anchor, selection, today),
        show_left:    should_show_left(config.min.as_ref(), anchor),
        show_right:   should_show_right(config.max.as_ref(), anchor),
        show_current: should_show_current_at(
            config.show_go_to_current,
            config.mode,
            config.min.as_ref(),
            config.max.as_ref(),
            today,
        ),
    }
}
