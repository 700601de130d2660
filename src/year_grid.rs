//! Year view: a block of consecutive years around the anchor.

use serde::Serialize;

use crate::{should_show_current_at, Config, DateValue, Direction, Grid, Navigation, Selection, Unit};

/// One year button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearCell {
    pub date:         DateValue,
    pub selected:     bool,
    pub current_year: bool,
    pub disabled:     bool,
    pub text:         String,
    pub css_class:    String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearView {
    pub anchor:       DateValue,
    pub header:       String,
    pub years:        Grid<YearCell>,
    pub show_left:    bool,
    pub show_right:   bool,
    pub show_current: bool,
}

pub fn generate_years(config: &Config, anchor: &DateValue, selection: &Selection) -> Grid<YearCell> {
    generate_years_at(config, anchor, selection, &DateValue::now())
}

/// `rows * cols` consecutive years, the first one `rows * cols / 2` (rounded
/// down) years before the anchor year.
pub fn generate_years_at(
    config: &Config,
    anchor: &DateValue,
    selection: &Selection,
    today: &DateValue,
) -> Grid<YearCell> {
    let size = config.year_grid;
    let start = anchor
        .start_of(Unit::Year)
        .subtract(i64::from(size.cells() / 2), Unit::Year);
    if !start.is_valid() {
        tracing::warn!("cannot build a year grid around an invalid anchor");
        return Grid::new();
    }

    (0..size.rows())
        .map(|row| {
            (0..size.cols())
                .map(|col| {
                    let offset = u16::from(row) * u16::from(size.cols()) + u16::from(col);
                    let date = start.add(i64::from(offset), Unit::Year);
                    YearCell {
                        selected: selection.contains(&date, Unit::Year),
                        current_year: date.is_same(today, Unit::Year),
                        disabled: is_year_disabled(config, &date),
                        text: year_btn_text(config, &date),
                        css_class: year_btn_css_class(config, &date),
                        date,
                    }
                })
                .collect()
        })
        .collect()
}

pub fn is_year_disabled(config: &Config, date: &DateValue) -> bool {
    if let Some(is_disabled) = &config.hooks.is_year_disabled {
        return is_disabled(date);
    }

    config.min.is_some_and(|min| date.is_before(&min, Unit::Year))
        || config.max.is_some_and(|max| date.is_after(&max, Unit::Year))
}

pub fn year_btn_text(config: &Config, date: &DateValue) -> String {
    match &config.hooks.year_btn_formatter {
        Some(formatter) => formatter(date),
        None => config.display(date, &config.year_btn_format),
    }
}

pub fn year_btn_css_class(config: &Config, date: &DateValue) -> String {
    config
        .hooks
        .year_btn_css_class
        .as_ref()
        .map(|class| class(date))
        .unwrap_or_default()
}

pub fn header_label(config: &Config, anchor: &DateValue) -> String {
    match &config.hooks.year_formatter {
        Some(formatter) => formatter(anchor),
        None => config.display(anchor, &config.year_format),
    }
}

/// Left navigation is open while `min` lies before the first year shown
pub fn should_show_left(min: Option<&DateValue>, years: &Grid<YearCell>) -> bool {
    let first = years.first().and_then(|row| row.first());
    match (min, first) {
        (Some(min), Some(first)) => min.is_before(&first.date, Unit::Year),
        _ => true,
    }
}

/// Right navigation is open while `max` lies after the last year shown
pub fn should_show_right(max: Option<&DateValue>, years: &Grid<YearCell>) -> bool {
    let last = years.last().and_then(|row| row.last());
    match (max, last) {
        (Some(max), Some(last)) => max.is_after(&last.date, Unit::Year),
        _ => true,
    }
}

/// Moves the view by a whole grid of years
pub fn navigate(config: &Config, anchor: &DateValue, direction: Direction) -> Navigation {
    let years = direction.sign() * i64::from(config.year_grid.cells());
    Navigation {
        from: *anchor,
        to:   anchor.add(years, Unit::Year),
    }
}

pub fn set_view(config: &Config, anchor: &DateValue, selection: &Selection) -> YearView {
    set_view_at(config, anchor, selection, &DateValue::now())
}

pub fn set_view_at(config: &Config, anchor: &DateValue, selection: &Selection, today: &DateValue) -> YearView {
    let years = generate_years_at(config, anchor, selection, today);

    YearView {
        anchor:       *anchor,
        header:       header_label(config, anchor),
        show_left:    should_show_left(config.min.as_ref(), &years),
        show_right:   should_show_right(config.max.as_ref(), &years),
        show_current: should_show_current_at(
            config.show_go_to_current,
            config.mode,
            config.min.as_ref(),
            config.max.as_ref(),
            today,
        ),
        years,
    }
}
