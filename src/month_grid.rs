//! Month view: the twelve months of one year.

use serde::Serialize;

use crate::{should_show_current_at, Config, DateValue, Direction, Grid, Navigation, Selection, Unit};

/// One month button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthCell {
    pub date:          DateValue,
    pub selected:      bool,
    pub current_month: bool,
    pub disabled:      bool,
    pub text:          String,
    pub css_class:     String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    pub anchor:               DateValue,
    pub header:               String,
    pub months:               Grid<MonthCell>,
    pub show_left:            bool,
    pub show_right:           bool,
    pub show_secondary_left:  bool,
    pub show_secondary_right: bool,
    pub show_current:         bool,
}

pub fn generate_months(config: &Config, anchor: &DateValue, selection: &Selection) -> Grid<MonthCell> {
    generate_months_at(config, anchor, selection, &DateValue::now())
}

/// January through December of `anchor`'s year, in the configured number of
/// rows.
pub fn generate_months_at(
    config: &Config,
    anchor: &DateValue,
    selection: &Selection,
    today: &DateValue,
) -> Grid<MonthCell> {
    let start = anchor.start_of(Unit::Year);
    if !start.is_valid() {
        tracing::warn!("cannot build a month grid around an invalid anchor");
        return Grid::new();
    }

    let rows = config.month_rows.get();
    let cols = config.month_rows.columns();

    (0..rows)
        .map(|row| {
            (0..cols)
                .map(|col| {
                    let date = start.add(i64::from(row * cols + col), Unit::Month);
                    MonthCell {
                        selected: selection.contains(&date, Unit::Month),
                        current_month: date.is_same(today, Unit::Month),
                        disabled: is_month_disabled(config, &date),
                        text: month_btn_text(config, &date),
                        css_class: month_btn_css_class(config, &date),
                        date,
                    }
                })
                .collect()
        })
        .collect()
}

pub fn is_month_disabled(config: &Config, date: &DateValue) -> bool {
    if let Some(is_disabled) = &config.hooks.is_month_disabled {
        return is_disabled(date);
    }

    config.min.is_some_and(|min| date.is_before(&min, Unit::Month))
        || config.max.is_some_and(|max| date.is_after(&max, Unit::Month))
}

pub fn month_btn_text(config: &Config, date: &DateValue) -> String {
    match &config.hooks.month_btn_formatter {
        Some(formatter) => formatter(date),
        None => config.display(date, &config.month_btn_format),
    }
}

pub fn month_btn_css_class(config: &Config, date: &DateValue) -> String {
    config
        .hooks
        .month_btn_css_class
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

pub fn should_show_left(min: Option<&DateValue>, anchor: &DateValue) -> bool {
    min.is_none_or(|min| min.is_before(anchor, Unit::Year))
}

pub fn should_show_right(max: Option<&DateValue>, anchor: &DateValue) -> bool {
    max.is_none_or(|max| max.is_after(anchor, Unit::Year))
}

/// Moves the view one year
pub fn navigate(anchor: &DateValue, direction: Direction) -> Navigation {
    Navigation {
        from: *anchor,
        to:   anchor.add(direction.sign(), Unit::Year),
    }
}

/// Moves the view by the configured multi-year step
pub fn navigate_secondary(config: &Config, anchor: &DateValue, direction: Direction) -> Navigation {
    let years = direction.sign() * i64::from(config.multiple_years_navigate_by);
    Navigation {
        from: *anchor,
        to:   anchor.add(years, Unit::Year),
    }
}

pub fn set_view(config: &Config, anchor: &DateValue, selection: &Selection) -> MonthView {
    set_view_at(config, anchor, selection, &DateValue::now())
}

pub fn set_view_at(config: &Config, anchor: &DateValue, selection: &Selection, today: &DateValue) -> MonthView {
    let show_left = should_show_left(config.min.as_ref(), anchor);
    let show_right = should_show_right(config.max.as_ref(), anchor);

    MonthView {
        anchor: *anchor,
        header: header_label(config, anchor),
        months: generate_months_at(config, anchor, selection, today),
        show_left,
        show_right,
        show_secondary_left: config.show_multiple_years_navigation && show_left,
        show_secondary_right: config.show_multiple_years_navigation && show_right,
        show_current: should_show_current_at(
            config.show_go_to_current,
            config.mode,
            config.min.as_ref(),
            config.max.as_ref(),
            today,
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_utils::{date, selection};
    use crate::{resolve_config, CalendarMode, Hooks, RawOptions};

    fn month_config(raw: &RawOptions) -> Config {
        resolve_config(CalendarMode::Month, raw).expect("valid month options")
    }

    #[test]
    fn test_grid_shape_per_row_count() {
        struct TestCase {
            rows: u8,
            cols: usize,
        }

        let cases = [
            TestCase { rows: 1, cols: 12 },
            TestCase { rows: 3, cols: 4 },
            TestCase { rows: 4, cols: 3 },
            TestCase { rows: 12, cols: 1 },
        ];

        for case in &cases {
            let raw = RawOptions {
                num_of_month_rows: Some(case.rows),
                ..RawOptions::default()
            };
            let grid = generate_months_at(&month_config(&raw), &date(2017, 6, 15), &Selection::new(), &date(2000, 1, 1));
            assert_eq!(grid.len(), usize::from(case.rows));
            assert!(grid.iter().all(|row| row.len() == case.cols), "rows {}", case.rows);
        }
    }

    #[test]
    fn test_twelve_consecutive_months_from_january() {
        let config = month_config(&RawOptions::default());
        let grid = generate_months_at(&config, &date(2017, 6, 15), &Selection::new(), &date(2017, 3, 3));
        let months: Vec<_> = grid.iter().flatten().collect();

        assert_eq!(months.len(), 12);
        for (index, cell) in (1..=12).zip(&months) {
            assert_eq!(cell.date, date(2017, index, 1));
        }
        assert_eq!(months[0].text, "Jan");

        let current: Vec<_> = months.iter().filter(|cell| cell.current_month).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].date, date(2017, 3, 1));
    }

    #[test]
    fn test_selected_and_disabled() {
        let raw = RawOptions {
            min: Some("Mar, 2017".into()),
            max: Some(date(2017, 10, 31).into()),
            ..RawOptions::default()
        };
        let config = month_config(&raw);
        let picked = selection(&[date(2017, 5, 20)]);
        let grid = generate_months_at(&config, &date(2017, 1, 1), &picked, &date(2000, 1, 1));
        let months: Vec<_> = grid.iter().flatten().collect();

        let selected: Vec<_> = months.iter().filter(|cell| cell.selected).map(|cell| cell.date).collect();
        assert_eq!(selected, vec![date(2017, 5, 1)]);

        let enabled: Vec<_> = months
            .iter()
            .filter(|cell| !cell.disabled)
            .filter_map(|cell| cell.date.month())
            .collect();
        assert_eq!(enabled, (3..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_hooks() {
        let raw = RawOptions {
            hooks: Hooks {
                is_month_disabled: Some(Arc::new(|month: &DateValue| month.month() == Some(2))),
                month_btn_formatter: Some(Arc::new(|month: &DateValue| month.format("MM"))),
                year_formatter: Some(Arc::new(|year: &DateValue| format!("Year {}", year.format("YYYY")))),
                ..Hooks::default()
            },
            ..RawOptions::default()
        };
        let config = month_config(&raw);

        assert!(is_month_disabled(&config, &date(2017, 2, 1)));
        assert!(!is_month_disabled(&config, &date(2017, 3, 1)));
        assert_eq!(month_btn_text(&config, &date(2017, 2, 1)), "02");
        assert_eq!(header_label(&config, &date(2017, 2, 1)), "Year 2017");
        assert_eq!(header_label(&month_config(&RawOptions::default()), &date(2017, 2, 1)), "2017");
    }

    #[test]
    fn test_navigation() {
        let anchor = date(2017, 6, 15);
        assert!(should_show_left(Some(&date(2016, 12, 31)), &anchor));
        assert!(!should_show_left(Some(&date(2017, 1, 1)), &anchor));
        assert!(should_show_right(None, &anchor));
        assert!(!should_show_right(Some(&date(2017, 12, 31)), &anchor));

        assert_eq!(navigate(&anchor, Direction::Right).to, date(2018, 6, 15));

        let config = month_config(&RawOptions::default());
        let step = navigate_secondary(&config, &anchor, Direction::Left);
        assert_eq!(step.from, anchor);
        assert_eq!(step.to, date(2007, 6, 15));
    }

    #[test]
    fn test_set_view_secondary_navigation() {
        let raw = RawOptions {
            show_multiple_years_navigation: Some(true),
            min: Some("Jan, 2017".into()),
            ..RawOptions::default()
        };
        let config = month_config(&raw);
        let view = set_view_at(&config, &date(2017, 6, 15), &Selection::new(), &date(2017, 6, 1));

        assert_eq!(view.header, "2017");
        assert!(!view.show_left);
        assert!(!view.show_secondary_left);
        assert!(view.show_right);
        assert!(view.show_secondary_right);
        assert!(view.show_current);
    }
}
