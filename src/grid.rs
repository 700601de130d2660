use serde::Serialize;

use crate::day_grid::{generate_month_grid_at, DayCell};
use crate::month_grid::{generate_months_at, MonthCell};
use crate::year_grid::{generate_years_at, YearCell};
use crate::{CalendarMode, Config, DateValue, Grid, Selection};

/// The grid of whichever view a picker kind shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "camelCase")]
pub enum CalendarGrid {
    Days(Grid<DayCell>),
    Months(Grid<MonthCell>),
    Years(Grid<YearCell>),
}

impl CalendarGrid {
    /// Number of rows
    pub fn len(&self) -> usize {
        match self {
            Self::Days(rows) => rows.len(),
            Self::Months(rows) => rows.len(),
            Self::Years(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Days(rows) => rows.is_empty(),
            Self::Months(rows) => rows.is_empty(),
            Self::Years(rows) => rows.is_empty(),
        }
    }
}

/// Grid of the view a picker of `kind` opens on. Time pickers have none.
pub fn generate_grid(
    kind: CalendarMode,
    config: &Config,
    anchor: &DateValue,
    selection: &Selection,
) -> Option<CalendarGrid> {
    generate_grid_at(kind, config, anchor, selection, &DateValue::now())
}

/// Same as [`generate_grid`] with an explicit `today`
pub fn generate_grid_at(
    kind: CalendarMode,
    config: &Config,
    anchor: &DateValue,
    selection: &Selection,
    today: &DateValue,
) -> Option<CalendarGrid> {
    match kind {
        CalendarMode::Day | CalendarMode::DayTime => Some(CalendarGrid::Days(generate_month_grid_at(
            config, anchor, selection, today,
        ))),
        CalendarMode::Month => Some(CalendarGrid::Months(generate_months_at(config, anchor, selection, today))),
        CalendarMode::Year => Some(CalendarGrid::Years(generate_years_at(config, anchor, selection, today))),
        CalendarMode::Time => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;
    use crate::{resolve_config, RawOptions};

    #[test]
    fn test_grid_per_kind() {
        struct TestCase {
            kind: CalendarMode,
            rows: Option<usize>,
        }

        let cases = [
            TestCase {
                kind: CalendarMode::Day,
                rows: Some(6),
            },
            TestCase {
                kind: CalendarMode::DayTime,
                rows: Some(6),
            },
            TestCase {
                kind: CalendarMode::Month,
                rows: Some(3),
            },
            TestCase {
                kind: CalendarMode::Year,
                rows: Some(4),
            },
            TestCase {
                kind: CalendarMode::Time,
                rows: None,
            },
        ];

        let anchor = date(2017, 4, 15);
        for case in &cases {
            let config = resolve_config(case.kind, &RawOptions::default()).expect("default options");
            let grid = generate_grid_at(case.kind, &config, &anchor, &Selection::new(), &anchor);
            assert_eq!(grid.map(|grid| grid.len()), case.rows, "kind {}", case.kind);
        }
    }

    #[test]
    fn test_month_grid_variant() {
        let config = resolve_config(CalendarMode::Month, &RawOptions::default()).expect("default options");
        let grid = generate_grid_at(CalendarMode::Month, &config, &date(2017, 4, 15), &Selection::new(), &date(2017, 4, 15));
        assert!(matches!(grid, Some(CalendarGrid::Months(ref rows)) if rows[0][0].date == date(2017, 1, 1)));
    }
}
