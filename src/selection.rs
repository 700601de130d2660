use serde::{Deserialize, Serialize};

use crate::prelude::*;
use crate::{Config, DateValue, Unit};

/// The canonical, shape-independent selection of a picker: ordered by
/// insertion, at most one entry per unit of the picker's granularity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Deref, From, Into)]
#[serde(transparent)]
pub struct Selection(Vec<DateValue>);

impl Selection {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Whether any selected value falls in the same `unit` as `date`
    pub fn contains(&self, date: &DateValue, unit: Unit) -> bool {
        self.0.iter().any(|selected| selected.is_same(date, unit))
    }

    pub fn into_vec(self) -> Vec<DateValue> {
        self.0
    }
}

impl FromIterator<DateValue> for Selection {
    fn from_iter<I: IntoIterator<Item = DateValue>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Toggles `candidate`: removes the entry matching it at `granularity`, or
/// adds it. A single-select picker holds only the candidate afterwards, or
/// nothing when the candidate was already selected.
pub fn toggle_selection(
    allow_multi_select: bool,
    selection: &Selection,
    candidate: DateValue,
    granularity: Unit,
) -> Selection {
    let present = selection.contains(&candidate, granularity);

    match (allow_multi_select, present) {
        (true, true) => selection
            .iter()
            .filter(|selected| !selected.is_same(&candidate, granularity))
            .copied()
            .collect(),
        (true, false) => selection
            .iter()
            .copied()
            .chain(std::iter::once(candidate))
            .collect(),
        (false, true) => Selection::new(),
        (false, false) => Selection(vec![candidate]),
    }
}

/// Applies a click on the cell holding `candidate`. Clicks on a selected cell
/// are ignored unless the configuration allows unselecting.
pub fn select(config: &Config, selection: &Selection, candidate: DateValue, granularity: Unit) -> Selection {
    if !config.un_select_on_click && selection.contains(&candidate, granularity) {
        return selection.clone();
    }

    toggle_selection(config.allow_multi_select, selection, candidate, granularity)
}

/// The date a calendar opens on: the current view if any, else `min` when it
/// lies in the future, else the last (multi-select) or first selected value,
/// else now.
pub fn default_display_date(
    current: Option<&DateValue>,
    selection: &Selection,
    allow_multi_select: bool,
    min: Option<&DateValue>,
) -> DateValue {
    default_display_date_at(current, selection, allow_multi_select, min, DateValue::now())
}

/// Same as [`default_display_date`] with an explicit `now`
pub fn default_display_date_at(
    current: Option<&DateValue>,
    selection: &Selection,
    allow_multi_select: bool,
    min: Option<&DateValue>,
    now: DateValue,
) -> DateValue {
    let valid = |date: &&DateValue| date.is_valid();

    if let Some(current) = current.filter(valid) {
        return *current;
    }
    if let Some(min) = min.filter(|min| min.is_after(&now, Unit::Second)) {
        return *min;
    }

    let selected = if allow_multi_select {
        selection.last()
    } else {
        selection.first()
    };
    selected.filter(valid).copied().unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, datetime, selection};
    use crate::{resolve_config, CalendarMode, RawOptions};

    #[test]
    fn test_toggle_multi_adds_and_removes() {
        let start = selection(&[date(2017, 1, 1), date(2017, 1, 5)]);

        let added = toggle_selection(true, &start, date(2017, 1, 3), Unit::Day);
        assert_eq!(added.as_slice(), &[date(2017, 1, 1), date(2017, 1, 5), date(2017, 1, 3)]);

        let removed = toggle_selection(true, &added, datetime(2017, 1, 5, 13, 0, 0), Unit::Day);
        assert_eq!(removed.as_slice(), &[date(2017, 1, 1), date(2017, 1, 3)]);
    }

    #[test]
    fn test_toggle_single_replaces() {
        let start = selection(&[date(2017, 1, 1)]);

        let replaced = toggle_selection(false, &start, date(2017, 1, 3), Unit::Day);
        assert_eq!(replaced.as_slice(), &[date(2017, 1, 3)]);

        let cleared = toggle_selection(false, &replaced, date(2017, 1, 3), Unit::Day);
        assert!(cleared.is_empty());
    }

    #[test]
    fn test_toggle_respects_granularity() {
        let start = selection(&[date(2017, 3, 1)]);
        let removed = toggle_selection(true, &start, date(2017, 3, 20), Unit::Month);
        assert!(removed.is_empty());
    }

    #[test]
    fn test_select_without_unselect_on_click() {
        let raw = RawOptions {
            un_select_on_click: Some(false),
            ..RawOptions::default()
        };
        let config = resolve_config(CalendarMode::Day, &raw).unwrap();
        let start = selection(&[date(2017, 1, 1)]);

        let unchanged = select(&config, &start, date(2017, 1, 1), Unit::Day);
        assert_eq!(unchanged, start);

        let replaced = select(&config, &start, date(2017, 1, 2), Unit::Day);
        assert_eq!(replaced.as_slice(), &[date(2017, 1, 2)]);
    }

    #[test]
    fn test_default_display_date_order() {
        let now = date(2020, 6, 1);
        let picked = selection(&[date(2019, 1, 1), date(2019, 2, 1)]);

        let current = date(2018, 5, 5);
        assert_eq!(
            default_display_date_at(Some(&current), &picked, true, None, now),
            current
        );

        let future_min = date(2021, 1, 1);
        assert_eq!(
            default_display_date_at(None, &picked, true, Some(&future_min), now),
            future_min
        );

        let past_min = date(2000, 1, 1);
        assert_eq!(
            default_display_date_at(None, &picked, true, Some(&past_min), now),
            date(2019, 2, 1)
        );
        assert_eq!(
            default_display_date_at(None, &picked, false, Some(&past_min), now),
            date(2019, 1, 1)
        );
        assert_eq!(
            default_display_date_at(None, &Selection::new(), true, None, now),
            now
        );
    }
}
