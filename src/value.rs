//! External picker values and their canonical form.

use serde::{Deserialize, Serialize};

use crate::consts::{VALUES_JOINER, VALUES_SEPARATOR};
use crate::prelude::*;
use crate::{DateValue, Selection};

/// A picker value as the host hands it over: one or many values, each either
/// formatted text or a date.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, From)]
#[serde(untagged)]
pub enum CalendarValue {
    /// No value at all
    #[default]
    Empty,
    Text(String),
    TextList(Vec<String>),
    Date(DateValue),
    DateList(Vec<DateValue>),
}

impl From<&str> for CalendarValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

/// One bound or display date given either as formatted text or as a date.
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub enum SingleValue {
    Text(String),
    Date(DateValue),
}

impl SingleValue {
    /// Resolves the value to a date, parsing text against `format`
    pub fn to_date(&self, format: &str) -> DateValue {
        match self {
            Self::Text(text) => DateValue::parse(text, format),
            Self::Date(date) => *date,
        }
    }

    /// Resolves a configured limit, parsing text forgivingly
    pub fn to_limit(&self, format: &str) -> DateValue {
        match self {
            Self::Text(text) => DateValue::parse_lenient(text, format),
            Self::Date(date) => *date,
        }
    }
}

impl From<&str> for SingleValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl Serialize for SingleValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Date(date) => date.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for SingleValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::Text)
    }
}

/// The four shapes a picker value can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "camelCase")]
pub enum ValueShape {
    #[display(fmt = "string")]
    SingleString,
    #[display(fmt = "string array")]
    StringArray,
    #[display(fmt = "date")]
    SingleDate,
    #[display(fmt = "date array")]
    DateArray,
}

/// Shape of a value. An empty list counts as a date list; an absent value
/// falls back to a date list for multi-select pickers and a single date
/// otherwise.
pub fn classify(value: &CalendarValue, allow_multi_select: bool) -> ValueShape {
    match value {
        CalendarValue::Text(_) => ValueShape::SingleString,
        CalendarValue::TextList(list) if !list.is_empty() => ValueShape::StringArray,
        CalendarValue::TextList(_) | CalendarValue::DateList(_) => ValueShape::DateArray,
        CalendarValue::Date(_) => ValueShape::SingleDate,
        CalendarValue::Empty if allow_multi_select => ValueShape::DateArray,
        CalendarValue::Empty => ValueShape::SingleDate,
    }
}

/// Canonical selection of a value. Text is strictly parsed against `format`;
/// empty strings are dropped and text that fails to parse stays behind as an
/// invalid date.
pub fn to_canonical(value: &CalendarValue, format: &str, allow_multi_select: bool) -> Selection {
    let dates = match value {
        CalendarValue::Empty => Vec::new(),
        CalendarValue::Text(text) if text.is_empty() => Vec::new(),
        CalendarValue::Text(text) => vec![DateValue::parse(text, format)],
        CalendarValue::TextList(list) => list
            .iter()
            .filter(|text| !text.is_empty())
            .map(|text| DateValue::parse(text, format))
            .collect(),
        CalendarValue::Date(date) => vec![*date],
        CalendarValue::DateList(list) => list.clone(),
    };

    tracing::trace!(
        shape = %classify(value, allow_multi_select),
        count = dates.len(),
        "normalized value"
    );
    Selection::from(dates)
}

/// Renders a selection in the requested shape. String shapes use POSIX names
/// so they parse back with the same format.
pub fn from_canonical(format: &str, selection: &[DateValue], shape: ValueShape) -> CalendarValue {
    match shape {
        ValueShape::SingleString => CalendarValue::Text(
            selection
                .first()
                .map(|date| date.format(format))
                .unwrap_or_default(),
        ),
        ValueShape::StringArray => CalendarValue::TextList(
            selection
                .iter()
                .filter(|date| date.is_valid())
                .map(|date| date.format(format))
                .filter(|text| !text.is_empty())
                .collect(),
        ),
        ValueShape::SingleDate => selection
            .first()
            .map_or(CalendarValue::Empty, |date| CalendarValue::Date(*date)),
        ValueShape::DateArray => CalendarValue::DateList(selection.to_vec()),
    }
}

/// Text of a value for an input field, several values joined by `" | "`.
pub fn to_display_string(value: &CalendarValue, format: &str) -> String {
    let parts: Vec<String> = match value {
        CalendarValue::Empty => return String::new(),
        CalendarValue::Text(text) => vec![text.clone()],
        CalendarValue::TextList(list) => list
            .iter()
            .map(|text| DateValue::parse(text, format).format(format))
            .collect(),
        CalendarValue::Date(date) => vec![date.format(format)],
        CalendarValue::DateList(list) => list.iter().map(|date| date.format(format)).collect(),
    };

    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(VALUES_JOINER)
}

/// Splits input text holding several values separated by `|`.
pub fn split_dates(text: &str) -> Vec<String> {
    text.split(VALUES_SEPARATOR)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_owned)
        .collect()
}

/// The parts of `text` that strictly match `format`, parsed.
pub fn valid_dates_from_string(text: &str, format: &str) -> Vec<DateValue> {
    split_dates(text)
        .iter()
        .map(|part| DateValue::parse(part, format))
        .filter(DateValue::is_valid)
        .collect()
}
