use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{resolve_bound, resolve_time_bound};
use crate::prelude::*;
use crate::{to_canonical, CalendarMode, CalendarValue, DateValue, SingleValue, Unit};

/// Limits a picker value must respect. Text limits are parsed with the
/// validator's format.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DateLimits {
    pub min_date: Option<SingleValue>,
    pub max_date: Option<SingleValue>,
    pub min_time: Option<SingleValue>,
    pub max_time: Option<SingleValue>,
}

/// Name of a failed constraint.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "camelCase")]
pub enum ConstraintKey {
    #[display(fmt = "minDate")]
    MinDate,
    #[display(fmt = "maxDate")]
    MaxDate,
    #[display(fmt = "minTime")]
    MinTime,
    #[display(fmt = "maxTime")]
    MaxTime,
    /// Some element did not parse with the expected format
    #[display(fmt = "format")]
    Format,
}

/// The value that failed a constraint: the raw input for `format`, the
/// normalized selection for every other key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub given: CalendarValue,
}

/// Every constraint a value failed, keyed by constraint name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Deref)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<ConstraintKey, ValidationFailure>);

impl ValidationErrors {
    pub fn has(&self, key: ConstraintKey) -> bool {
        self.0.contains_key(&key)
    }

    /// Failed constraint names in check order
    pub fn constraint_keys(&self) -> Vec<ConstraintKey> {
        self.0.keys().copied().collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validation failed:")?;
        for key in self.0.keys() {
            write!(f, " {key}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

type Passes = Box<dyn Fn(&DateValue) -> bool + Send + Sync>;

struct Check {
    key:    ConstraintKey,
    passes: Passes,
}

/// Validates picker values against a fixed set of limits. Limits are parsed
/// once, when the validator is built.
pub struct DateValidator {
    format: String,
    checks: Vec<Check>,
}

impl fmt::Debug for DateValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateValidator")
            .field("format", &self.format)
            .field("checks", &self.constraints())
            .finish()
    }
}

impl DateValidator {
    /// Registers a check for every configured limit, in the order minDate,
    /// maxDate, minTime, maxTime. A limit that does not parse fails every
    /// value. Date limits compare at the granularity of
    /// `mode`, time limits by time of day.
    pub fn build(limits: &DateLimits, format: &str, mode: CalendarMode) -> Self {
        let unit = mode.granularity();
        let mut checks = Vec::new();

        if let Some(min) = resolve_bound(limits.min_date.as_ref(), format, "minDate") {
            checks.push(Check {
                key:    ConstraintKey::MinDate,
                passes: Box::new(move |value: &DateValue| value.is_same_or_after(&min, unit)),
            });
        }
        if let Some(max) = resolve_bound(limits.max_date.as_ref(), format, "maxDate") {
            checks.push(Check {
                key:    ConstraintKey::MaxDate,
                passes: Box::new(move |value: &DateValue| value.is_same_or_before(&max, unit)),
            });
        }
        if let Some(min) = resolve_time_bound(limits.min_time.as_ref(), format, "minTime") {
            checks.push(Check {
                key:    ConstraintKey::MinTime,
                passes: Box::new(move |value: &DateValue| value.time_only().is_same_or_after(&min, Unit::Second)),
            });
        }
        if let Some(max) = resolve_time_bound(limits.max_time.as_ref(), format, "maxTime") {
            checks.push(Check {
                key:    ConstraintKey::MaxTime,
                passes: Box::new(move |value: &DateValue| value.time_only().is_same_or_before(&max, Unit::Second)),
            });
        }

        Self {
            format: format.to_owned(),
            checks,
        }
    }

    /// Registered constraints, in check order
    pub fn constraints(&self) -> Vec<ConstraintKey> {
        self.checks.iter().map(|check| check.key).collect()
    }

    /// Checks `value`, read as a multi-value.
    ///
    /// # Errors
    /// Returns only a `format` failure if any element does not parse;
    /// otherwise every failed constraint.
    pub fn validate(&self, value: &CalendarValue) -> Result<(), ValidationErrors> {
        let selection = to_canonical(value, &self.format, true);

        if selection.iter().any(|date| !date.is_valid()) {
            tracing::debug!(format = %self.format, "value does not match format");
            let failure = ValidationFailure {
                given: value.clone(),
            };
            return Err(ValidationErrors(BTreeMap::from([(ConstraintKey::Format, failure)])));
        }

        let failures: BTreeMap<_, _> = self
            .checks
            .iter()
            .filter(|check| !selection.iter().all(|date| (check.passes)(date)))
            .map(|check| {
                let failure = ValidationFailure {
                    given: CalendarValue::DateList(selection.to_vec()),
                };
                (check.key, failure)
            })
            .collect();

        if failures.is_empty() {
            return Ok(());
        }

        let errors = ValidationErrors(failures);
        tracing::debug!(%errors, "value out of limits");
        Err(errors)
    }
}
