//! Wide-record input DTOs.
//!
//! A timetable export has one row per service with the stop sequence spread
//! over repeating columns (`station1_code`, `station1_name`, ...,
//! `station2_code`, ...). Exports are inconsistent about types: codes and
//! times arrive as text, distances and day offsets as numbers or numeric
//! text, and empty cells as null. These types accept all of that and leave
//! interpretation to the extractor.

use std::collections::HashMap;

use serde::Deserialize;

/// Column holding the train number.
pub const TRAIN_NUMBER: &str = "trainNumber";
/// Column holding the service name.
pub const TRAIN_NAME: &str = "trainName";
/// Column holding the 7-position running-days mask, Sun..Sat.
pub const RUNNING_ON: &str = "runningOn";
/// Column holding the service type tag.
pub const TRAIN_TYPE: &str = "train_type";
/// Column holding the comma-separated class list.
pub const JOURNEY_CLASSES: &str = "journeyClasses";

/// Per-stop column suffixes.
pub mod stop_field {
    pub const CODE: &str = "code";
    pub const NAME: &str = "name";
    pub const ARRIVAL: &str = "arr";
    pub const DEPARTURE: &str = "dep";
    pub const DAY: &str = "day";
    pub const DISTANCE: &str = "dist";
}

/// Name of the column holding `field` for the 1-based stop `index`.
///
/// # Examples
///
/// ```
/// use train_schedule::source::{stop_column, stop_field};
///
/// assert_eq!(stop_column(3, stop_field::DEPARTURE), "station3_dep");
/// ```
pub fn stop_column(index: usize, field: &str) -> String {
    format!("station{index}_{field}")
}

/// One cell of a wide record.
///
/// Cells of any other JSON shape (objects, mixed arrays) land in `Other`,
/// which reads as neither text nor a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Flags(Vec<bool>),
    Other(serde_json::Value),
}

impl FieldValue {
    /// The cell as trimmed text, or `None` if it is null or blank.
    ///
    /// Whole numbers render without a fractional part, so a train number
    /// exported as `12301.0` reads as `"12301"`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            FieldValue::Number(n) if n.is_finite() => {
                if n.fract() == 0.0 {
                    Some(format!("{}", *n as i64))
                } else {
                    Some(n.to_string())
                }
            }
            FieldValue::Number(_)
            | FieldValue::Null
            | FieldValue::Bool(_)
            | FieldValue::Flags(_)
            | FieldValue::Other(_) => None,
        }
    }

    /// The cell as a whole number, truncating any fractional part.
    pub fn as_whole_number(&self) -> Option<i64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(n.trunc() as i64),
            FieldValue::Text(s) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| {
                        trimmed
                            .parse::<f64>()
                            .ok()
                            .filter(|n| n.is_finite())
                            .map(|n| n.trunc() as i64)
                    })
            }
            _ => None,
        }
    }

    /// Returns true for null and blank text.
    pub fn is_absent(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

/// Read access to the named cells of one wide record.
///
/// Implemented for the JSON DTO and for a plain map, so any loader that
/// produces named cells can feed the extractor.
pub trait WideRecord {
    /// The raw cell, if the column exists.
    fn field(&self, name: &str) -> Option<&FieldValue>;

    /// The cell as trimmed, non-blank text.
    fn text(&self, name: &str) -> Option<String> {
        self.field(name).and_then(FieldValue::as_text)
    }

    /// The cell as a whole number.
    fn whole_number(&self, name: &str) -> Option<i64> {
        self.field(name).and_then(FieldValue::as_whole_number)
    }

    /// Returns true if the column is missing, null or blank.
    fn is_absent(&self, name: &str) -> bool {
        self.field(name).is_none_or(FieldValue::is_absent)
    }
}

impl WideRecord for HashMap<String, FieldValue> {
    fn field(&self, name: &str) -> Option<&FieldValue> {
        self.get(name)
    }
}

/// One service row as exported, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawServiceRecord {
    fields: HashMap<String, FieldValue>,
}

impl RawServiceRecord {
    /// An empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column, returning the record for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a column.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Number of columns present.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl WideRecord for RawServiceRecord {
    fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

impl FromIterator<(String, FieldValue)> for RawServiceRecord {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
