//! Item records.
//!
//! The widget's item collection is an ordered sequence of [`Record`]s:
//! flat key/value maps owned by the caller. The widget never copies or
//! reorders the collection; it reads fields for display and filtering and,
//! for selection, writes one configurable boolean field per record.

use std::collections::BTreeMap;

/// A single field value inside a [`Record`].
///
/// Provides type-safe access through the `as_*` methods and a uniform
/// text rendering via [`to_text`](FieldValue::to_text) for display and
/// filtering.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FieldValue {
    /// No data.
    #[default]
    None,
    /// String data.
    String(String),
    /// Integer data.
    Int(i64),
    /// Floating point data.
    Float(f64),
    /// Boolean data. Carries the selection mark, among other things.
    Bool(bool),
}

impl FieldValue {
    /// Returns `true` if this is `FieldValue::None`.
    pub fn is_none(&self) -> bool {
        matches!(self, FieldValue::None)
    }

    /// Returns `true` if this contains some data.
    pub fn is_some(&self) -> bool {
        !self.is_none()
    }

    /// Attempts to get the value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Attempts to get the value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to get the value as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to get the value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Renders the value as display text.
    ///
    /// `None` renders as empty text; integers render without a decimal
    /// point. This is the text used for labels and filtering.
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::None => String::new(),
            FieldValue::String(s) => s.clone(),
            FieldValue::Int(n) => n.to_string(),
            FieldValue::Float(n) => n.to_string(),
            FieldValue::Bool(b) => b.to_string(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Int(n)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Int(n as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Float(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// A flat key/value record.
///
/// Records are the item type of the widget's bound collection. Fields are
/// arbitrary; the widget only interprets the configured label field (or
/// label expression inputs) and the configured selected-attribute.
///
/// # Example
///
/// ```
/// use sift_select::model::Record;
///
/// let record = Record::new()
///     .with_field("label", "foo")
///     .with_field("num", 5);
///
/// assert_eq!(record.get("label").and_then(|v| v.as_str()), Some("foo"));
/// assert!(!record.flag("selected"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field assignment.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Returns the value of a field, if present.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Sets a field value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Removes a field, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    /// Reads a boolean field.
    ///
    /// A missing field or a non-boolean value reads as `false`. This is how
    /// the selection model reads the selected-attribute.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(FieldValue::as_bool).unwrap_or(false)
    }

    /// Writes a boolean field.
    pub fn set_flag(&mut self, name: &str, value: bool) {
        self.fields.insert(name.to_string(), FieldValue::Bool(value));
    }

    /// Renders a field as display text; missing fields render empty.
    pub fn text(&self, name: &str) -> String {
        self.get(name).map(FieldValue::to_text).unwrap_or_default()
    }

    /// Number of fields on this record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(name, value)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
