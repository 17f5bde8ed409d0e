//! The metadata bag handed over by the content-extraction engine.
//!
//! A bag maps field names to one or more string values. Value order is the
//! order the engine emitted them in; field order is sorted so everything
//! derived from a bag is deterministic.
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rights::RightsSink;
use serde::{Deserialize, Serialize};

use crate::value::parse_date;

/// Flat, multi-valued field map for one document.
///
/// Dates the engine already parsed can be attached with
/// [`MetadataBag::set_date`]; they are an in-memory convenience and are not
/// part of the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BagRepr", into = "BagRepr")]
pub struct MetadataBag {
    fields: BTreeMap<String, Vec<String>>,
    dates: BTreeMap<String, DateTime<Utc>>,
}

impl MetadataBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value to `name`.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.entry(name.into()).or_default().push(value.into());
    }

    /// Replaces all values of `name` with `value`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), vec![value.into()]);
    }

    /// Builder-style [`MetadataBag::add`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(name, value);
        self
    }

    /// Attaches a date the engine already parsed for `name`.
    pub fn set_date(&mut self, name: impl Into<String>, date: DateTime<Utc>) {
        self.dates.insert(name.into(), date);
    }

    /// Builder-style [`MetadataBag::set_date`].
    pub fn with_date(mut self, name: impl Into<String>, date: DateTime<Utc>) -> Self {
        self.set_date(name, date);
        self
    }

    /// First value of `name`, untrimmed.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.first()).map(String::as_str)
    }

    /// All values of `name` in emission order.
    pub fn values(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Date for `name`: the pre-parsed value if any, else a lenient parse of
    /// the first value.
    pub fn date(&self, name: &str) -> Option<DateTime<Utc>> {
        if let Some(date) = self.dates.get(name) {
            return Some(*date);
        }
        self.get(name).and_then(|raw| parse_date(name, raw))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name) || self.dates.contains_key(name)
    }

    /// Number of distinct field names.
    pub fn len(&self) -> usize {
        self.field_names().count()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.dates.is_empty()
    }

    /// Field names in sorted order, including date-only fields.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        let mut names: Vec<&str> = self
            .fields
            .keys()
            .chain(self.dates.keys().filter(|k| !self.fields.contains_key(*k)))
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names.into_iter()
    }

    /// String-valued fields in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Date-only view, used when a pre-parsed date has no string twin.
    pub(crate) fn date_entries(&self) -> impl Iterator<Item = (&str, &DateTime<Utc>)> {
        self.dates.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for MetadataBag
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = MetadataBag::new();
        for (name, value) in iter {
            bag.add(name, value);
        }
        bag
    }
}

/// Rights recovered from an embedded packet never override upstream fields.
impl RightsSink for MetadataBag {
    fn put(&mut self, name: &str, values: Vec<String>) {
        if !self.contains(name) && !values.is_empty() {
            self.fields.insert(name.to_string(), values);
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum FieldValue {
    One(String),
    Many(Vec<String>),
}

#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct BagRepr(BTreeMap<String, FieldValue>);

impl From<BagRepr> for MetadataBag {
    fn from(repr: BagRepr) -> Self {
        let fields = repr
            .0
            .into_iter()
            .map(|(name, value)| match value {
                FieldValue::One(v) => (name, vec![v]),
                FieldValue::Many(vs) => (name, vs),
            })
            .collect();
        MetadataBag {
            fields,
            dates: BTreeMap::new(),
        }
    }
}

/// Date-only entries serialize as RFC 3339 strings and come back as text.
impl From<MetadataBag> for BagRepr {
    fn from(bag: MetadataBag) -> Self {
        let mut repr: BTreeMap<String, FieldValue> = bag
            .fields
            .into_iter()
            .map(|(name, mut values)| {
                let value = if values.len() == 1 {
                    FieldValue::One(values.remove(0))
                } else {
                    FieldValue::Many(values)
                };
                (name, value)
            })
            .collect();
        for (name, date) in bag.dates {
            repr.entry(name)
                .or_insert_with(|| FieldValue::One(date.to_rfc3339()));
        }
        BagRepr(repr)
    }
}
