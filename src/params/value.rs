//! Nested parameter records exchanged with controllers and external callers

use super::ParamPath;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single value in a parameter record
///
/// Serializes untagged, so a record maps one-to-one onto a JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Choice(String),
    Group(ParamRecord),
}

impl ParamValue {
    /// Numeric view of the value; integers widen to floats
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Float(v) => Some(*v),
            ParamValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            ParamValue::Float(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
                Some(*v as i64)
            }
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Choice(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&ParamRecord> {
        match self {
            ParamValue::Group(record) => Some(record),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ParamValue::Int(_) => "integer",
            ParamValue::Float(_) => "number",
            ParamValue::Bool(_) => "boolean",
            ParamValue::Choice(_) => "string",
            ParamValue::Group(_) => "group",
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Choice(v.to_string())
    }
}

impl From<ParamRecord> for ParamValue {
    fn from(record: ParamRecord) -> Self {
        ParamValue::Group(record)
    }
}

/// Ordered mapping from names to values, mirroring a parameter group
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParamRecord {
    entries: Vec<(String, ParamValue)>,
}

impl ParamRecord {
    pub fn new() -> Self {
        ParamRecord::default()
    }

    /// Insert a value, replacing an existing entry in place
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Follow a path through nested groups
    pub fn lookup(&self, path: &ParamPath) -> Option<&ParamValue> {
        let (last, parents) = path.segments().split_last()?;
        let mut record = self;
        for segment in parents {
            record = record.get(segment)?.as_record()?;
        }
        record.get(last)
    }

    /// Numeric value at a dotted path such as `gains.kp`
    pub fn get_f64(&self, path: &str) -> Option<f64> {
        self.lookup(&ParamPath::from(path))?.as_f64()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every non-group value with its full path, depth first in record order
    pub fn flatten(&self) -> Vec<(ParamPath, ParamValue)> {
        let mut out = Vec::new();
        self.flatten_into(&ParamPath::root(), &mut out);
        out
    }

    fn flatten_into(&self, prefix: &ParamPath, out: &mut Vec<(ParamPath, ParamValue)>) {
        for (name, value) in &self.entries {
            let path = prefix.child(name);
            match value {
                ParamValue::Group(record) => record.flatten_into(&path, out),
                leaf => out.push((path, leaf.clone())),
            }
        }
    }
}

impl Serialize for ParamRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = ParamRecord;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of parameter names to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut record = ParamRecord::new();
        while let Some((key, value)) = access.next_entry::<String, ParamValue>()? {
            if record.get(&key).is_some() {
                return Err(de::Error::custom(format!("duplicate parameter '{key}'")));
            }
            record.entries.push((key, value));
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for ParamRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}
