// src/chrony/record.rs

//! Structured metric records produced from chronyc output.

use std::collections::BTreeMap;
use std::fmt;

/// Measurement name every record is emitted under.
pub const MEASUREMENT: &str = "chronyc";

/// Typed value of a single metric field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl FieldValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Str(v.to_string())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{v}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Str(v) => f.write_str(v),
        }
    }
}

pub type FieldSet = BTreeMap<String, FieldValue>;
pub type TagSet = BTreeMap<String, String>;

/// One emitted metric: measurement name, fields and tags.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub measurement: &'static str,
    pub fields: FieldSet,
    pub tags: TagSet,
}

impl Record {
    pub fn new(fields: FieldSet, tags: TagSet) -> Self {
        Self {
            measurement: MEASUREMENT,
            fields,
            tags,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags.get(name).map(String::as_str)
    }
}
