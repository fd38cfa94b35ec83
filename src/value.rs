//! Raw values captured from value sources.
//!
//! Interpreter settings, environment facts, response headers and database
//! variables all arrive as loosely typed values. [`RawValue`] keeps them as
//! they were observed and offers the coercions the validators rely on:
//! integer casts that read a leading number, truthiness, and comma lists.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Flat name → value mapping produced by one value source.
pub type RawMap = BTreeMap<String, RawValue>;

/// A single observed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Setting present but without a value.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

impl RawValue {
    /// String rendering used for comparisons.
    ///
    /// `true` renders as `"1"` and `false`/null as the empty string, matching
    /// how interpreter settings are reported.
    pub fn as_text(&self) -> String {
        match self {
            RawValue::Null => String::new(),
            RawValue::Bool(true) => "1".to_string(),
            RawValue::Bool(false) => String::new(),
            RawValue::Int(n) => n.to_string(),
            RawValue::Float(f) => f.to_string(),
            RawValue::Text(s) => s.clone(),
            RawValue::List(items) => items.join(","),
        }
    }

    /// Integer cast: the leading integer of a string, zero when there is none.
    pub fn to_int(&self) -> i64 {
        match self {
            RawValue::Null => 0,
            RawValue::Bool(b) => i64::from(*b),
            RawValue::Int(n) => *n,
            RawValue::Float(f) => *f as i64,
            RawValue::Text(s) => leading_int(s),
            RawValue::List(items) => i64::from(!items.is_empty()),
        }
    }

    /// Truthiness: empty strings, `"0"`, zero, null and empty lists are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            RawValue::Null => false,
            RawValue::Bool(b) => *b,
            RawValue::Int(n) => *n != 0,
            RawValue::Float(f) => *f != 0.0,
            RawValue::Text(s) => !(s.is_empty() || s == "0"),
            RawValue::List(items) => !items.is_empty(),
        }
    }

    /// Items of a list value, or the comma-separated parts of a scalar.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            RawValue::List(items) => items.clone(),
            other => other
                .as_text()
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Int(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<Vec<String>> for RawValue {
    fn from(value: Vec<String>) -> Self {
        RawValue::List(value)
    }
}

/// Look up a raw value, preferring the lower-cased key.
pub fn lookup<'a>(map: &'a RawMap, name: &str) -> Option<&'a RawValue> {
    map.get(&name.to_lowercase()).or_else(|| map.get(name))
}

/// Parse the leading integer of a string (`"600s"` → 600, `"abc"` → 0).
pub fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for c in digits.chars() {
        let Some(d) = c.to_digit(10) else {
            break;
        };
        value = value.saturating_mul(10).saturating_add(i64::from(d));
    }

    if negative {
        -value
    } else {
        value
    }
}
