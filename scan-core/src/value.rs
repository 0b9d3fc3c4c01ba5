use crate::{Error, Result};
use std::fmt;

/// A native value as handed over by the reply decoder of the connection.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    Bulk(String),
    Integer(i64),
    Double(f64),
}

impl From<&str> for WireValue {
    fn from(value: &str) -> Self {
        WireValue::Bulk(value.to_owned())
    }
}

impl From<String> for WireValue {
    fn from(value: String) -> Self {
        WireValue::Bulk(value)
    }
}

impl From<i64> for WireValue {
    fn from(value: i64) -> Self {
        WireValue::Integer(value)
    }
}

impl From<f64> for WireValue {
    fn from(value: f64) -> Self {
        WireValue::Double(value)
    }
}

/// One reply of a scan-family command: the cursor to continue with and
/// the flat list of elements of this page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawPage {
    pub cursor: u64,
    pub items: Vec<WireValue>,
}

impl RawPage {
    pub fn new(cursor: u64, items: Vec<WireValue>) -> Self {
        Self { cursor, items }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    /// Turn a key-role wire value into a key.
    ///
    /// Bulk strings holding a canonical decimal integer become
    /// [`Key::Int`], anything else is kept verbatim.
    pub fn coerce(value: WireValue) -> Result<Self> {
        match value {
            WireValue::Bulk(s) => Ok(match parse_canonical_int(&s) {
                Some(n) => Key::Int(n),
                None => Key::Str(s),
            }),
            WireValue::Integer(n) => Ok(Key::Int(n)),
            WireValue::Double(d) => Err(Error::Protocol(format!(
                "floating point value {d} cannot be used as key"
            ))),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(n) => Some(*n),
            Key::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Int(_) => None,
            Key::Str(s) => Some(s),
        }
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(value.to_owned())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{n}"),
            Key::Str(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Str(String),
    Float(f64),
}

impl Value {
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Parse a sorted-set score. Integral scores still become floats.
    pub fn score(value: WireValue) -> Result<Self> {
        let score = match value {
            WireValue::Double(d) => d,
            WireValue::Integer(n) => n as f64,
            WireValue::Bulk(s) => parse_score(&s)
                .ok_or_else(|| Error::Protocol(format!("invalid score {s:?}")))?,
        };
        Ok(Value::Float(score))
    }
}

impl From<WireValue> for Value {
    fn from(value: WireValue) -> Self {
        match value {
            WireValue::Bulk(s) => Value::Str(s),
            WireValue::Integer(n) => Value::Int(n),
            WireValue::Double(d) => Value::Float(d),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::Float(d) => write!(f, "{d}"),
        }
    }
}

/// A decoded element of a scan traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: Key,
    pub value: Value,
}

impl Entry {
    pub fn new(key: impl Into<Key>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Accepts `0`, `-12`, `42` but neither `007`, `+1`, `-0`, `1.0` nor
/// anything out of the i64 range.
fn parse_canonical_int(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    if s == "-0" {
        return None;
    }
    s.parse::<i64>().ok()
}

fn parse_score(s: &str) -> Option<f64> {
    match s {
        "inf" | "+inf" => Some(f64::INFINITY),
        "-inf" => Some(f64::NEG_INFINITY),
        _ => s.parse::<f64>().ok().filter(|f| !f.is_nan()),
    }
}
