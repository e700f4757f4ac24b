//! Runtime values held in rows and returned by column hooks.
//!
//! [`CellValue`] is the closed set of shapes a cell can take. Rows are
//! usually deserialized from JSON, so every [`serde_json::Value`] converts
//! losslessly except for integers beyond `f64` precision. Dates only enter
//! through Rust code (hooks or hand-built rows).

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::Deserialize;

/// Field map of an object value, in insertion order.
pub type Fields = IndexMap<String, CellValue>;

/// Any value a row field or hook can produce.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum CellValue {
    /// Missing or null.
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// A point in time, rendered with the configured date format.
    Date(NaiveDateTime),
    Array(Vec<CellValue>),
    Object(Fields),
}

impl CellValue {
    /// Returns `true` for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Returns `true` for strings and numbers, the values that print as-is.
    pub fn is_scalar(&self) -> bool {
        matches!(self, CellValue::String(_) | CellValue::Number(_))
    }

    /// The numeric payload, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The fields of an object value.
    pub fn as_object(&self) -> Option<&Fields> {
        match self {
            CellValue::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Look up a field on an object value. Non-objects have no fields.
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.as_object().and_then(|fields| fields.get(key))
    }

    /// Scalar text for strings and numbers.
    pub(crate) fn scalar_text(&self) -> Option<String> {
        match self {
            CellValue::String(s) => Some(s.clone()),
            CellValue::Number(n) => Some(format_number(*n)),
            _ => None,
        }
    }
}

/// Print a number the way a dynamically typed host would: integral values
/// without a fractional part, non-finite values spelled out.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        // Covers negative zero.
        "0".to_string()
    } else {
        n.to_string()
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(b),
            Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or(CellValue::Null),
            Value::String(s) => CellValue::String(s),
            Value::Array(items) => CellValue::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                CellValue::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::Date(dt)
    }
}

impl From<Fields> for CellValue {
    fn from(fields: Fields) -> Self {
        CellValue::Object(fields)
    }
}

impl<T: Into<CellValue>> From<Vec<T>> for CellValue {
    fn from(items: Vec<T>) -> Self {
        CellValue::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}
