//! Common OTLP value types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 64-bit signed integer as it appears on the wire.
///
/// OTLP/JSON encodes `int64` as a string, but many exporters emit plain
/// JSON numbers. Both are accepted; anything else is kept as `Other` and
/// renders as an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntValue {
    /// Integer sent as a JSON number.
    Number(i64),
    /// Integer sent as a JSON string.
    Text(String),
    /// Any other JSON value, kept verbatim.
    Other(serde_json::Value),
}

impl fmt::Display for IntValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => match s.trim().parse::<i64>() {
                Ok(n) => write!(f, "{n}"),
                Err(_) => f.write_str(s),
            },
            Self::Other(_) => Ok(()),
        }
    }
}

/// A double-precision float as it appears on the wire.
///
/// Non-finite values are sent as the strings `"NaN"`, `"Infinity"` and
/// `"-Infinity"`. Values of any other shape are kept as `Other`.
///
/// Numbers display in the shortest form that round-trips, switching to
/// exponent notation below `1e-6` and from `1e21` up (`1e+21`, `1.5e-7`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DoubleValue {
    /// Float sent as a JSON number.
    Number(f64),
    /// Float sent as a JSON string.
    Text(String),
    /// Any other JSON value, kept verbatim.
    Other(serde_json::Value),
}

impl fmt::Display for DoubleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(&format_double(*n)),
            Self::Text(s) => f.write_str(s),
            Self::Other(_) => Ok(()),
        }
    }
}

/// Formats a double as the shortest decimal that round-trips.
fn format_double(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }

    // `{:e}` omits the sign of a positive exponent
    let exp = format!("{n:e}");
    match exp.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exp,
    }
}

/// Polymorphic OTLP value.
///
/// Only one field is meant to be populated, but the encoding does not
/// enforce it. Fields are declared in the order used for decoding precedence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnyValue {
    /// UTF-8 string value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,

    /// Boolean value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bool_value: Option<bool>,

    /// Signed 64-bit integer value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub int_value: Option<IntValue>,

    /// Double-precision float value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_value: Option<DoubleValue>,

    /// Nested list of values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_value: Option<ArrayValue>,

    /// Nested key-value list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kvlist_value: Option<KeyValueList>,

    /// Base64-encoded bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes_value: Option<String>,
}

impl AnyValue {
    /// Creates a string value.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            string_value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Creates a boolean value.
    #[must_use]
    pub fn bool(value: bool) -> Self {
        Self {
            bool_value: Some(value),
            ..Self::default()
        }
    }

    /// Creates an integer value using the string encoding.
    #[must_use]
    pub fn int(value: i64) -> Self {
        Self {
            int_value: Some(IntValue::Text(value.to_string())),
            ..Self::default()
        }
    }

    /// Creates a double value.
    #[must_use]
    pub fn double(value: f64) -> Self {
        Self {
            double_value: Some(DoubleValue::Number(value)),
            ..Self::default()
        }
    }

    /// Creates an array value.
    #[must_use]
    pub fn array(values: Vec<AnyValue>) -> Self {
        Self {
            array_value: Some(ArrayValue { values }),
            ..Self::default()
        }
    }

    /// Returns `true` if no field is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.string_value.is_none()
            && self.bool_value.is_none()
            && self.int_value.is_none()
            && self.double_value.is_none()
            && self.array_value.is_none()
            && self.kvlist_value.is_none()
            && self.bytes_value.is_none()
    }
}

/// List of values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayValue {
    /// The contained values.
    #[serde(default)]
    pub values: Vec<AnyValue>,
}

/// List of key-value pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyValueList {
    /// The contained pairs.
    #[serde(default)]
    pub values: Vec<KeyValue>,
}

/// A single attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyValue {
    /// Attribute key.
    #[serde(default)]
    pub key: String,

    /// Attribute value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<AnyValue>,
}
