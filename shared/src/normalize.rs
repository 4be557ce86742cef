//! Rendering of OTLP `AnyValue` bodies as display text.
//!
//! Decoding follows a fixed precedence over the union's fields, in
//! declaration order: `stringValue`, `boolValue`, `intValue`, `doubleValue`,
//! `arrayValue`, `kvlistValue`, `bytesValue`. A non-empty string always wins.
//! Otherwise the first populated field decides the result, and structured
//! values render as an empty string.

use crate::otlp::AnyValue;

/// Converts an optional `AnyValue` to display text. Never fails.
///
/// # Example
///
/// ```
/// use shared::normalize::any_value_to_display;
/// use shared::otlp::AnyValue;
///
/// assert_eq!(any_value_to_display(None), "");
/// assert_eq!(any_value_to_display(Some(&AnyValue::string("hi"))), "hi");
/// assert_eq!(any_value_to_display(Some(&AnyValue::bool(true))), "true");
/// assert_eq!(any_value_to_display(Some(&AnyValue::int(42))), "42");
/// ```
#[must_use]
pub fn any_value_to_display(value: Option<&AnyValue>) -> String {
    let Some(value) = value else {
        return String::new();
    };

    if let Some(s) = value.string_value.as_deref().filter(|s| !s.is_empty()) {
        return s.to_string();
    }

    // An empty stringValue still occupies the first slot.
    if value.string_value.is_some() {
        return String::new();
    }
    if let Some(b) = value.bool_value {
        return b.to_string();
    }
    if let Some(i) = &value.int_value {
        return i.to_string();
    }
    if let Some(d) = &value.double_value {
        return d.to_string();
    }

    String::new()
}
