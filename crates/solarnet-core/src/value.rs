//! # Card Value Rendering
//!
//! Helpers for presenting `serde_json::Value` card values in finding
//! messages and in simulated FITS cards.

use serde_json::Value;

/// Render a value for use in a finding message (no quoting).
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render a value as it would appear in the value field of a FITS card.
///
/// Logical values use the FITS `T`/`F` spelling; a null value renders as
/// the empty string. Array and object values cannot be represented on a
/// card and are rejected with a reason suitable for embedding in a finding.
pub fn render_card_value(value: &Value) -> Result<String, String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(true) => Ok("T".to_string()),
        Value::Bool(false) => Ok("F".to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        Value::Array(_) => Err("array value cannot be rendered on a FITS card".to_string()),
        Value::Object(_) => Err("object value cannot be rendered on a FITS card".to_string()),
    }
}

/// The JSON type name of a value, for type-mismatch findings.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_value_scalars() {
        assert_eq!(display_value(&json!(2)), "2");
        assert_eq!(display_value(&json!("D")), "D");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&Value::Null), "null");
    }

    #[test]
    fn test_render_card_value_logical() {
        assert_eq!(render_card_value(&json!(true)).unwrap(), "T");
        assert_eq!(render_card_value(&json!(false)).unwrap(), "F");
    }

    #[test]
    fn test_render_card_value_rejects_containers() {
        assert!(render_card_value(&json!([1, 2])).is_err());
        assert!(render_card_value(&json!({"a": 1})).is_err());
    }

    #[test]
    fn test_json_type_name() {
        assert_eq!(json_type_name(&json!(123)), "number");
        assert_eq!(json_type_name(&json!([])), "array");
    }
}
