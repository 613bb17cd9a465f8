//! # Semantic Data Types
//!
//! The closed enumeration of keyword data types declared by the schema,
//! with one coercion check per variant. An unrecognized type name in a
//! schema document becomes `DataType::Unknown` rather than a lookup
//! failure, so validation can report it instead of crashing.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::value::render_card_value;

/// A keyword's declared semantic type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    Bool,
    Str,
    Int,
    Float,
    /// An ISO-8601 date or datetime, carried as a string.
    Date,
    /// A type name the schema vocabulary does not recognize.
    Unknown(String),
}

impl DataType {
    /// Resolve a schema-document type name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "bool" => DataType::Bool,
            "str" => DataType::Str,
            "int" => DataType::Int,
            "float" => DataType::Float,
            "date" => DataType::Date,
            other => DataType::Unknown(other.to_string()),
        }
    }

    /// The schema-document spelling of this type.
    pub fn name(&self) -> &str {
        match self {
            DataType::Bool => "bool",
            DataType::Str => "str",
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::Date => "date",
            DataType::Unknown(name) => name,
        }
    }

    /// Check whether `value` can be coerced to this type, returning the
    /// coerced value.
    ///
    /// Boolean coercion is truthiness-based and succeeds for every card
    /// value. Date coercion requires strict ISO-8601 parseability. The
    /// error string is suitable for embedding in a finding message.
    pub fn coerce(&self, value: &Value) -> Result<Value, String> {
        match self {
            DataType::Bool => Ok(Value::Bool(truthy(value))),
            DataType::Str => render_card_value(value).map(Value::String),
            DataType::Int => coerce_int(value).map(Value::from),
            DataType::Float => coerce_float(value).map(Value::from),
            DataType::Date => coerce_date(value).map(Value::String),
            DataType::Unknown(name) => Err(format!("unknown data type '{name}'")),
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for DataType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        if name.is_empty() {
            return Err(D::Error::custom("data type name must not be empty"));
        }
        Ok(DataType::from_name(&name))
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn coerce_int(value: &Value) -> Result<i64, String> {
    match value {
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if let Some(f) = n.as_f64() {
                // Fractional values truncate toward zero.
                Ok(f as i64)
            } else {
                Err(format!("integer out of range: {n}"))
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| format!("{e}: '{s}'")),
        other => Err(format!(
            "cannot convert {} to an integer",
            crate::value::json_type_name(other)
        )),
    }
}

fn coerce_float(value: &Value) -> Result<f64, String> {
    match value {
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| format!("number out of range: {n}")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("{e}: '{s}'")),
        other => Err(format!(
            "cannot convert {} to a float",
            crate::value::json_type_name(other)
        )),
    }
}

/// Strict ISO-8601 check; the original string is kept on success.
fn coerce_date(value: &Value) -> Result<String, String> {
    let Value::String(s) = value else {
        return Err(format!(
            "date value must be an ISO-8601 string, got {}",
            crate::value::json_type_name(value)
        ));
    };
    parse_iso8601(s)?;
    Ok(s.clone())
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS[.fff]`, and the same with a
/// `Z` or numeric offset suffix.
pub fn parse_iso8601(s: &str) -> Result<(), String> {
    if chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
        || chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").is_ok()
        || chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || chrono::DateTime::parse_from_rfc3339(s).is_ok()
    {
        Ok(())
    } else {
        Err(format!("invalid ISO-8601 date string: '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_name_known_types() {
        assert_eq!(DataType::from_name("int"), DataType::Int);
        assert_eq!(DataType::from_name("date"), DataType::Date);
    }

    #[test]
    fn test_from_name_unknown_type() {
        assert_eq!(
            DataType::from_name("complex"),
            DataType::Unknown("complex".to_string())
        );
    }

    #[test]
    fn test_int_coercion() {
        assert_eq!(DataType::Int.coerce(&json!("123")).unwrap(), json!(123));
        assert_eq!(DataType::Int.coerce(&json!(7)).unwrap(), json!(7));
        assert_eq!(DataType::Int.coerce(&json!(3.9)).unwrap(), json!(3));
        assert!(DataType::Int.coerce(&json!("abc")).is_err());
    }

    #[test]
    fn test_int_coercion_error_names_literal() {
        let err = DataType::Int.coerce(&json!("abc")).unwrap_err();
        assert!(err.contains("'abc'"), "unexpected error text: {err}");
    }

    #[test]
    fn test_float_coercion() {
        assert_eq!(
            DataType::Float.coerce(&json!("123.45")).unwrap(),
            json!(123.45)
        );
        assert!(DataType::Float.coerce(&json!("not a float")).is_err());
    }

    #[test]
    fn test_bool_coercion_is_truthiness() {
        assert_eq!(DataType::Bool.coerce(&json!("any")).unwrap(), json!(true));
        assert_eq!(DataType::Bool.coerce(&json!("")).unwrap(), json!(false));
        assert_eq!(DataType::Bool.coerce(&json!(0)).unwrap(), json!(false));
    }

    #[test]
    fn test_str_coercion() {
        assert_eq!(DataType::Str.coerce(&json!(123)).unwrap(), json!("123"));
        assert!(DataType::Str.coerce(&json!([1])).is_err());
    }

    #[test]
    fn test_date_coercion() {
        assert!(DataType::Date.coerce(&json!("2023-01-01T00:00:00")).is_ok());
        assert!(DataType::Date.coerce(&json!("2023-01-01")).is_ok());
        assert!(DataType::Date
            .coerce(&json!("2023-01-01T00:00:00Z"))
            .is_ok());
        assert!(DataType::Date.coerce(&json!("invalid date")).is_err());
        assert!(DataType::Date.coerce(&json!(20230101)).is_err());
    }

    #[test]
    fn test_unknown_type_never_coerces() {
        let dt = DataType::from_name("unknown");
        assert!(dt.coerce(&json!("value")).is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let dt: DataType = serde_json::from_str("\"float\"").unwrap();
        assert_eq!(dt, DataType::Float);
        let dt: DataType = serde_json::from_str("\"mystery\"").unwrap();
        assert_eq!(dt, DataType::Unknown("mystery".to_string()));
        assert_eq!(serde_json::to_string(&dt).unwrap(), "\"mystery\"");
    }
}
