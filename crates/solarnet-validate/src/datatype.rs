//! # Data-Type Validation
//!
//! Checks a card value against the data type the schema declares for its
//! keyword. Resolution is exact-match first, then pattern families in
//! schema order; the first matching pattern wins.

use serde_json::Value;

use solarnet_core::DataType;
use solarnet_schema::{AttributeSpec, SolarnetSchema};

use crate::pattern::keyword_matches;

/// Validate `value` against the schema-declared data type of `keyword`.
pub fn validate_keyword_data_type(
    keyword: &str,
    value: &Value,
    schema: &SolarnetSchema,
) -> Vec<String> {
    let Some(spec) = resolve_spec(keyword, schema) else {
        return vec![format!(
            "Keyword '{keyword}' not found in the schema. Cannot Validate Data Type."
        )];
    };

    let Some(data_type) = spec.data_type.as_ref() else {
        return vec![format!(
            "Keyword '{keyword}' has no data type. Cannot Validate Data Type."
        )];
    };

    if let DataType::Unknown(name) = data_type {
        return vec![format!(
            "Unknown data type '{name}' for keyword '{keyword}'."
        )];
    }

    match data_type.coerce(value) {
        Ok(_) => Vec::new(),
        Err(reason) => vec![format!(
            "Value for '{keyword}' cannot be cast to data type '{}': {reason}",
            data_type.name()
        )],
    }
}

/// Exact schema entry for `keyword`, or the first pattern family that
/// fully matches it.
fn resolve_spec<'a>(keyword: &str, schema: &'a SolarnetSchema) -> Option<&'a AttributeSpec> {
    if let Some(spec) = schema.attribute(keyword) {
        return Some(spec);
    }
    schema.attribute_key().find_map(|(_, spec)| {
        let pattern = spec.pattern.as_deref()?;
        keyword_matches(pattern, keyword).then_some(spec)
    })
}
