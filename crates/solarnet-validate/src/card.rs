//! # Card Validation
//!
//! Structural checks on one keyword/value/comment triple in isolation:
//! keyword syntax, value renderability, comment type, the combined
//! 80-character card limit, and enumerated valid-value membership.
//!
//! `COMMENT` and `HISTORY` cards are free-text narrative and exempt from
//! the value/comment/length checks.

use serde_json::Value;

use solarnet_core::{display_value, json_type_name, render_card_value};
use solarnet_schema::SolarnetSchema;

/// FITS keyword syntax: 1-8 characters from A-Z, 0-9, `-`, `_`.
const KEYWORD_PATTERN: &str = "[A-Z0-9_-]{1,8}";

/// Rendered cards must fit in one fixed-width record.
const MAX_CARD_LENGTH: usize = 80;

/// Validate one card. All checks accumulate; a single call may return
/// zero, one, or several findings.
pub fn validate_keyword_value_comment(
    keyword: &str,
    value: &Value,
    comment: &Value,
    warn_empty_keyword: bool,
    warn_no_comment: bool,
    schema: &SolarnetSchema,
) -> Vec<String> {
    let mut findings = Vec::new();

    // Keyword emptiness and syntax. An empty keyword is only reported
    // when asked for; syntax is not re-checked on an empty keyword.
    if keyword.trim().is_empty() {
        if warn_empty_keyword {
            findings.push(invalid_keyword(keyword));
        }
    } else if !keyword_syntax_ok(keyword) {
        findings.push(invalid_keyword(keyword));
    }

    if warn_no_comment && comment_is_blank(comment) {
        findings.push(format!("Keyword '{keyword}' has no comment."));
    }

    if keyword != "COMMENT" && keyword != "HISTORY" {
        let value_str = match render_card_value(value) {
            Ok(s) => Some(s),
            Err(reason) => {
                findings.push(format!(
                    "Value for '{keyword}' cannot be cast to a string: {reason}"
                ));
                None
            }
        };

        if !comment.is_null() && !comment.is_string() {
            findings.push(format!(
                "Comment for '{keyword}' must be a string (got {}).",
                json_type_name(comment)
            ));
        } else if let Some(value_str) = value_str {
            // Simulate the rendered card:
            //   columns 1-8:   keyword, space-padded
            //   columns 9-10:  "= "
            //   columns 11-80: value / comment
            let comment_str = comment.as_str().unwrap_or("");
            let card_str = format!("{keyword:<8}= {value_str} / {comment_str}");
            let length = card_str.chars().count();
            if length > MAX_CARD_LENGTH {
                findings.push(format!(
                    "FITS card for '{keyword}' exceeds 80 characters (length: {length})."
                ));
            }
        }
    }

    if let Some(valid_values) = schema
        .attribute(keyword)
        .and_then(|spec| spec.valid_values.as_ref())
    {
        if !valid_values.iter().any(|v| values_match(v, value)) {
            findings.push(format!(
                "Value '{}' for keyword '{keyword}' is not in the list of valid values: {}.",
                display_value(value),
                format_valid_values(valid_values)
            ));
        }
    }

    findings
}

fn invalid_keyword(keyword: &str) -> String {
    format!(
        "Invalid keyword '{keyword}': Must be 1-8 characters, containing only A-Z, 0-9, -, _."
    )
}

fn keyword_syntax_ok(keyword: &str) -> bool {
    crate::pattern::keyword_matches(KEYWORD_PATTERN, keyword)
}

fn comment_is_blank(comment: &Value) -> bool {
    match comment {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Valid-value membership. Numbers compare numerically, so an integral
/// float card value matches an integer entry in the schema's list.
fn values_match(candidate: &Value, value: &Value) -> bool {
    match (candidate, value) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => candidate == value,
        },
        _ => candidate == value,
    }
}

fn format_valid_values(values: &[Value]) -> String {
    let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", rendered.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use solarnet_schema::SolarnetSchema;

    fn mock_schema() -> SolarnetSchema {
        let doc = json!({
            "attribute_key": {
                "NAXIS": {"required": "obs", "data_type": "int"},
                "COMMENT": {"required": "optional"},
                "AUTHOR": {"required": "all", "data_type": "str"},
                "VALIDKEY": {
                    "required": "optional",
                    "data_type": "str",
                    "valid_values": ["A", "B", "C"],
                },
                "SOLARNET": {
                    "required": "obs",
                    "data_type": "float",
                    "valid_values": [0.5, 1],
                },
            },
            "conditional_requirements": [],
        });
        SolarnetSchema::from_documents(false, vec![doc]).unwrap()
    }

    fn validate(keyword: &str, value: Value, comment: Value) -> Vec<String> {
        validate_keyword_value_comment(keyword, &value, &comment, true, true, &mock_schema())
    }

    #[test]
    fn test_well_formed_card_is_clean() {
        assert_eq!(
            validate("NAXIS", json!("3"), json!("Number of axes")),
            Vec::<String>::new()
        );
    }

    #[test]
    fn test_keyword_too_long() {
        assert_eq!(
            validate("TOOLONGKEYWORD", json!("value"), json!("comment")),
            vec![
                "Invalid keyword 'TOOLONGKEYWORD': Must be 1-8 characters, containing only A-Z, 0-9, -, _."
            ]
        );
    }

    #[test]
    fn test_keyword_lowercase() {
        assert_eq!(
            validate("lower_case", json!("value"), json!("comment")),
            vec![
                "Invalid keyword 'lower_case': Must be 1-8 characters, containing only A-Z, 0-9, -, _."
            ]
        );
    }

    #[test]
    fn test_empty_keyword_reported_when_asked() {
        assert_eq!(
            validate("", json!("value"), json!("comment")),
            vec!["Invalid keyword '': Must be 1-8 characters, containing only A-Z, 0-9, -, _."]
        );
    }

    #[test]
    fn test_empty_keyword_tolerated_when_flag_off() {
        let findings = validate_keyword_value_comment(
            "",
            &json!("value"),
            &json!("comment"),
            false,
            false,
            &mock_schema(),
        );
        assert_eq!(findings, Vec::<String>::new());
    }

    #[test]
    fn test_comment_and_history_cards_exempt() {
        assert_eq!(
            validate("COMMENT", json!(""), json!("This is a comment")),
            Vec::<String>::new()
        );
        assert_eq!(
            validate("HISTORY", Value::Null, json!("History entry")),
            Vec::<String>::new()
        );
    }

    #[test]
    fn test_integer_value_renders() {
        assert_eq!(
            validate("SOMEKEY", json!(123), json!("comment")),
            Vec::<String>::new()
        );
    }

    #[test]
    fn test_card_exceeding_80_characters() {
        assert_eq!(
            validate("SOMEKEY", json!("a".repeat(30)), json!("b".repeat(38))),
            vec!["FITS card for 'SOMEKEY' exceeds 80 characters (length: 81)."]
        );
    }

    #[test]
    fn test_card_of_exactly_80_characters_is_clean() {
        assert_eq!(
            validate("SOMEKEY", json!("a".repeat(30)), json!("b".repeat(37))),
            Vec::<String>::new()
        );
    }

    #[test]
    fn test_unrenderable_value() {
        assert_eq!(
            validate("SOMEKEY", json!([1, 2]), json!("comment")),
            vec![
                "Value for 'SOMEKEY' cannot be cast to a string: array value cannot be rendered on a FITS card"
            ]
        );
    }

    #[test]
    fn test_non_string_comment() {
        assert_eq!(
            validate("SOMEKEY", json!("value"), json!(123)),
            vec!["Comment for 'SOMEKEY' must be a string (got number)."]
        );
    }

    #[test]
    fn test_null_comment_warns_when_asked() {
        assert_eq!(
            validate("SOMEKEY", json!("val"), Value::Null),
            vec!["Keyword 'SOMEKEY' has no comment."]
        );
    }

    #[test]
    fn test_value_outside_valid_values() {
        assert_eq!(
            validate("VALIDKEY", json!("D"), json!("comment")),
            vec![
                "Value 'D' for keyword 'VALIDKEY' is not in the list of valid values: [\"A\", \"B\", \"C\"]."
            ]
        );
    }

    #[test]
    fn test_numeric_valid_values_compare_numerically() {
        // 1.0 on the card matches the integer 1 in the schema's list.
        assert_eq!(
            validate("SOLARNET", json!(1.0), json!("SOLARNET compliance")),
            Vec::<String>::new()
        );
        assert_eq!(
            validate("SOLARNET", json!(0.5), json!("SOLARNET compliance")),
            Vec::<String>::new()
        );
        assert_eq!(
            validate("SOLARNET", json!(0.75), json!("SOLARNET compliance")),
            vec![
                "Value '0.75' for keyword 'SOLARNET' is not in the list of valid values: [0.5, 1]."
            ]
        );
    }

    #[test]
    fn test_findings_accumulate() {
        // Bad keyword and missing comment in one call.
        let findings = validate("bad key!!", json!("v"), Value::Null);
        assert_eq!(findings.len(), 2);
    }
}
