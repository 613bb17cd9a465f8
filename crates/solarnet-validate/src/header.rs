//! # Header Validation
//!
//! Whole-header checks: reconciling the caller's HDU-role assertion with
//! the `OBS_HDU` card, presence of required (and optionally optional)
//! keywords including pattern families, and the per-card structural and
//! data-type checks.

use solarnet_core::{display_value, Header};
use solarnet_schema::{AttributeSpec, SolarnetSchema};

use crate::card::validate_keyword_value_comment;
use crate::datatype::validate_keyword_data_type;
use crate::pattern::keyword_matches;
use crate::ValidationOptions;

/// Reconcile the caller's `is_obs` assertion with the header's `OBS_HDU`
/// card.
///
/// A well-formed `OBS_HDU` value (0 or 1) is authoritative: it replaces
/// the assertion, with a warning logged on any disagreement. An absent
/// card leaves the assertion in place, warning when the caller asserted
/// an observation HDU the header does not declare. Any other value is a
/// finding and the header is treated as non-observation.
pub fn check_obs_hdu(header: &Header, is_obs: bool) -> (bool, Vec<String>) {
    let Some(value) = header.get("OBS_HDU") else {
        if is_obs {
            tracing::warn!(
                "Overriding `is_obs`: caller asserts an observation HDU but the header \
                 carries no OBS_HDU keyword"
            );
        }
        return (is_obs, Vec::new());
    };

    match value.as_i64() {
        Some(0) => {
            if is_obs {
                tracing::warn!("Overriding `is_obs`: header declares OBS_HDU = 0");
            }
            (false, Vec::new())
        }
        Some(1) => {
            if !is_obs {
                tracing::warn!("Overriding `is_obs`: header declares OBS_HDU = 1");
            }
            (true, Vec::new())
        }
        _ => (
            false,
            vec![format!(
                "Invalid OBS_HDU value: {}. Must be 0 or 1.",
                display_value(value)
            )],
        ),
    }
}

/// Validate one header against the schema.
///
/// `is_primary` and `is_obs` describe the HDU's role; `is_obs` is
/// reconciled against the header's own `OBS_HDU` card first. Findings are
/// ordered: OBS_HDU problems, missing required keywords, missing optional
/// keywords (when enabled), then per-card findings in card order.
pub fn validate_header(
    header: &Header,
    is_primary: bool,
    is_obs: bool,
    options: &ValidationOptions,
    schema: &SolarnetSchema,
) -> Vec<String> {
    let (is_obs, mut findings) = check_obs_hdu(header, is_obs);

    for (keyword, spec) in schema.required_keywords(is_primary, is_obs) {
        if let Some(finding) = missing_attribute("Required", keyword, spec, header) {
            findings.push(finding);
        }
    }

    if options.warn_missing_optional {
        for (keyword, spec) in schema.optional_keywords() {
            if let Some(finding) = missing_attribute("Optional", keyword, spec, header) {
                findings.push(finding);
            }
        }
    }

    for card in header {
        findings.extend(validate_keyword_value_comment(
            &card.keyword,
            &card.value,
            &card.comment,
            options.warn_empty_keyword,
            options.warn_no_comment,
            schema,
        ));
        // A blank keyword cannot resolve in the schema; the structural
        // finding above already covers it.
        if options.warn_data_type && !card.keyword.trim().is_empty() {
            findings.extend(validate_keyword_data_type(&card.keyword, &card.value, schema));
        }
    }

    findings
}

/// Finding for a schema keyword absent from the header, or `None` when it
/// is present. A keyword with a pattern is satisfied by any header key
/// that fully matches the pattern.
fn missing_attribute(
    kind: &str,
    keyword: &str,
    spec: &AttributeSpec,
    header: &Header,
) -> Option<String> {
    if header.contains_key(keyword) {
        return None;
    }
    match spec.pattern.as_deref() {
        Some(pattern) => {
            if header.keys().any(|key| keyword_matches(pattern, key)) {
                None
            } else {
                Some(format!(
                    "Missing {kind} Attribute: {keyword}. \
                     No pattern match for {keyword} with pattern {pattern}"
                ))
            }
        }
        None => Some(format!("Missing {kind} Attribute: {keyword}")),
    }
}
