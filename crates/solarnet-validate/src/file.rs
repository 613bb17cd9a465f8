//! # File Validation
//!
//! Validates every header in a FITS file. The first header is treated as
//! the primary HDU; every following header is asserted as an observation
//! HDU (subject to its own `OBS_HDU` card). Findings are prefixed with
//! the header they belong to.

use std::path::Path;

use solarnet_core::{fits, SolarnetError};
use solarnet_schema::SolarnetSchema;

use crate::header::validate_header;
use crate::ValidationOptions;

/// Validate all headers of the FITS file at `path`.
///
/// Returns the combined findings of every header, each prefixed with
/// `"Primary Header: "` or `"Observation Header <i>: "` (1-based). An
/// unreadable or malformed file is an error, not a finding.
pub fn validate_file(
    path: &Path,
    options: &ValidationOptions,
    schema: &SolarnetSchema,
) -> Result<Vec<String>, SolarnetError> {
    let headers = fits::read_headers(path)?;

    let mut findings = Vec::new();
    for (index, header) in headers.iter().enumerate() {
        let is_primary = index == 0;
        let prefix = if is_primary {
            "Primary Header: ".to_string()
        } else {
            format!("Observation Header {index}: ")
        };
        findings.extend(
            validate_header(header, is_primary, !is_primary, options, schema)
                .into_iter()
                .map(|finding| format!("{prefix}{finding}")),
        );
    }
    Ok(findings)
}
