//! # solarnet-validate — SOLARNET Header Validation
//!
//! Validates FITS headers against a [`SolarnetSchema`]. Every rule
//! violation is surfaced as a plain-text finding string, never as an
//! error: validation is exhaustive per call and never fails fast on a
//! single bad card. Errors are reserved for structural problems (a file
//! that cannot be opened or parsed).
//!
//! Finding messages follow stable templates so that golden-output tests
//! can assert exact text.
//!
//! [`SolarnetSchema`]: solarnet_schema::SolarnetSchema

pub mod card;
pub mod datatype;
pub mod file;
pub mod header;

mod pattern;

pub use card::validate_keyword_value_comment;
pub use datatype::validate_keyword_data_type;
pub use file::validate_file;
pub use header::{check_obs_hdu, validate_header};

/// Switches for the optional validation warnings.
///
/// All default to off; the mandatory structural and requirement checks
/// run regardless.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationOptions {
    /// Report cards with an empty or whitespace keyword.
    pub warn_empty_keyword: bool,
    /// Report keywords with no comment.
    pub warn_no_comment: bool,
    /// Check values against the keyword's declared data type.
    pub warn_data_type: bool,
    /// Report schema-optional keywords absent from the header.
    pub warn_missing_optional: bool,
}
