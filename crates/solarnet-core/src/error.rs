//! # Error Types
//!
//! The error taxonomy for SOLARNET metadata handling. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! Structural problems (unusable schema configuration, malformed schema
//! documents, unreadable files) raise and propagate. Semantic validation
//! problems (missing keyword, bad type, bad value) are never errors: they
//! are collected as finding strings by the validation crate.

use thiserror::Error;

/// Top-level error type for SOLARNET metadata operations.
#[derive(Error, Debug)]
pub enum SolarnetError {
    /// Schema construction was requested with no usable layers.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A schema document is malformed or incomplete.
    #[error("schema error: {0}")]
    Schema(String),

    /// Lookup of an unknown attribute name.
    #[error("cannot find metadata for attribute name: {attribute}")]
    NotFound {
        /// The attribute name that was looked up.
        attribute: String,
    },

    /// A source file could not be parsed.
    #[error("parse error in '{path}': {reason}")]
    Parse {
        /// Path to the file that failed to parse.
        path: String,
        /// Reason the file could not be parsed.
        reason: String,
    },

    /// IO error reading a schema layer or a FITS file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
