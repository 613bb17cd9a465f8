//! # solarnet-core — Foundational Types for SOLARNET Metadata Validation
//!
//! This crate defines the data model shared by the schema and validation
//! crates. Every other crate in the workspace depends on `solarnet-core`;
//! it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed enumerations for schema vocabulary.** `RequirementLevel` and
//!    `DataType` are exhaustive enums, not bare strings. An unrecognized
//!    data-type name is a distinct `DataType::Unknown` variant so that
//!    validation can report it instead of crashing.
//!
//! 2. **`serde_json::Value` as the card value model.** FITS card values are
//!    loosely typed (logical, integer, real, text); the JSON value tree
//!    covers all of them and keeps the schema document and the header in
//!    one value model.
//!
//! 3. **Headers are ordered card lists, not maps.** Keyword uniqueness is
//!    not assumed; pattern-matched keyword families (`PRSTEP1`, `PRSTEP2`,
//!    ...) rely on multiple distinct keys, and findings are reported in
//!    card order.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `solarnet-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod datatype;
pub mod error;
pub mod fits;
pub mod header;
pub mod requirement;
pub mod value;

pub use datatype::DataType;
pub use error::SolarnetError;
pub use header::{Card, Header};
pub use requirement::RequirementLevel;
pub use value::{display_value, json_type_name, render_card_value};
