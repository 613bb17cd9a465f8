//! # solarnet-cli — SOLARNET Command-Line Interface
//!
//! clap-based CLI over the SOLARNET metadata crates.
//!
//! ## Subcommands
//!
//! - `validate` — Validate every header of a FITS file against the schema
//! - `template` — Print or write an attribute template for a new header
//! - `index` — Index documentation keywords and write the CSV summary
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to domain crates — no business logic here.

pub mod index;
pub mod schema_args;
pub mod template;
pub mod validate;
