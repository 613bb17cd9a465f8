//! # solarnet-schema — Layered SOLARNET Keyword Schema
//!
//! Loads and resolves the SOLARNET keyword schema: the packaged default
//! document plus caller-supplied override layers, deep-merged in
//! latest-priority order. The resolved [`SolarnetSchema`] exposes keyword
//! metadata lookup, default-value materialization, requirement-level
//! queries, and attribute templates; it is consumed read-only by every
//! validator.
//!
//! The default schema is an explicit build-time asset
//! (`data/SOLARNET_attr_schema.yaml`, embedded via `include_str!`), never
//! ambient global state.

pub mod merge;
pub mod model;

pub use merge::merge_layer;
pub use model::{
    load_yaml_file, parse_yaml, AttributeSpec, ConditionalRequirement, SolarnetSchema,
    DEFAULT_ATTR_SCHEMA, INSTRUMENT_TYPE_KEY, OBSERVATORY_TYPE_KEY,
};
