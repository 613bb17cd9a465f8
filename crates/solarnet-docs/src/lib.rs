//! # solarnet-docs — Documentation Keyword Indexing
//!
//! Tooling for the SOLARNET documentation build: locates section markers
//! in the markdown sources, records which sections mention each schema
//! keyword, emits annotated copies of the documents, and summarizes every
//! keyword with its references in a CSV file.

pub mod indexer;
pub mod sections;

pub use indexer::{process_documentation_files, KeywordIndexer, KEYWORD_LIST_FILE};
pub use sections::{format_section_reference, section_reference_sort_key};
