//! # Keyword Indexer
//!
//! Scans documentation for mentions of schema keywords, tracks which
//! sections mention each keyword, writes an annotated copy of every
//! document (backticked keywords gain a `{codeindex}` role so they land
//! in the rendered index), and produces a CSV summary of all keywords
//! with their reference sections.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use regex::Regex;

use solarnet_core::SolarnetError;
use solarnet_schema::SolarnetSchema;

use crate::sections::{section_reference_sort_key, section_references_by_line};

/// Name of the CSV summary written next to the annotated documents.
pub const KEYWORD_LIST_FILE: &str = "solarnet_keyword_list.csv";

/// Collects keyword references across documentation files.
///
/// Create one indexer, feed it every document with [`process_file`], then
/// finish with [`write_csv`].
///
/// [`process_file`]: KeywordIndexer::process_file
/// [`write_csv`]: KeywordIndexer::write_csv
pub struct KeywordIndexer<'a> {
    schema: &'a SolarnetSchema,
    references: HashMap<String, HashSet<String>>,
}

impl<'a> KeywordIndexer<'a> {
    pub fn new(schema: &'a SolarnetSchema) -> Self {
        KeywordIndexer {
            schema,
            references: HashMap::new(),
        }
    }

    /// Scan one document for keyword mentions and write its annotated
    /// copy into `output_dir` under the same file name.
    pub fn process_file(&mut self, path: &Path, output_dir: &Path) -> Result<(), SolarnetError> {
        let content = std::fs::read_to_string(path)?;
        self.scan(&content);

        let file_name = path.file_name().ok_or_else(|| SolarnetError::Parse {
            path: path.display().to_string(),
            reason: "not a file path".to_string(),
        })?;
        let output_path = output_dir.join(file_name);
        std::fs::write(&output_path, self.annotate(&content))?;
        tracing::debug!(input = %path.display(), output = %output_path.display(), "indexed document");
        Ok(())
    }

    /// Record which section mentions each schema keyword.
    ///
    /// Outside code fences a mention is the backticked form of the
    /// keyword; inside a fence it is the bare word. Each mention is
    /// attributed to the nearest section marker above it.
    fn scan(&mut self, content: &str) {
        let lines: Vec<&str> = content.split('\n').collect();
        let line_sections = section_references_by_line(&lines);

        for (keyword, _) in self.schema.attribute_key() {
            let escaped = regex::escape(keyword);
            let plain = Regex::new(&format!(r"\b{escaped}\b"));
            let backticked = Regex::new(&format!("`{escaped}`"));
            let (Ok(plain), Ok(backticked)) = (plain, backticked) else {
                continue;
            };

            let mut in_code_block = false;
            for (i, line) in lines.iter().enumerate() {
                if is_fence_delimiter(line) {
                    in_code_block = !in_code_block;
                    continue;
                }
                let pattern = if in_code_block { &plain } else { &backticked };
                if !pattern.is_match(line) {
                    continue;
                }
                if let Some(section_ref) = &line_sections[i] {
                    self.references
                        .entry(keyword.to_string())
                        .or_default()
                        .insert(section_ref.clone());
                }
            }
        }
    }

    /// Annotated copy of a document: every backticked schema keyword
    /// outside a code fence gains a `{codeindex}` role prefix. Fences are
    /// tracked with the same line toggle as [`scan`], so both passes
    /// agree on what is code, unterminated fences included.
    ///
    /// [`scan`]: KeywordIndexer::scan
    fn annotate(&self, content: &str) -> String {
        let mut in_code_block = false;
        let annotated: Vec<String> = content
            .split('\n')
            .map(|line| {
                if is_fence_delimiter(line) {
                    in_code_block = !in_code_block;
                    return line.to_string();
                }
                if in_code_block {
                    line.to_string()
                } else {
                    self.annotate_prose(line)
                }
            })
            .collect();
        annotated.join("\n")
    }

    fn annotate_prose(&self, text: &str) -> String {
        let mut annotated = text.to_string();
        for (keyword, _) in self.schema.attribute_key() {
            annotated = annotated.replace(
                &format!("`{keyword}`"),
                &format!("{{codeindex}}`{keyword}`"),
            );
        }
        annotated
    }

    /// Write the keyword summary CSV: one row per schema keyword, sorted
    /// case-insensitively, with its origin, description, requirement
    /// level, and the sorted references collected so far.
    pub fn write_csv(&self, path: &Path) -> Result<(), SolarnetError> {
        let mut writer = csv::Writer::from_path(path).map_err(|e| SolarnetError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut keywords: Vec<_> = self.schema.attribute_key().collect();
        keywords.sort_by_key(|(name, _)| name.to_lowercase());

        for (keyword, spec) in keywords {
            let mut refs: Vec<&String> = self
                .references
                .get(keyword)
                .map(|set| set.iter().collect())
                .unwrap_or_default();
            refs.sort_by_key(|r| section_reference_sort_key(r));
            let formatted_refs = refs
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join(", ");

            writer
                .write_record([
                    format!("`{keyword}`"),
                    format!("`{}`", spec.origin.as_deref().unwrap_or("")),
                    spec.description.clone().unwrap_or_default(),
                    format!("`{}`", spec.required.map(|r| r.as_str()).unwrap_or("")),
                    formatted_refs,
                ])
                .map_err(|e| SolarnetError::Parse {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// A line opening or closing a fenced code block.
fn is_fence_delimiter(line: &str) -> bool {
    line.trim().starts_with("```")
}

/// Index a set of documentation files: annotate each into `output_dir`
/// and write the CSV summary there.
pub fn process_documentation_files<P: AsRef<Path>>(
    files: &[P],
    output_dir: &Path,
    schema: &SolarnetSchema,
) -> Result<(), SolarnetError> {
    std::fs::create_dir_all(output_dir)?;
    let mut indexer = KeywordIndexer::new(schema);
    for file in files {
        indexer.process_file(file.as_ref(), output_dir)?;
    }
    indexer.write_csv(&output_dir.join(KEYWORD_LIST_FILE))
}
