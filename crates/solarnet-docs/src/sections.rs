//! # Section Markers
//!
//! The documentation uses MyST-style section targets, `(3.1)=` or
//! `(appendix-vi-a)=`, to anchor cross-references. This module locates
//! those markers, renders them as readable reference links, and provides
//! the ordering used when listing references.

use regex::Regex;

/// Matches a section target: a dotted numeric id or an appendix id.
pub(crate) fn section_marker_regex() -> Regex {
    Regex::new(r"\(((?:[0-9]+\.[0-9]+(?:\.[0-9]+)*)|(?:appendix-[a-z0-9-]+))\)=")
        .expect("section marker regex is valid")
}

/// Render a section id as a markdown reference link.
///
/// Numeric sections keep their id as the link text; appendix ids are
/// expanded to `Appendix VI` / `Appendix VI-a` form, uppercasing the
/// roman-numeral part.
pub fn format_section_reference(section_id: &str) -> String {
    let Some(appendix_name) = section_id.strip_prefix("appendix-") else {
        return format!("[{section_id}](#{section_id})");
    };

    let display_name = if let Some((main_part, sub_part)) = appendix_name.split_once('-') {
        format!("Appendix {}-{}", main_part.to_uppercase(), sub_part)
    } else {
        match split_appendix_name(appendix_name) {
            Some((roman_part, "")) => format!("Appendix {}", roman_part.to_uppercase()),
            Some((roman_part, letter_part)) => {
                format!("Appendix {}-{}", roman_part.to_uppercase(), letter_part)
            }
            None => format!("Appendix {}", appendix_name.to_uppercase()),
        }
    };
    format!("[{display_name}](#{section_id})")
}

/// Split a single-token appendix name into its roman-numeral part and a
/// trailing letter suffix (`via` becomes `vi` + `a`). Names that do not
/// start with a roman numeral are not split.
fn split_appendix_name(name: &str) -> Option<(&str, &str)> {
    let roman_len = name
        .chars()
        .take_while(|c| matches!(c, 'i' | 'v' | 'x'))
        .count();
    if roman_len == 0 {
        return None;
    }
    let rest = &name[roman_len..];
    let letter_len = rest.chars().take_while(char::is_ascii_lowercase).count();
    Some((&name[..roman_len], &rest[..letter_len]))
}

/// The formatted reference in effect for each line of a document: the
/// reference of the nearest section marker at or above that line, `None`
/// before the first marker.
pub fn section_references_by_line(lines: &[&str]) -> Vec<Option<String>> {
    let marker = section_marker_regex();
    let mut current: Option<String> = None;
    lines
        .iter()
        .map(|line| {
            if let Some(captures) = marker.captures(line) {
                current = Some(format_section_reference(&captures[1]));
            }
            current.clone()
        })
        .collect()
}

/// Ordering for formatted section references: numeric sections first in
/// dotted-number order, then appendices alphabetically, then anything
/// unrecognized.
pub fn section_reference_sort_key(reference: &str) -> (u8, [u32; 3], String) {
    let Some(text) = link_text(reference) else {
        return (9, [0; 3], reference.to_string());
    };

    if text.starts_with("Appendix ") {
        return (2, [0; 3], text.to_string());
    }

    let parts: Result<Vec<u32>, _> = text.split('.').map(str::parse).collect();
    match parts {
        Ok(mut numbers) => {
            numbers.resize(3, 0);
            (1, [numbers[0], numbers[1], numbers[2]], String::new())
        }
        Err(_) => (9, [0; 3], text.to_string()),
    }
}

/// The `[...]` text of a markdown link.
fn link_text(reference: &str) -> Option<&str> {
    let start = reference.find('[')? + 1;
    let end = reference[start..].find(']')? + start;
    Some(&reference[start..end])
}
