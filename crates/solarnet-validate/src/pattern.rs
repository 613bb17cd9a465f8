//! Full-match helper for pattern-keyword families.

use regex::Regex;

/// Whether `keyword` fully matches the schema-declared `pattern`.
///
/// Schema patterns are unanchored (`PRSTEP(?P<n>[1-9])`); full-match
/// semantics are obtained by wrapping in `^(?:...)$`. A pattern that does
/// not compile matches nothing and is logged once per call site.
pub(crate) fn keyword_matches(pattern: &str, keyword: &str) -> bool {
    match Regex::new(&format!("^(?:{pattern})$")) {
        Ok(re) => re.is_match(keyword),
        Err(e) => {
            tracing::warn!(%pattern, error = %e, "invalid keyword pattern in schema");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_match_only() {
        assert!(keyword_matches("PRSTEP(?P<n>[1-9])", "PRSTEP1"));
        assert!(!keyword_matches("PRSTEP(?P<n>[1-9])", "PRSTEP10"));
        assert!(!keyword_matches("PRSTEP(?P<n>[1-9])", "XPRSTEP1"));
    }

    #[test]
    fn test_invalid_pattern_matches_nothing() {
        assert!(!keyword_matches("PRSTEP(", "PRSTEP1"));
    }
}
