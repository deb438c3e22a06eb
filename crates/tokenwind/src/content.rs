//! Content globs: the files the class generator scans for utility usage.
//!
//! Patterns are passed through untouched apart from de-duplication. Syntax
//! checks are limited to what would make a pattern unusable by any glob
//! engine: empty patterns and unbalanced `[...]` or `{...}` groups.

use indexmap::IndexSet;

use crate::error::{Result, SchemaError};

/// De-duplicates content patterns, keeping the first occurrence of each.
pub fn build_content_globs<I, S>(patterns: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    patterns
        .into_iter()
        .map(Into::into)
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}

/// Checks that a pattern is non-empty and its groups are balanced.
pub fn validate_glob(pattern: &str) -> Result<()> {
    let invalid = |message: &str| SchemaError::InvalidGlob {
        pattern: pattern.to_string(),
        message: message.to_string(),
    };

    if pattern.trim().is_empty() {
        return Err(invalid("pattern is empty"));
    }

    let mut in_class = false;
    let mut brace_depth = 0usize;
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if chars.next().is_none() {
                    return Err(invalid("dangling escape"));
                }
            }
            '[' if !in_class => in_class = true,
            ']' if in_class => in_class = false,
            '{' if !in_class => brace_depth += 1,
            '}' if !in_class => {
                brace_depth = brace_depth
                    .checked_sub(1)
                    .ok_or_else(|| invalid("unmatched '}'"))?;
            }
            _ => {}
        }
    }

    if in_class {
        return Err(invalid("unclosed '['"));
    }
    if brace_depth > 0 {
        return Err(invalid("unclosed '{'"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_dedups_preserving_order() {
        let globs = build_content_globs(vec![
            "./src/**/*.rs",
            "./index.html",
            "./src/**/*.rs",
            "./src/**/*.css",
        ]);
        assert_eq!(
            globs,
            vec!["./src/**/*.rs", "./index.html", "./src/**/*.css"]
        );
    }

    #[test]
    fn test_build_does_not_normalize() {
        let globs = build_content_globs(vec!["src/**/*.rs", "./src/**/*.rs"]);
        assert_eq!(globs.len(), 2);
    }

    #[test]
    fn test_validate_accepts_common_patterns() {
        assert!(validate_glob("./src/**/*.rs").is_ok());
        assert!(validate_glob("./src/**/*.{html,css}").is_ok());
        assert!(validate_glob("./assets/[a-z]*.svg").is_ok());
        assert!(validate_glob("./weird\\{name.rs").is_ok());
    }

    #[test]
    fn test_validate_rejects_broken_patterns() {
        assert!(validate_glob("").is_err());
        assert!(validate_glob("./src/**/*.{html,css").is_err());
        assert!(validate_glob("./src/}*.rs").is_err());
        assert!(validate_glob("./src/[a-z*.rs").is_err());
        assert!(validate_glob("./src\\").is_err());
    }

    #[test]
    fn test_validate_error_names_pattern() {
        let err = validate_glob("./src/{a").unwrap_err();
        assert!(err.to_string().contains("./src/{a"));
    }
}
