//! CONTAINS matching: substring and regex modes
//!
//! The matched content comes from a literal string, a file read
//! synchronously at evaluation time, or the current value of a variable.
//! All textual fields (content, file path, pattern) may carry `${name}`
//! references and are substituted against the attached context first.

use crate::error::{Result, RuntimeError};
use instill_core::refs::substitute;
use instill_core::{ContainsSource, InstallData, MatchMode};
use regex::RegexBuilder;
use std::fs;

/// Evaluate a contains condition against the given context.
pub fn matches(
    condition_id: &str,
    source: &ContainsSource,
    pattern: &str,
    mode: &MatchMode,
    context: &InstallData,
) -> Result<bool> {
    let lookup = |name: &str| context.variable(name);

    let content = match source {
        ContainsSource::Text(text) => substitute(text, lookup),
        // An unset variable reads as empty; Exists is the leaf for set-ness
        ContainsSource::Variable(name) => context.variable(name).unwrap_or_default(),
        ContainsSource::File(path) => {
            let path = substitute(path, lookup);
            fs::read_to_string(&path).map_err(|source| RuntimeError::FileRead { path, source })?
        }
    };
    let pattern = substitute(pattern, lookup);

    match mode {
        MatchMode::Substring { case_insensitive } => {
            if *case_insensitive {
                Ok(content.to_lowercase().contains(&pattern.to_lowercase()))
            } else {
                Ok(content.contains(&pattern))
            }
        }
        MatchMode::Regex {
            case_insensitive,
            whole_line,
            multiline,
            dot_all,
        } => {
            let pattern = if *whole_line {
                format!("^(?:{pattern})$")
            } else {
                pattern
            };
            let regex = RegexBuilder::new(&pattern)
                .case_insensitive(*case_insensitive)
                // Whole-line anchoring applies per line of the content
                .multi_line(*multiline || *whole_line)
                .dot_matches_new_line(*dot_all)
                .build()
                .map_err(|source| RuntimeError::InvalidRegex {
                    condition: condition_id.to_string(),
                    source,
                })?;
            Ok(regex.is_match(&content))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use instill_core::{OsKind, Platform};

    fn context() -> InstallData {
        InstallData::new(Platform::new(OsKind::Linux, "x86_64", ""))
    }

    fn substring(case_insensitive: bool) -> MatchMode {
        MatchMode::Substring { case_insensitive }
    }

    #[test]
    fn test_substring_case_sensitivity() {
        let ctx = context();
        let source = ContainsSource::Text("This is A line of text".into());

        assert!(matches("c", &source, "line of text", &substring(false), &ctx).unwrap());
        assert!(!matches("c", &source, "LINE", &substring(false), &ctx).unwrap());
        assert!(matches("c", &source, "LINE", &substring(true), &ctx).unwrap());
    }

    #[test]
    fn test_variable_source() {
        let ctx = context();
        ctx.set_variable("greeting", "hello world");
        let source = ContainsSource::Variable("greeting".into());

        assert!(matches("c", &source, "world", &substring(false), &ctx).unwrap());
        // Unset variable reads as empty content
        let unset = ContainsSource::Variable("nope".into());
        assert!(!matches("c", &unset, "world", &substring(false), &ctx).unwrap());
    }

    #[test]
    fn test_refs_substituted_in_text_and_pattern() {
        let ctx = context();
        ctx.set_variable("name", "prod");
        let source = ContainsSource::Text("mode=${name}".into());

        assert!(matches("c", &source, "mode=${name}", &substring(false), &ctx).unwrap());
    }

    #[test]
    fn test_regex_whole_line() {
        let ctx = context();
        let source = ContainsSource::Text("first\nmode=prod\nlast".into());
        let mode = MatchMode::Regex {
            case_insensitive: false,
            whole_line: true,
            multiline: false,
            dot_all: false,
        };

        assert!(matches("c", &source, "mode=\\w+", &mode, &ctx).unwrap());
        // Substring of a line does not match in whole-line mode
        assert!(!matches("c", &source, "mode", &mode, &ctx).unwrap());
    }

    #[test]
    fn test_invalid_regex_names_condition() {
        let ctx = context();
        let source = ContainsSource::Text("anything".into());
        let mode = MatchMode::Regex {
            case_insensitive: false,
            whole_line: false,
            multiline: false,
            dot_all: false,
        };

        let err = matches("bad.regex", &source, "(unclosed", &mode, &ctx).unwrap_err();
        assert!(err.to_string().contains("bad.regex"));
    }

    #[test]
    fn test_missing_file_propagates_error() {
        let ctx = context();
        let source = ContainsSource::File("/definitely/not/here".into());

        let err = matches("c", &source, "x", &substring(false), &ctx).unwrap_err();
        assert!(matches!(err, RuntimeError::FileRead { .. }));
    }
}
