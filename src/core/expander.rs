use std::collections::HashSet;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use log::{debug, trace};
use serde_json::Value;

use crate::types::{ResolveError, ResolveResult};

/// Expands wildcard patterns into the regular files they match
#[derive(Debug, Clone)]
pub struct PathExpander {
    options: MatchOptions,
}

impl PathExpander {
    pub fn new() -> Self {
        Self {
            options: MatchOptions {
                case_sensitive: true,
                require_literal_separator: false,
                // dotfiles are matched like any other file
                require_literal_leading_dot: false,
            },
        }
    }

    /// Matches each pattern relative to `base_path` and unions the results.
    /// A path is kept at the position where it was first seen.
    pub fn expand<S: AsRef<str>>(
        &self,
        patterns: &[S],
        base_path: &Path,
    ) -> ResolveResult<Vec<PathBuf>> {
        let mut seen: HashSet<PathBuf> = HashSet::new();
        let mut files = vec![];

        for pattern in patterns {
            let pattern = pattern.as_ref();
            let full_pattern = join_pattern(base_path, pattern);
            let entries = glob::glob_with(&full_pattern, self.options).map_err(|source| {
                ResolveError::Pattern {
                    pattern: pattern.to_string(),
                    source,
                }
            })?;

            let mut matched = 0;
            for entry in entries {
                let path = entry?;
                if !path.is_file() {
                    continue;
                }
                matched += 1;
                if seen.insert(path.clone()) {
                    files.push(path);
                }
            }
            trace!("Pattern {full_pattern} matched {matched} file(s)");
        }

        Ok(files)
    }

    /// Expands an option value: absent, a single pattern, or a list of patterns
    pub fn expand_value(
        &self,
        field: &str,
        value: Option<&Value>,
        base_path: &Path,
    ) -> ResolveResult<Vec<PathBuf>> {
        let patterns = patterns_from_value(field, value)?;
        let files = self.expand(&patterns, base_path)?;
        debug!("Expanded {field} into {} file(s)", files.len());
        Ok(files)
    }
}

impl Default for PathExpander {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads a pattern-or-list option. Absent and null both mean no patterns.
pub fn patterns_from_value(field: &str, value: Option<&Value>) -> ResolveResult<Vec<String>> {
    let invalid = || ResolveError::InvalidField {
        field: field.to_string(),
        expected: "a pattern or a list of patterns",
    };
    match value {
        None | Some(Value::Null) => Ok(vec![]),
        Some(Value::String(pattern)) => Ok(vec![pattern.clone()]),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(&invalid))
            .collect(),
        Some(_) => Err(invalid()),
    }
}

// The base path is escaped so only the pattern part can carry wildcards.
// Joining onto an absolute pattern yields the pattern itself.
fn join_pattern(base_path: &Path, pattern: &str) -> String {
    let base = Pattern::escape(&base_path.to_string_lossy());
    Path::new(&base).join(pattern).to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_and_null_values_have_no_patterns() {
        assert!(patterns_from_value("code", None).unwrap().is_empty());
        assert!(patterns_from_value("code", Some(&Value::Null)).unwrap().is_empty());
    }

    #[test]
    fn single_pattern_becomes_a_list() {
        assert_eq!(
            patterns_from_value("code", Some(&json!("src/*.js"))).unwrap(),
            vec!["src/*.js".to_string()]
        );
    }

    #[test]
    fn non_string_patterns_are_rejected() {
        for value in [json!(3), json!({"a": 1}), json!(["ok", 7])] {
            match patterns_from_value("specs", Some(&value)) {
                Err(ResolveError::InvalidField { field, .. }) => assert_eq!(field, "specs"),
                other => panic!("expected InvalidField, got {other:?}"),
            }
        }
    }

    #[test]
    fn base_path_wildcards_are_escaped() {
        assert_eq!(
            join_pattern(Path::new("odd[dir]"), "*.js"),
            Path::new("odd[[]dir[]]").join("*.js").to_string_lossy()
        );
    }

    #[test]
    fn absolute_patterns_ignore_the_base_path() {
        let absolute = if cfg!(windows) { r"C:\abs\*.js" } else { "/abs/*.js" };
        assert_eq!(join_pattern(Path::new("base"), absolute), absolute);
    }
}
