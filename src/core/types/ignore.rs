use regex::{Regex, RegexSet};
use serde::Serialize;

/// Matches both quote styles of the strict-mode directive
pub const USE_STRICT_PATTERN: &str = r#"('use strict'|"use strict");"#;

/// A regex source naming code the mutation engine must leave alone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IgnorePattern(String);

impl IgnorePattern {
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    pub fn use_strict() -> Self {
        Self::new(USE_STRICT_PATTERN)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_regex(&self) -> Result<Regex, regex::Error> {
        Regex::new(&self.0)
    }
}

/// Compiled form of a resolved `ignore` list
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    set: RegexSet,
}

impl IgnoreMatcher {
    pub fn new(patterns: &[IgnorePattern]) -> Result<Self, regex::Error> {
        let set = RegexSet::new(patterns.iter().map(IgnorePattern::as_str))?;
        Ok(Self { set })
    }

    pub fn is_ignored(&self, text: &str) -> bool {
        self.set.is_match(text)
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn use_strict_matches_both_quote_styles() {
        let matcher = IgnoreMatcher::new(&[IgnorePattern::use_strict()]).unwrap();
        assert!(matcher.is_ignored("'use strict';"));
        assert!(matcher.is_ignored("    \"use strict\";"));
        assert!(!matcher.is_ignored("use strict"));
        assert!(!matcher.is_ignored("var strict = 'use';"));
    }

    #[test]
    fn any_pattern_in_the_set_ignores() {
        let matcher = IgnoreMatcher::new(&[
            IgnorePattern::use_strict(),
            IgnorePattern::new(r"console\.log\("),
        ])
        .unwrap();
        assert_eq!(matcher.len(), 2);
        assert!(matcher.is_ignored("console.log(x);"));
        assert!(!matcher.is_ignored("console.warn(x);"));
    }

    #[test]
    fn invalid_regex_is_reported() {
        assert!(IgnorePattern::new("(unclosed").to_regex().is_err());
        assert!(IgnoreMatcher::new(&[IgnorePattern::new("[a-")]).is_err());
    }
}
