//! Glob-style matching where `*` matches any run of characters

use crate::Result;
use ohno::IntoAppError;
use regex::{Regex, RegexBuilder};

/// Upper bound on the compiled size of a single pattern, in bytes
pub const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// A compiled wildcard pattern.
///
/// `*` matches any run of characters, including the empty run. Every other
/// character matches itself, so a pattern without `*` requires an exact match.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    pattern: String,
    regex: Regex,
}

impl WildcardPattern {
    /// Compile a wildcard pattern
    ///
    /// # Errors
    ///
    /// Returns an error if the compiled pattern would exceed [`PATTERN_SIZE_LIMIT`]
    pub fn new(pattern: &str) -> Result<Self> {
        let mut expr = String::with_capacity(pattern.len() + 8);
        expr.push_str("(?s)^");
        for (i, literal) in pattern.split('*').enumerate() {
            if i > 0 {
                expr.push_str(".*");
            }
            expr.push_str(&regex::escape(literal));
        }
        expr.push('$');

        let regex = RegexBuilder::new(&expr)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()
            .into_app_err_with(|| format!("invalid wildcard pattern '{pattern}'"))?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Compile a list of patterns
    ///
    /// # Errors
    ///
    /// Returns an error if any pattern cannot be compiled
    pub fn compile_all<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Self>> {
        patterns.iter().map(|p| Self::new(p.as_ref())).collect()
    }

    /// Whether every value matches at least one of the patterns.
    ///
    /// An empty value list is trivially covered.
    #[must_use]
    pub fn covers_all<S: AsRef<str>>(patterns: &[Self], values: &[S]) -> bool {
        values.iter().all(|v| patterns.iter().any(|p| p.matches(v.as_ref())))
    }
}
