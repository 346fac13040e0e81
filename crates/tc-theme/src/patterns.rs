// SPDX-License-Identifier: MIT

//! Name-based foreground classification for the semantic audit.
//!
//! Guessing which variables end up as rendered text from their names alone
//! is a heuristic. The audit engine only sees a predicate (`Fn(&str) ->
//! bool`); [`NamePatterns`] is the configurable default.

use regex::Regex;

use crate::error::{AuditError, Result};

/// A set of regexes; a name matches if any of them matches.
#[derive(Debug, Clone)]
pub struct NamePatterns {
    patterns: Vec<Regex>,
}

impl NamePatterns {
    /// Compile every pattern.
    ///
    /// # Errors
    ///
    /// [`AuditError::InvalidPattern`] for the first pattern that fails to compile.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                let p = p.as_ref();
                Regex::new(p).map_err(|source| AuditError::InvalidPattern {
                    pattern: p.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Whether `name` looks like a foreground variable.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(name))
    }

    /// Number of patterns in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the set is empty (and so matches nothing).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
