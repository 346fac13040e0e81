// SPDX-License-Identifier: MIT

//! Theme scopes and CSS custom-property cascading.
//!
//! A themed scope (`[data-theme="dark"]`, the dark media query) only
//! redeclares the variables it changes; everything else is inherited from
//! `:root`. [`resolve`] models that: local map first, then the fallback.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Variable name (`--text-primary`) → raw, unparsed CSS value.
///
/// A `BTreeMap` so every sweep visits variables in name order and two runs
/// over the same stylesheet print the same report.
pub type VariableMap = BTreeMap<String, String>;

static EMPTY: VariableMap = BTreeMap::new();

/// Look up `name` in `local`, then in `fallback`.
#[must_use]
pub fn resolve<'a>(name: &str, local: &'a VariableMap, fallback: &'a VariableMap) -> Option<&'a str> {
    local
        .get(name)
        .or_else(|| fallback.get(name))
        .map(String::as_str)
}

// ─── ThemeKind ──────────────────────────────────────────────────────────────

/// Which block of the stylesheet a scope came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThemeKind {
    /// `:root` — the default (light) theme.
    Light,
    /// `[data-theme="dark"]` — the explicit dark theme.
    Dark,
    /// `@media (prefers-color-scheme: dark) { :root { ... } }` — what the
    /// first paint uses when the OS prefers dark.
    MediaDark,
}

impl ThemeKind {
    /// Short name used in report rows.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::MediaDark => "media-dark",
        }
    }

    /// Descriptive heading used in console output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => "light (root)",
            Self::Dark => "dark (data-theme)",
            Self::MediaDark => "dark (prefers-color-scheme media)",
        }
    }
}

impl fmt::Display for ThemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── ThemeScope ─────────────────────────────────────────────────────────────

/// A theme's own variables layered over the root variables.
#[derive(Debug, Clone, Copy)]
pub struct ThemeScope<'a> {
    pub kind: ThemeKind,
    local: &'a VariableMap,
    fallback: &'a VariableMap,
}

impl<'a> ThemeScope<'a> {
    /// A scope whose missing variables fall back to `fallback`.
    #[must_use]
    pub const fn new(kind: ThemeKind, local: &'a VariableMap, fallback: &'a VariableMap) -> Self {
        Self {
            kind,
            local,
            fallback,
        }
    }

    /// A scope with nothing to inherit from (the root scope itself).
    #[must_use]
    pub fn standalone(kind: ThemeKind, local: &'a VariableMap) -> Self {
        Self::new(kind, local, &EMPTY)
    }

    /// Resolve a variable through this scope.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&'a str> {
        resolve(name, self.local, self.fallback)
    }

    /// Every variable visible in this scope, local or inherited, sorted.
    #[must_use]
    pub fn names(&self) -> BTreeSet<&'a str> {
        self.local
            .keys()
            .chain(self.fallback.keys())
            .map(String::as_str)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
