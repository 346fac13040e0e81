// SPDX-License-Identifier: MIT

//! Audit configuration — what to read, what to write, what to check.
//!
//! Every field has a default tuned for a site theme whose variables look
//! like `--text-primary`, `--main-background-color`, `--button-primary-bg`.
//! A TOML file can override any subset of them:
//!
//! ```toml
//! stylesheet = "assets/theme.css"
//! report = "target/contrast.csv"
//! background_targets = ["--main-background-color", "--card-bg"]
//!
//! [[pairs]]
//! foreground = "--text-primary"
//! background = "--main-background-color"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AuditError, Result};
use crate::patterns::NamePatterns;

/// A (foreground variable, background variable) pair under evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuditPair {
    pub foreground: String,
    pub background: String,
}

impl AuditPair {
    #[must_use]
    pub fn new(foreground: impl Into<String>, background: impl Into<String>) -> Self {
        Self {
            foreground: foreground.into(),
            background: background.into(),
        }
    }
}

/// Everything the audits need besides the stylesheet text itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Stylesheet to audit.
    pub stylesheet: PathBuf,

    /// Where the full-palette CSV goes. Overwritten on every run.
    pub report: PathBuf,

    /// The page background. Used when a pair's background is missing or
    /// transparent, and as the backdrop for translucent backgrounds.
    pub main_background: String,

    /// Curated pairs for the fixed-pair audit.
    pub pairs: Vec<AuditPair>,

    /// Background roles every palette variable is checked against.
    pub background_targets: Vec<String>,

    /// Regexes selecting "this is rendered text or an icon" variable names
    /// for the semantic audit.
    pub semantic_patterns: Vec<String>,

    /// How many failing palette rows to print.
    pub top_failures: usize,

    /// How many semantic failures to print.
    pub semantic_failure_limit: usize,
}

const MAIN_BACKGROUND: &str = "--main-background-color";

const DEFAULT_PAIRS: &[(&str, &str)] = &[
    ("--text-primary", MAIN_BACKGROUND),
    ("--text-secondary", MAIN_BACKGROUND),
    ("--button-primary-text", "--button-primary-bg"),
    ("--form-text", "--form-bg"),
    ("--table-header-text", MAIN_BACKGROUND),
    ("--back-btn-color", "--back-btn-bg"),
    ("--theme-toggle-color", "--theme-toggle-bg"),
    ("--button-text", "--button-bg"),
];

const DEFAULT_BACKGROUND_TARGETS: &[&str] = &[
    MAIN_BACKGROUND,
    "--form-bg",
    "--button-primary-bg",
    "--theme-toggle-bg",
    "--back-btn-bg",
];

const DEFAULT_SEMANTIC_PATTERNS: &[&str] = &[
    r".*-color$",
    r".*-text$",
    r"^--text",
    r"^--form-text$",
    r"^--button-primary-text$",
    r"^--table-header-text$",
    r"^--dl-title$",
    r"^--theme-toggle-color$",
    r"^--back-btn-color$",
];

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            stylesheet: PathBuf::from("public/src/assets/css/theme.css"),
            report: PathBuf::from("tools/palette_audit.csv"),
            main_background: MAIN_BACKGROUND.to_string(),
            pairs: DEFAULT_PAIRS
                .iter()
                .map(|(fg, bg)| AuditPair::new(*fg, *bg))
                .collect(),
            background_targets: DEFAULT_BACKGROUND_TARGETS
                .iter()
                .map(ToString::to_string)
                .collect(),
            semantic_patterns: DEFAULT_SEMANTIC_PATTERNS
                .iter()
                .map(ToString::to_string)
                .collect(),
            top_failures: 12,
            semantic_failure_limit: 20,
        }
    }
}

impl AuditConfig {
    /// Load a TOML config file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// [`AuditError::ReadConfig`] if the file can't be read,
    /// [`AuditError::Config`] if it isn't valid TOML for this schema.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| AuditError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| AuditError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Compile [`semantic_patterns`](Self::semantic_patterns).
    ///
    /// # Errors
    ///
    /// [`AuditError::InvalidPattern`] naming the first pattern that fails.
    pub fn foreground_patterns(&self) -> Result<NamePatterns> {
        NamePatterns::new(&self.semantic_patterns)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
