// SPDX-License-Identifier: MIT

//! Variable extraction from a theme stylesheet.
//!
//! Three blocks matter:
//!
//! ```css
//! :root { --text-primary: #1e293b; ... }            /* light, and the base */
//! [data-theme="dark"] { --text-primary: #e2e8f0; }  /* explicit dark */
//! @media (prefers-color-scheme: dark) {
//!   :root { --text-primary: #e2e8f0; }              /* OS-preferred dark */
//! }
//! ```
//!
//! Blocks are not parsed as nested CSS. A block body runs from the opening
//! brace after its selector to the first `}` that starts a line, so the
//! declarations inside must not contain braces of their own. The first
//! `:root {` in the file is taken as the root block.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AuditError, Result};
use crate::scope::{ThemeKind, ThemeScope, VariableMap};

static ROOT_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s):root\s*\{(.*?)\n\}").expect("root block pattern is valid")
});

static DARK_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)\[data-theme=["']dark["']\]\s*\{(.*?)\n\}"#)
        .expect("dark block pattern is valid")
});

static MEDIA_DARK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)@media\s*\(prefers-color-scheme:\s*dark\)\s*\{.*?:root\s*\{(.*?)\n\}")
        .expect("media dark pattern is valid")
});

static DECLARATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"--([a-zA-Z0-9\-]+)\s*:\s*([^;]+);").expect("declaration pattern is valid")
});

/// The variable maps of one stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    /// `:root` — light theme and the fallback for every other scope.
    pub root: VariableMap,
    /// `[data-theme="dark"]`; empty when the block is absent.
    pub dark: VariableMap,
    /// `:root` inside the dark color-scheme media query; empty when absent.
    pub media_dark: VariableMap,
}

impl Stylesheet {
    /// Read and extract a stylesheet from disk.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::ReadStylesheet`] if the file can't be read.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| AuditError::ReadStylesheet {
            path: path.to_path_buf(),
            source,
        })?;
        let sheet = extract(&text);
        log::debug!(
            "{}: {} root, {} dark, {} media-dark variables",
            path.display(),
            sheet.root.len(),
            sheet.dark.len(),
            sheet.media_dark.len()
        );
        Ok(sheet)
    }

    /// The variables declared for one theme block.
    #[must_use]
    pub const fn block(&self, kind: ThemeKind) -> &VariableMap {
        match kind {
            ThemeKind::Light => &self.root,
            ThemeKind::Dark => &self.dark,
            ThemeKind::MediaDark => &self.media_dark,
        }
    }

    /// Scopes worth auditing: light always, each dark variant only when its
    /// block declared something.
    #[must_use]
    pub fn scopes(&self) -> Vec<ThemeScope<'_>> {
        let mut scopes = vec![ThemeScope::standalone(ThemeKind::Light, &self.root)];
        for kind in [ThemeKind::Dark, ThemeKind::MediaDark] {
            let block = self.block(kind);
            if !block.is_empty() {
                scopes.push(ThemeScope::new(kind, block, &self.root));
            }
        }
        scopes
    }

    /// Dark variants that have no block in this stylesheet.
    #[must_use]
    pub fn missing_themes(&self) -> Vec<ThemeKind> {
        [ThemeKind::Dark, ThemeKind::MediaDark]
            .into_iter()
            .filter(|kind| self.block(*kind).is_empty())
            .collect()
    }
}

/// Extract the root, dark-attribute and dark-media variable maps.
///
/// Absent blocks produce empty maps.
#[must_use]
pub fn extract(text: &str) -> Stylesheet {
    Stylesheet {
        root: block_variables(&ROOT_BLOCK_RE, text),
        dark: block_variables(&DARK_BLOCK_RE, text),
        media_dark: block_variables(&MEDIA_DARK_RE, text),
    }
}

/// Declarations of the first block `re` finds; empty if there is none.
fn block_variables(re: &Regex, text: &str) -> VariableMap {
    re.captures(text)
        .map(|caps| parse_declarations(&caps[1]))
        .unwrap_or_default()
}

/// Collect every `--name: value;` declaration in a block body.
///
/// Values are trimmed. A later declaration of the same name replaces the
/// earlier one, as it would in the browser.
#[must_use]
pub fn parse_declarations(body: &str) -> VariableMap {
    DECLARATION_RE
        .captures_iter(body)
        .map(|caps| (format!("--{}", caps[1].trim()), caps[2].trim().to_string()))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
