// SPDX-License-Identifier: MIT

//! # tc-theme — stylesheet theme extraction and contrast audits
//!
//! Reads the color variables a site theme declares, layers each dark
//! variant over the root variables, and checks foreground/background pairs
//! against WCAG contrast thresholds.
//!
//! # Architecture
//!
//! ```text
//! theme.css
//!     │
//!     ▼
//! stylesheet.rs: :root / [data-theme="dark"] / media-dark → VariableMap ×3
//!     │
//!     ▼
//! scope.rs:      ThemeScope = local map over the root map (CSS cascading)
//!     │
//!     ▼
//! audit.rs:      fixed pairs, full palette, semantic sweep (tc-color math)
//!     │
//!     ▼
//! report.rs:     console summaries + palette CSV
//! ```
//!
//! `config.rs` carries every knob (paths, pairs, background targets,
//! foreground name patterns) into the auditor; nothing is global.

pub mod audit;
pub mod config;
pub mod error;
pub mod patterns;
pub mod report;
pub mod scope;
pub mod stylesheet;

pub use audit::{AuditResult, Auditor, PaletteReport, SemanticReport};
pub use config::{AuditConfig, AuditPair};
pub use error::{AuditError, Result};
pub use patterns::NamePatterns;
pub use scope::{ThemeKind, ThemeScope, VariableMap};
pub use stylesheet::Stylesheet;
