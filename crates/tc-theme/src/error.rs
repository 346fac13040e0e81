// SPDX-License-Identifier: MIT

//! Errors that stop an audit run.
//!
//! Only I/O and configuration problems live here. A missing variable or an
//! unparseable color is an expected part of auditing real stylesheets and is
//! reported as a [`Skip`](crate::audit::Skip), not an error.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("cannot read stylesheet {}", .path.display())]
    ReadStylesheet {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write report {}", .path.display())]
    WriteReport {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read config file {}", .path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid foreground name pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, AuditError>;
