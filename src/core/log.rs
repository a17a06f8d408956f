//! Diagnostic log records emitted during restore.
//!
//! The core never computes diagnostics; it attributes and propagates records
//! the resolver already emitted.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a restore diagnostic.
///
/// Variants are ordered least to most severe, so taking the maximum of two
/// levels picks the worse one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    Information,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Information => write!(f, "information"),
            LogLevel::Warning => write!(f, "warning"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// One diagnostic record from the restore log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Diagnostic identifier, e.g. "NU1903".
    pub code: String,

    /// Severity of the record.
    pub level: LogLevel,

    /// Human-readable message.
    pub message: String,

    /// Raw name of the library the record concerns. May be an absolute
    /// project path for project references. Absent for document-level
    /// diagnostics, which attach to no library.
    #[serde(
        rename = "libraryId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub library_id: Option<String>,

    /// Target framework keys this record applies to. Absent means the
    /// record applies to every target.
    #[serde(
        rename = "targetGraphs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub target_graphs: Option<Vec<String>>,
}

impl LogRecord {
    /// Whether this record participates when building the given target
    /// framework's snapshot.
    pub fn applies_to(&self, framework: &str) -> bool {
        match &self.target_graphs {
            Some(graphs) => graphs.iter().any(|g| g == framework),
            None => true,
        }
    }
}
