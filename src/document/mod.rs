//! The parsed lock document.
//!
//! `LockDocument` is the read-only input to snapshot building. It holds the
//! structure of the restore output faithfully and performs no business
//! logic: per-target library lists stay in source order (duplicates and
//! all, for the builder to reject), the global descriptor table keeps its
//! `"name/version"` composite identities, and the log record list keeps the
//! order the resolver emitted.

pub mod format;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use semver::Version;

use crate::core::{LibraryDescriptor, LogRecord};
use crate::util::CaselessName;

/// A parsed restore output document.
///
/// Immutable once constructed. A change to the source document is handled
/// by parsing a whole new `LockDocument`, never by editing this one.
#[derive(Debug, Clone)]
pub struct LockDocument {
    /// Path of the lock file itself. Its directory anchors the
    /// absolute-to-relative normalization of diagnostic library ids.
    path: PathBuf,

    /// Per-target dependency graphs, in document order.
    targets: Vec<TargetGraph>,

    /// Global library descriptors, one per resolved library.
    libraries: Vec<LibraryDescriptor>,

    /// Descriptor index keyed by caseless `"name/version"` identity.
    by_identity: HashMap<CaselessName, usize>,

    /// Restore log records, in emission order.
    logs: Vec<LogRecord>,
}

/// One target framework's raw resolved library list.
#[derive(Debug, Clone)]
pub struct TargetGraph {
    /// Target framework key, e.g. "net8.0".
    pub framework: String,

    /// Raw per-target entries, in document order.
    pub libraries: Vec<TargetLibraryEntry>,
}

/// A raw per-target library entry as written in the document.
#[derive(Debug, Clone)]
pub struct TargetLibraryEntry {
    /// Library name.
    pub name: String,

    /// Raw type string. Classified by the snapshot builder, not here.
    pub kind: String,

    /// Resolved version, if one was written.
    pub version: Option<Version>,

    /// Names of libraries this entry depends on, for this target.
    pub dependencies: Vec<String>,
}

impl LockDocument {
    /// Assemble a document from pre-parsed parts.
    ///
    /// This is the seam for external parsers: anything that can produce the
    /// target graphs, descriptor table, and log list can feed the snapshot
    /// pipeline without going through the JSON decoder.
    pub fn new(
        path: impl Into<PathBuf>,
        targets: Vec<TargetGraph>,
        libraries: Vec<LibraryDescriptor>,
        logs: Vec<LogRecord>,
    ) -> Self {
        let by_identity = libraries
            .iter()
            .enumerate()
            .map(|(index, descriptor)| (CaselessName::new(descriptor.identity()), index))
            .collect();

        LockDocument {
            path: path.into(),
            targets,
            libraries,
            by_identity,
            logs,
        }
    }

    /// Parse a document from its JSON text.
    ///
    /// `path` is where the lock file lives (or would live); it is recorded
    /// for path normalization even when the content comes from memory.
    pub fn parse(content: &str, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        format::decode(content, &path)
    }

    /// Load and parse a document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read lock document: {}", path.display()))?;
        Self::parse(&content, path)
    }

    /// Path of the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the lock file.
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Per-target dependency graphs, in document order.
    pub fn targets(&self) -> &[TargetGraph] {
        &self.targets
    }

    /// Global library descriptors.
    pub fn libraries(&self) -> &[LibraryDescriptor] {
        &self.libraries
    }

    /// Restore log records, in emission order.
    pub fn logs(&self) -> &[LogRecord] {
        &self.logs
    }

    /// Look up the global descriptor for a `(name, version)` pair. Name
    /// comparison is case-insensitive, matching the rest of the pipeline.
    pub fn descriptor(&self, name: &str, version: Option<&Version>) -> Option<&LibraryDescriptor> {
        let identity = match version {
            Some(version) => format!("{name}/{version}"),
            None => name.to_string(),
        };
        self.by_identity
            .get(&CaselessName::new(identity))
            .map(|&index| &self.libraries[index])
    }
}
