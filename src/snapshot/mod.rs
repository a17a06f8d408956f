//! Dependency snapshots built from a lock document.
//!
//! A snapshot is built once from a parsed document and never mutated; when
//! the source document changes, the caller builds a whole new snapshot and
//! swaps it in. Holders of an old snapshot keep observing it unaffected.

mod builder;
pub mod errors;
mod propagate;

use std::collections::HashMap;

use rayon::prelude::*;

use crate::core::{LogRecord, TargetLibrary};
use crate::document::LockDocument;
use crate::util::CaselessName;

pub use errors::SnapshotError;

/// One target framework's library table with propagated severities.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetSnapshot {
    framework: String,
    libraries: HashMap<CaselessName, TargetLibrary>,
}

impl TargetSnapshot {
    pub(crate) fn new(framework: String, libraries: HashMap<CaselessName, TargetLibrary>) -> Self {
        TargetSnapshot {
            framework,
            libraries,
        }
    }

    /// Target framework key this snapshot was built for.
    pub fn framework(&self) -> &str {
        &self.framework
    }

    /// Look up a library by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&TargetLibrary> {
        self.libraries.get(&CaselessName::new(name))
    }

    /// Whether a library with this name (any casing) is present.
    pub fn contains(&self, name: &str) -> bool {
        self.libraries.contains_key(&CaselessName::new(name))
    }

    /// Number of libraries in the table, placeholders included.
    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }

    /// Iterate over all libraries in the table.
    pub fn libraries(&self) -> impl Iterator<Item = &TargetLibrary> {
        self.libraries.values()
    }
}

/// Immutable aggregate of every target framework's snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencySnapshot {
    data_by_target: HashMap<String, TargetSnapshot>,
    logs: Vec<LogRecord>,
}

impl DependencySnapshot {
    /// Build a snapshot from a parsed lock document.
    ///
    /// Targets are independent, so they are built in parallel and merged
    /// without cross-target locking. A structural violation in any target
    /// fails the whole build; partial snapshots are never produced.
    pub fn from_document(document: &LockDocument) -> Result<Self, SnapshotError> {
        let targets: Vec<TargetSnapshot> = document
            .targets()
            .par_iter()
            .map(|target| builder::build_target(document, target))
            .collect::<Result<_, _>>()?;

        tracing::debug!(
            "built dependency snapshot: {} target(s) from {}",
            targets.len(),
            document.path().display()
        );

        let data_by_target = targets
            .into_iter()
            .map(|target| (target.framework.clone(), target))
            .collect();

        Ok(DependencySnapshot {
            data_by_target,
            logs: document.logs().to_vec(),
        })
    }

    /// Per-target snapshots keyed by target framework.
    pub fn data_by_target(&self) -> &HashMap<String, TargetSnapshot> {
        &self.data_by_target
    }

    /// Look up one target framework's snapshot.
    pub fn target(&self, framework: &str) -> Option<&TargetSnapshot> {
        self.data_by_target.get(framework)
    }

    /// Every restore log record, in emission order.
    pub fn logs(&self) -> &[LogRecord] {
        &self.logs
    }

    /// Records carrying no library id. These are document-level diagnostics:
    /// they never contribute to any library's effective level but remain
    /// available for top-level reporting.
    pub fn document_diagnostics(&self) -> impl Iterator<Item = &LogRecord> {
        self.logs.iter().filter(|record| record.library_id.is_none())
    }
}
