//! Per-target library table construction and diagnostic attribution.
//!
//! One pass per target framework: fold the raw resolved list into a
//! case-insensitive table, attribute log records to their libraries,
//! synthesize Unknown placeholders for names the resolved set does not
//! contain, then hand the completed node set to severity propagation.

use std::collections::HashMap;

use crate::core::{LibraryKind, LogLevel, TargetLibrary};
use crate::document::{LockDocument, TargetGraph};
use crate::snapshot::errors::SnapshotError;
use crate::snapshot::propagate;
use crate::snapshot::TargetSnapshot;
use crate::util::{paths, CaselessName};

/// Build one target framework's snapshot.
pub(crate) fn build_target(
    document: &LockDocument,
    target: &TargetGraph,
) -> Result<TargetSnapshot, SnapshotError> {
    let mut libraries: HashMap<CaselessName, TargetLibrary> =
        HashMap::with_capacity(target.libraries.len());

    for entry in &target.libraries {
        let key = CaselessName::new(entry.name.as_str());
        if let Some(existing) = libraries.get(&key) {
            return Err(SnapshotError::CaseCollision {
                target: target.framework.clone(),
                existing: existing.name.clone(),
                incoming: entry.name.clone(),
            });
        }

        let mut library = TargetLibrary {
            name: entry.name.clone(),
            version: entry.version.clone(),
            kind: LibraryKind::classify(&entry.kind),
            dependencies: entry.dependencies.clone(),
            compile_assets: Vec::new(),
            runtime_assets: Vec::new(),
            build_files: Vec::new(),
            build_multi_targeting_files: Vec::new(),
            framework_references: Vec::new(),
            documentation_files: Vec::new(),
            effective_level: None,
        };

        if let Some(descriptor) = document.descriptor(&entry.name, entry.version.as_ref()) {
            library.compile_assets = descriptor.compile_assets.clone();
            library.runtime_assets = descriptor.runtime_assets.clone();
            library.build_files = descriptor.build_files.clone();
            library.build_multi_targeting_files = descriptor.build_multi_targeting_files.clone();
            library.framework_references = descriptor.framework_references.clone();
            library.documentation_files = descriptor.documentation_files.clone();
        }

        libraries.insert(key, library);
    }

    // Attribute log records: normalize each library id into the edge
    // identity space, take the per-library maximum level, and synthesize a
    // placeholder for any id outside the resolved set. Records with no
    // library id are document-level and do not participate.
    let mut own: HashMap<CaselessName, LogLevel> = HashMap::new();
    let lock_dir = document.directory();
    for record in document.logs() {
        if !record.applies_to(&target.framework) {
            continue;
        }
        let Some(library_id) = &record.library_id else {
            continue;
        };

        let name = paths::normalize_library_id(library_id, lock_dir);
        let key = CaselessName::new(name.as_str());

        libraries
            .entry(key.clone())
            .or_insert_with(|| TargetLibrary::unknown(name));
        own.entry(key)
            .and_modify(|level| *level = (*level).max(record.level))
            .or_insert(record.level);
    }

    // Placeholders for dangling dependency edges, so propagation runs over
    // a complete node set. Dangling edges are an upstream inconsistency but
    // not fatal here.
    let dangling: Vec<String> = libraries
        .values()
        .flat_map(|library| library.dependencies.iter())
        .filter(|dependency| !libraries.contains_key(&CaselessName::new(dependency.as_str())))
        .cloned()
        .collect();
    for name in dangling {
        let key = CaselessName::new(name.as_str());
        libraries
            .entry(key)
            .or_insert_with(|| TargetLibrary::unknown(name));
    }

    propagate::propagate_levels(&target.framework, &mut libraries, &own)?;

    tracing::debug!(
        "built target `{}`: {} librar(ies)",
        target.framework,
        libraries.len()
    );

    Ok(TargetSnapshot::new(target.framework.clone(), libraries))
}
