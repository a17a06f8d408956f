//! Lock document decoding.
//!
//! The restore output is a JSON document: a `targets` section mapping each
//! target framework to its resolved libraries (keyed `"name/version"`), and
//! a flat `logs` array of diagnostic records. This module owns the strict
//! schema for that document; everything downstream works with the typed
//! [`LockDocument`] form. Parsing is an explicit call with no ambient
//! configuration.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{bail, Context, Result};
use semver::Version;
use serde::Deserialize;

use crate::core::{LibraryDescriptor, LibraryKind, LogRecord};
use crate::document::{LockDocument, TargetGraph, TargetLibraryEntry};

/// Document format versions this crate understands.
const SUPPORTED_VERSIONS: &[u32] = &[1, 2, 3];

/// Raw JSON shape of the document. Sections this subsystem does not model
/// (project metadata, dependency groups, checksums) are ignored on read.
#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    version: u32,

    /// target framework -> ("name/version" -> entry)
    #[serde(default)]
    targets: BTreeMap<String, BTreeMap<String, RawTargetLibrary>>,

    #[serde(default)]
    logs: Vec<LogRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTargetLibrary {
    #[serde(rename = "type")]
    kind: Option<String>,

    /// dependency name -> version range (the range is not modeled here)
    #[serde(default)]
    dependencies: BTreeMap<String, String>,

    // Asset manifests: the map keys are the paths; the values carry
    // per-asset properties this subsystem does not interpret.
    #[serde(default)]
    compile: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    runtime: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    build: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    build_multi_targeting: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    framework_assemblies: Vec<String>,
    #[serde(default)]
    documentation: BTreeMap<String, serde_json::Value>,
}

/// Decode the JSON text of a lock document.
pub(crate) fn decode(content: &str, path: &Path) -> Result<LockDocument> {
    let raw: RawDocument = serde_json::from_str(content)
        .with_context(|| format!("failed to parse lock document: {}", path.display()))?;

    if !SUPPORTED_VERSIONS.contains(&raw.version) {
        bail!(
            "lock document version {} is not supported by this version of Berth",
            raw.version
        );
    }

    let mut targets = Vec::with_capacity(raw.targets.len());
    let mut libraries = Vec::new();
    let mut seen_identities: HashSet<String> = HashSet::new();

    for (framework, raw_libraries) in &raw.targets {
        let mut entries = Vec::with_capacity(raw_libraries.len());

        for (identity, raw_library) in raw_libraries {
            let (name, version) = split_identity(identity)
                .with_context(|| format!("malformed library key `{identity}`"))?;
            let raw_kind = raw_library.kind.clone().unwrap_or_default();

            entries.push(TargetLibraryEntry {
                name: name.clone(),
                kind: raw_kind.clone(),
                version: version.clone(),
                dependencies: raw_library.dependencies.keys().cloned().collect(),
            });

            // Global descriptor table: first occurrence of an identity wins.
            if seen_identities.insert(identity.clone()) {
                libraries.push(LibraryDescriptor {
                    name,
                    version,
                    kind: LibraryKind::classify(&raw_kind),
                    compile_assets: raw_library.compile.keys().cloned().collect(),
                    runtime_assets: raw_library.runtime.keys().cloned().collect(),
                    build_files: raw_library.build.keys().cloned().collect(),
                    build_multi_targeting_files: raw_library
                        .build_multi_targeting
                        .keys()
                        .cloned()
                        .collect(),
                    framework_references: raw_library.framework_assemblies.clone(),
                    documentation_files: raw_library.documentation.keys().cloned().collect(),
                });
            }
        }

        targets.push(TargetGraph {
            framework: framework.clone(),
            libraries: entries,
        });
    }

    tracing::debug!(
        "parsed lock document {}: {} target(s), {} librar(ies), {} log record(s)",
        path.display(),
        targets.len(),
        libraries.len(),
        raw.logs.len()
    );

    Ok(LockDocument::new(path, targets, libraries, raw.logs))
}

/// Split a `"name/version"` composite identity.
///
/// Project entries can carry path-like names with embedded slashes and no
/// version, so the version is only split off when the trailing segment
/// actually parses as one.
fn split_identity(identity: &str) -> Result<(String, Option<Version>)> {
    if identity.is_empty() {
        bail!("empty library identity");
    }

    if let Some((name, version)) = identity.rsplit_once('/') {
        if !name.is_empty() {
            if let Ok(version) = version.parse::<Version>() {
                return Ok((name.to_string(), Some(version)));
            }
        }
    }

    Ok((identity.to_string(), None))
}
