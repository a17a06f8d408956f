//! Library descriptors and per-target library entries.

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::core::log::LogLevel;

/// Classification of a resolved library.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LibraryKind {
    /// A package pulled from a feed.
    Package,
    /// A project reference within the same solution/workspace.
    Project,
    /// Anything else, including placeholders synthesized for names that are
    /// referenced but absent from the resolved set.
    #[default]
    Unknown,
}

impl LibraryKind {
    /// Classify a raw type string from the document, case-insensitively.
    /// Unrecognized strings map to `Unknown`.
    pub fn classify(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("package") {
            LibraryKind::Package
        } else if raw.eq_ignore_ascii_case("project") {
            LibraryKind::Project
        } else {
            LibraryKind::Unknown
        }
    }
}

/// Global descriptor for one resolved library, shared across targets.
///
/// Owned by the document model and immutable after parse. The asset
/// manifests are opaque path lists; the core carries them through without
/// interpreting them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryDescriptor {
    /// Library name as written in the source document. Never empty.
    pub name: String,

    /// Resolved version. Absent for some synthetic and project entries.
    pub version: Option<Version>,

    /// Library classification.
    pub kind: LibraryKind,

    /// Compile-time asset paths.
    pub compile_assets: Vec<String>,

    /// Runtime asset paths.
    pub runtime_assets: Vec<String>,

    /// Build script paths.
    pub build_files: Vec<String>,

    /// Multi-targeting build script paths.
    pub build_multi_targeting_files: Vec<String>,

    /// Framework-reference names.
    pub framework_references: Vec<String>,

    /// Documentation file paths.
    pub documentation_files: Vec<String>,
}

impl LibraryDescriptor {
    /// Composite `"name/version"` identity as written in the source.
    pub fn identity(&self) -> String {
        match &self.version {
            Some(version) => format!("{}/{}", self.name, version),
            None => self.name.clone(),
        }
    }
}

/// One library in a target framework's snapshot table.
///
/// Identity is `(target framework, name)` with case-insensitive name
/// comparison; the table preserves the first-seen casing. Dependencies are
/// target-specific because conditional compilation can vary them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLibrary {
    /// Library name, in the casing supplied by the resolved library list
    /// (or by the diagnostic that caused this entry to be synthesized).
    pub name: String,

    /// Resolved version, if any.
    pub version: Option<Version>,

    /// Library classification.
    pub kind: LibraryKind,

    /// Names of libraries this one depends on, for this target only.
    pub dependencies: Vec<String>,

    /// Compile-time asset paths, copied from the matching descriptor.
    pub compile_assets: Vec<String>,

    /// Runtime asset paths.
    pub runtime_assets: Vec<String>,

    /// Build script paths.
    pub build_files: Vec<String>,

    /// Multi-targeting build script paths.
    pub build_multi_targeting_files: Vec<String>,

    /// Framework-reference names.
    pub framework_references: Vec<String>,

    /// Documentation file paths.
    pub documentation_files: Vec<String>,

    /// Maximum severity of this library's own diagnostics and everything it
    /// transitively depends on. `None` when nothing in its subgraph carries
    /// a diagnostic. Computed once by propagation; never mutated afterwards.
    pub effective_level: Option<LogLevel>,
}

impl TargetLibrary {
    /// Synthesize a placeholder for a name referenced by a diagnostic or a
    /// dependency edge but absent from the resolved library set.
    pub fn unknown(name: impl Into<String>) -> Self {
        TargetLibrary {
            name: name.into(),
            version: None,
            kind: LibraryKind::Unknown,
            dependencies: Vec::new(),
            compile_assets: Vec::new(),
            runtime_assets: Vec::new(),
            build_files: Vec::new(),
            build_multi_targeting_files: Vec::new(),
            framework_references: Vec::new(),
            documentation_files: Vec::new(),
            effective_level: None,
        }
    }
}
