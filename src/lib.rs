//! Berth - a dependency-graph snapshot model for package restore outputs.
//!
//! A restore (the package manager's resolution step) leaves behind a lock
//! document describing, per target framework, every resolved library and
//! its dependency edges, plus the diagnostics emitted along the way. This
//! crate parses that document and builds, per target, a case-insensitive
//! library table in which diagnostic severities have been propagated along
//! dependency edges, so client tooling (dependency-tree views, diagnostics
//! panels) can ask "what does this library depend on, and how bad is the
//! worst thing underneath it?".
//!
//! The whole pipeline is pure data transformation: no I/O beyond the
//! optional document loader, no shared mutable state, and the resulting
//! [`DependencySnapshot`] is immutable. A changed document yields a freshly
//! built snapshot.

pub mod core;
pub mod document;
pub mod snapshot;
pub mod util;

pub use crate::core::{LibraryDescriptor, LibraryKind, LogLevel, LogRecord, TargetLibrary};
pub use document::LockDocument;
pub use snapshot::{DependencySnapshot, SnapshotError, TargetSnapshot};
pub use util::CaselessName;
