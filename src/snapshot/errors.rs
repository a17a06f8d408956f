//! Snapshot build error types.
//!
//! Only self-inconsistencies in the upstream document are errors. Dangling
//! dependency edges and diagnostics naming libraries outside the resolved
//! set are recovered locally by synthesizing Unknown placeholders, and
//! diagnostics with no library id are retained for document-level reporting.

use thiserror::Error;

/// Error while building a dependency snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// Two raw entries in one target's library list share a name (possibly
    /// differing only by case). The same logical library must not appear
    /// twice within one target, so the document is self-inconsistent.
    #[error(
        "target `{target}`: library name `{incoming}` collides with existing entry `{existing}`"
    )]
    CaseCollision {
        target: String,
        existing: String,
        incoming: String,
    },

    /// The dependency graph contained a cycle. The upstream resolver
    /// guarantees a DAG, so this is a contract violation; it is surfaced
    /// rather than truncated because truncation would yield an incorrect
    /// severity picture.
    #[error("target `{target}`: dependency cycle detected: {}", .path.join(" -> "))]
    CycleDetected { target: String, path: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_message_names_both_spellings() {
        let err = SnapshotError::CaseCollision {
            target: "net8.0".to_string(),
            existing: "packageA".to_string(),
            incoming: "PackageA".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("packageA"));
        assert!(message.contains("PackageA"));
        assert!(message.contains("net8.0"));
    }

    #[test]
    fn test_cycle_message_shows_path() {
        let err = SnapshotError::CycleDetected {
            target: "net8.0".to_string(),
            path: vec!["A".to_string(), "B".to_string(), "A".to_string()],
        };
        assert!(err.to_string().contains("A -> B -> A"));
    }
}
