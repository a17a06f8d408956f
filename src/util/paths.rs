//! Library id path normalization.
//!
//! Diagnostics about project references carry the project's absolute path,
//! while dependency edges refer to the same project by a path relative to
//! the lock file's directory. Normalizing the diagnostic id into that
//! relative form makes the two representations compare equal.

use std::path::Path;

/// Normalize a raw diagnostic library id into the identity space used by
/// dependency edges.
///
/// Simple names (no path separators) pass through unchanged. An absolute
/// path is rewritten relative to `lock_dir`, the directory containing the
/// lock file, keeping the filename as the terminal segment. Relative
/// path-like ids are already in the edge identity space and pass through.
pub fn normalize_library_id(id: &str, lock_dir: &Path) -> String {
    if !id.contains('/') && !id.contains('\\') {
        return id.to_string();
    }

    let path = Path::new(id);
    if !path.is_absolute() {
        return id.to_string();
    }

    pathdiff::diff_paths(path, lock_dir)
        .map(|rel| rel.to_string_lossy().into_owned())
        .unwrap_or_else(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_name_passes_through() {
        let dir = Path::new("/repo/obj");
        assert_eq!(normalize_library_id("System.Net.Http", dir), "System.Net.Http");
    }

    #[test]
    fn test_absolute_path_rewritten_relative_to_lock_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        let lock_dir = tmp.path().join("obj");
        let project = tmp.path().join("OtherProject").join("OtherProject.csproj");

        let normalized = normalize_library_id(&project.to_string_lossy(), &lock_dir);

        let expected = Path::new("..")
            .join("OtherProject")
            .join("OtherProject.csproj");
        assert_eq!(normalized, expected.to_string_lossy());
    }

    #[test]
    fn test_relative_path_passes_through() {
        let dir = Path::new("/repo/obj");
        let id = "../OtherProject/OtherProject.csproj";
        assert_eq!(normalize_library_id(id, dir), id);
    }

    #[test]
    fn test_filename_is_terminal_segment() {
        let tmp = tempfile::TempDir::new().unwrap();
        let lock_dir = tmp.path().join("obj");
        let project = tmp.path().join("Sibling").join("Sibling.csproj");

        let normalized = normalize_library_id(&project.to_string_lossy(), &lock_dir);
        assert!(normalized.ends_with("Sibling.csproj"));
    }
}
