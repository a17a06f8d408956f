//! Case-insensitive library names.
//!
//! Restore output compares library names without regard to case, while the
//! casing written in the document is preserved for display. CaselessName is
//! the single owner of that comparison rule; every table in the snapshot
//! pipeline keys on it rather than lowercasing at each call site.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A library name that compares and hashes case-insensitively.
///
/// The original casing is retained and returned by [`CaselessName::as_str`].
/// Two names that differ only by case are equal and land in the same map
/// slot; the first inserted spelling wins as the stored key.
#[derive(Clone)]
pub struct CaselessName(String);

impl CaselessName {
    /// Create a caseless name, keeping the given casing for display.
    pub fn new(name: impl Into<String>) -> Self {
        CaselessName(name.into())
    }

    /// Get the name as written in the source document.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper, returning the original spelling.
    pub fn into_string(self) -> String {
        self.0
    }

    fn lowered(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars().flat_map(char::to_lowercase)
    }
}

impl PartialEq for CaselessName {
    fn eq(&self, other: &Self) -> bool {
        self.lowered().eq(other.lowered())
    }
}

impl Eq for CaselessName {}

impl PartialOrd for CaselessName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CaselessName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.lowered().cmp(other.lowered())
    }
}

impl Hash for CaselessName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for c in self.lowered() {
            state.write_u32(c as u32);
        }
        // Terminator, as str's own hashing does, so prefixes stay distinct
        // when a name is hashed as part of a larger key.
        state.write_u8(0xff);
    }
}

impl fmt::Debug for CaselessName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for CaselessName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<&str> for CaselessName {
    fn from(s: &str) -> Self {
        CaselessName::new(s)
    }
}

impl From<String> for CaselessName {
    fn from(s: String) -> Self {
        CaselessName(s)
    }
}

impl AsRef<str> for CaselessName {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}
