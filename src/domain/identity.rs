//! Path-based note identity, normalized relative to the vault root.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// The extension markdown notes carry inside a vault.
pub const NOTE_EXTENSION: &str = ".md";

/// A corpus-relative, forward-slash separated path naming one note.
///
/// Identities are the join key of the whole pipeline: link targets, backlink
/// counts and report entries are all keyed by them. Ordering is plain byte
/// order of the path string, which is what the report uses for its keys.
///
/// # Examples
///
/// ```
/// use vault_metrics::domain::NoteIdentity;
///
/// let id = NoteIdentity::normalize("/vault/projects\\alpha.md", "/vault").unwrap();
/// assert_eq!(id.as_str(), "projects/alpha.md");
/// assert_eq!(id.base_name(), "alpha");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteIdentity(String);

impl NoteIdentity {
    /// Normalizes a host-supplied path into an identity.
    ///
    /// Backslashes become forward slashes and the corpus root is stripped when
    /// the path lies under it. Empty and `.` segments are dropped wherever they
    /// appear, so `./a//b.md` and `a/b.md` name the same note. Returns `None`
    /// when nothing is left.
    pub fn normalize(path: &str, root: &str) -> Option<Self> {
        let path = path.replace('\\', "/");
        let root = root.replace('\\', "/");
        let root = root.trim_end_matches('/');

        let mut relative = path.as_str();
        if !root.is_empty() {
            if let Some(rest) = relative.strip_prefix(root) {
                // Only strip at a component boundary: "/vault" must not eat "/vaults/x.md".
                if rest.is_empty() || rest.starts_with('/') {
                    relative = rest;
                }
            }
        }

        let segments: Vec<&str> = relative
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .collect();

        if segments.is_empty() {
            None
        } else {
            Some(Self(segments.join("/")))
        }
    }

    /// Returns the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the identity with a trailing `.md` removed, if present.
    pub fn without_extension(&self) -> &str {
        self.0.strip_suffix(NOTE_EXTENSION).unwrap_or(&self.0)
    }

    /// Returns the number of path components, file name included.
    pub fn depth(&self) -> usize {
        self.0.split('/').count()
    }

    /// Returns the final path component with any extension removed.
    pub fn base_name(&self) -> &str {
        let file_name = self.0.rsplit('/').next().unwrap_or(&self.0);
        match file_name.rfind('.') {
            Some(dot) if dot > 0 => &file_name[..dot],
            _ => file_name,
        }
    }

    /// Returns every component-boundary suffix of the path, longest first,
    /// excluding the full path itself.
    ///
    /// `a/b/c.md` yields `b/c.md` then `c.md`.
    pub fn path_suffixes(&self) -> impl Iterator<Item = &str> {
        self.0
            .match_indices('/')
            .map(move |(slash, _)| &self.0[slash + 1..])
            .filter(|suffix| !suffix.is_empty())
    }
}

impl fmt::Display for NoteIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for NoteIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteIdentity(\"{}\")", self.0)
    }
}

impl AsRef<str> for NoteIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Ord and Hash are derived from the inner String, so map lookups by &str agree.
impl Borrow<str> for NoteIdentity {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Serialize for NoteIdentity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NoteIdentity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NoteIdentity::normalize(&s, "")
            .ok_or_else(|| serde::de::Error::custom("note identity cannot be empty"))
    }
}
