//! References extracted from note text and the links resolved from them.

use std::fmt;

use crate::domain::NoteIdentity;

/// A structural token found in a note's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// A `[[target|alias]]` link; holds the target spec (text before the pipe).
    Link(String),
    /// A `#tag`, name without the leading `#`, case preserved.
    Tag(String),
    /// A markdown ATX heading.
    Heading { level: u8, text: String },
}

impl Reference {
    /// Creates a heading reference.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Reference::Heading {
            level,
            text: text.into(),
        }
    }

    /// Returns the target spec if this is a link.
    pub fn as_link(&self) -> Option<&str> {
        match self {
            Reference::Link(target) => Some(target),
            _ => None,
        }
    }

    /// Returns the tag name if this is a tag.
    pub fn as_tag(&self) -> Option<&str> {
        match self {
            Reference::Tag(name) => Some(name),
            _ => None,
        }
    }

    /// Returns true if this is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Reference::Heading { .. })
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Link(target) => write!(f, "[[{}]]", target),
            Reference::Tag(name) => write!(f, "#{}", name),
            Reference::Heading { level, text } => {
                write!(f, "{} {}", "#".repeat(usize::from(*level)), text)
            }
        }
    }
}

/// Where a link ended up after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// The link points at a note in the corpus.
    Resolved(NoteIdentity),
    /// No note matched the target spec.
    Dangling,
}

/// A link reference paired with its resolution outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    /// The note the link was written in.
    pub source: NoteIdentity,
    /// The raw target spec as extracted.
    pub target_spec: String,
    pub target: LinkTarget,
}

impl ResolvedLink {
    /// Returns the resolved target identity, if any.
    pub fn resolved_target(&self) -> Option<&NoteIdentity> {
        match &self.target {
            LinkTarget::Resolved(identity) => Some(identity),
            LinkTarget::Dangling => None,
        }
    }

    /// Returns true if no note matched.
    pub fn is_dangling(&self) -> bool {
        matches!(self.target, LinkTarget::Dangling)
    }
}
