//! Note sources handed in by the host and the immutable records built from them.

use std::collections::HashSet;

use log::debug;

use crate::domain::{MetricsError, MetricsResult, NoteIdentity};

/// A raw note as supplied by the host: its full text and its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSource {
    pub text: String,
    pub identity: String,
}

impl NoteSource {
    /// Creates a new note source.
    pub fn new(text: impl Into<String>, identity: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            identity: identity.into(),
        }
    }
}

/// A note after identity normalization, with its lexical counts computed.
///
/// Records are immutable once built; the extractor and aggregator only ever
/// borrow them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRecord {
    identity: NoteIdentity,
    text: String,
    word_count: usize,
    char_count: usize,
}

impl NoteRecord {
    /// Builds a record for an already-normalized identity.
    pub fn new(identity: NoteIdentity, text: impl Into<String>) -> Self {
        let text = text.into();
        let word_count = count_words(&text);
        let char_count = count_chars(&text);
        Self {
            identity,
            text,
            word_count,
            char_count,
        }
    }

    /// Returns the note's identity.
    pub fn identity(&self) -> &NoteIdentity {
        &self.identity
    }

    /// Returns the raw note text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the number of whitespace-delimited words.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Returns the number of unicode scalar values.
    pub fn char_count(&self) -> usize {
        self.char_count
    }
}

/// Counts maximal runs of non-whitespace characters.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Counts unicode scalar values, not bytes.
pub fn count_chars(text: &str) -> usize {
    text.chars().count()
}

/// Normalizes every source against `root` and builds one record per source.
///
/// Input order is preserved.
///
/// # Errors
///
/// Returns `MetricsError::InvalidIdentity` if a path is empty after
/// normalization, and `MetricsError::DuplicateIdentity` if two sources
/// normalize to the same identity.
pub fn build_records<I>(sources: I, root: &str) -> MetricsResult<Vec<NoteRecord>>
where
    I: IntoIterator<Item = NoteSource>,
{
    let mut seen: HashSet<NoteIdentity> = HashSet::new();
    let mut records = Vec::new();

    for source in sources {
        let identity = NoteIdentity::normalize(&source.identity, root).ok_or_else(|| {
            MetricsError::InvalidIdentity {
                path: source.identity.clone(),
            }
        })?;

        if !seen.insert(identity.clone()) {
            return Err(MetricsError::DuplicateIdentity { identity });
        }

        records.push(NoteRecord::new(identity, source.text));
    }

    debug!("built {} note records", records.len());
    Ok(records)
}
