//! Per-note and corpus-wide metrics, and the report that carries them.
//!
//! Field names and ordering of the serialized form are the wire contract
//! consumed by the host, so every collection here is a `BTreeMap` or
//! `BTreeSet` and extra aggregates are kept out of serialization.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::domain::NoteIdentity;

/// Metrics for a single note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteMetrics {
    #[serde(skip)]
    pub identity: NoteIdentity,
    pub word_count: usize,
    pub char_count: usize,
    pub heading_count: usize,
    pub out_links: usize,
    pub in_links: usize,
    /// Unique tag names, sorted.
    pub tags: BTreeSet<String>,

    /// Top-level frontmatter properties.
    #[serde(skip)]
    pub property_count: usize,
    /// Entries under the frontmatter alias keys.
    #[serde(skip)]
    pub alias_count: usize,
    /// `todo` tag occurrences, inline and in frontmatter.
    #[serde(skip)]
    pub todo_count: usize,
    #[serde(skip)]
    pub name_word_count: usize,
    #[serde(skip)]
    pub name_char_count: usize,
    /// Path components of the identity, file name included.
    #[serde(skip)]
    pub path_depth: usize,
    #[serde(skip)]
    pub path_len: usize,
}

impl NoteMetrics {
    /// Returns true if the note has neither incoming nor outgoing links.
    pub fn is_isolated(&self) -> bool {
        self.in_links == 0 && self.out_links == 0
    }
}

/// Aggregates over the whole corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusMetrics {
    pub note_count: usize,
    pub total_word_count: usize,
    /// Every link reference, resolved or dangling.
    pub total_link_count: usize,
    /// Notes with zero incoming and zero outgoing links.
    pub orphans: BTreeSet<NoteIdentity>,
    /// Distinct target specs that matched no note.
    pub dangling: BTreeSet<String>,

    /// Links that matched a note.
    #[serde(skip)]
    pub resolved_link_count: usize,
    /// Tag occurrences across the corpus, duplicates within a note included.
    #[serde(skip)]
    pub total_tag_usage: usize,
    /// Occurrences per tag name.
    #[serde(skip)]
    pub tag_usage: BTreeMap<String, usize>,
    /// Notes whose base name is shared with at least one other note.
    #[serde(skip)]
    pub duplicate_base_names: usize,
}

impl CorpusMetrics {
    /// Returns the number of links that matched no note.
    pub fn dangling_link_count(&self) -> usize {
        self.total_link_count - self.resolved_link_count
    }
}

/// The full metrics report for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub notes: BTreeMap<NoteIdentity, NoteMetrics>,
    pub corpus: CorpusMetrics,
}

impl Report {
    /// Returns metrics for one note.
    pub fn note(&self, identity: &str) -> Option<&NoteMetrics> {
        self.notes.get(identity)
    }

    /// Returns up to `limit` notes with the most backlinks.
    ///
    /// Notes without backlinks are left out. Ties are broken by identity so
    /// the ranking is stable across runs.
    pub fn most_linked(&self, limit: usize) -> Vec<&NoteMetrics> {
        let mut ranked: Vec<&NoteMetrics> =
            self.notes.values().filter(|m| m.in_links > 0).collect();
        ranked.sort_by(|a, b| {
            b.in_links
                .cmp(&a.in_links)
                .then_with(|| a.identity.cmp(&b.identity))
        });
        ranked.truncate(limit);
        ranked
    }
}
