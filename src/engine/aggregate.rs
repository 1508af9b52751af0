//! Folds records, references and resolved links into a report.
//!
//! Everything here is a pure function of its inputs and is testable without
//! running extraction or resolution.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::domain::{
    CorpusMetrics, NoteIdentity, NoteMetrics, NoteRecord, Reference, Report, ResolvedLink,
};
use crate::infra::frontmatter::{self, Properties};

/// Tag name counted as an open task.
const TODO_TAG: &str = "todo";

/// Counts resolved links per target identity.
pub fn count_backlinks(links: &[ResolvedLink]) -> HashMap<&NoteIdentity, usize> {
    let mut counts = HashMap::new();
    for target in links.iter().filter_map(ResolvedLink::resolved_target) {
        *counts.entry(target).or_insert(0) += 1;
    }
    counts
}

/// Builds the metrics of one note from its record and references.
///
/// `in_links` comes from the corpus-wide backlink count.
pub fn note_metrics(record: &NoteRecord, references: &[Reference], in_links: usize) -> NoteMetrics {
    let heading_count = references.iter().filter(|r| r.is_heading()).count();
    let out_links = references.iter().filter_map(Reference::as_link).count();
    let tags: BTreeSet<String> = references
        .iter()
        .filter_map(Reference::as_tag)
        .map(str::to_string)
        .collect();
    let todo_count = references
        .iter()
        .filter_map(Reference::as_tag)
        .filter(|name| *name == TODO_TAG)
        .count();

    let properties = frontmatter_properties(record.text());
    let identity = record.identity();
    let name = identity.base_name();

    NoteMetrics {
        identity: identity.clone(),
        word_count: record.word_count(),
        char_count: record.char_count(),
        heading_count,
        out_links,
        in_links,
        tags,
        property_count: properties.count,
        alias_count: properties.aliases,
        todo_count,
        name_word_count: name.split_whitespace().count(),
        name_char_count: name.chars().count(),
        path_depth: identity.depth(),
        path_len: identity.as_str().chars().count(),
    }
}

/// Reads property counts from a note's frontmatter. Notes without a block,
/// or with malformed YAML, have none.
fn frontmatter_properties(text: &str) -> Properties {
    frontmatter::split(text)
        .and_then(|fm| frontmatter::parse_properties(fm.yaml).ok())
        .unwrap_or_default()
}

/// Finds notes with no incoming and no outgoing links.
pub fn find_orphans<'a, I>(notes: I) -> BTreeSet<NoteIdentity>
where
    I: IntoIterator<Item = &'a NoteMetrics>,
{
    notes
        .into_iter()
        .filter(|m| m.is_isolated())
        .map(|m| m.identity.clone())
        .collect()
}

/// Collects the distinct target specs of dangling links.
pub fn find_dangling(links: &[ResolvedLink]) -> BTreeSet<String> {
    links
        .iter()
        .filter(|l| l.is_dangling())
        .map(|l| l.target_spec.clone())
        .collect()
}

/// Counts every tag occurrence, duplicates within a note included.
pub fn count_tag_usage(references: &[Vec<Reference>]) -> BTreeMap<String, usize> {
    let mut usage = BTreeMap::new();
    for name in references.iter().flatten().filter_map(Reference::as_tag) {
        *usage.entry(name.to_string()).or_insert(0) += 1;
    }
    usage
}

/// Counts notes whose base name is shared with another note.
pub fn count_duplicate_base_names(records: &[NoteRecord]) -> usize {
    let mut by_name: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *by_name.entry(record.identity().base_name()).or_insert(0) += 1;
    }
    by_name.values().filter(|n| **n > 1).sum()
}

/// Assembles the full report.
///
/// `references` must be index-aligned with `records`, and `links` must be the
/// resolution of exactly those references.
pub fn aggregate(
    records: &[NoteRecord],
    references: &[Vec<Reference>],
    links: &[ResolvedLink],
) -> Report {
    let backlinks = count_backlinks(links);

    let notes: BTreeMap<NoteIdentity, NoteMetrics> = records
        .iter()
        .zip(references)
        .map(|(record, refs)| {
            let in_links = backlinks.get(record.identity()).copied().unwrap_or(0);
            let metrics = note_metrics(record, refs, in_links);
            (metrics.identity.clone(), metrics)
        })
        .collect();

    let tag_usage = count_tag_usage(references);

    let corpus = CorpusMetrics {
        note_count: records.len(),
        total_word_count: records.iter().map(NoteRecord::word_count).sum(),
        total_link_count: links.len(),
        orphans: find_orphans(notes.values()),
        dangling: find_dangling(links),
        resolved_link_count: links.iter().filter(|l| !l.is_dangling()).count(),
        total_tag_usage: tag_usage.values().sum(),
        tag_usage,
        duplicate_base_names: count_duplicate_base_names(records),
    };

    Report { notes, corpus }
}
