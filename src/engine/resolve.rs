//! Link resolution: maps wiki-link target specs to note identities.

use std::collections::HashMap;

use log::{debug, trace};

use crate::domain::{LinkTarget, NoteIdentity, NoteRecord, Reference, ResolvedLink};

/// The identities registered under one lookup key.
///
/// Only the lexicographically smallest is kept; ambiguity resolves to it.
#[derive(Debug, Clone, Copy)]
struct Candidates<'a> {
    best: &'a NoteIdentity,
    count: usize,
}

impl<'a> Candidates<'a> {
    fn add(slot: &mut HashMap<&'a str, Candidates<'a>>, key: &'a str, identity: &'a NoteIdentity) {
        slot.entry(key)
            .and_modify(|c| {
                c.count += 1;
                if identity < c.best {
                    c.best = identity;
                }
            })
            .or_insert(Candidates {
                best: identity,
                count: 1,
            });
    }
}

/// Resolves link target specs against the identities of a corpus.
///
/// Three lookup tiers are tried in order, case-sensitively:
///
/// 1. exact path, with or without the `.md` extension
/// 2. path suffix at a `/` boundary, with or without the extension
/// 3. base name (final component, any extension removed)
///
/// Within a tier, several matches resolve to the smallest identity.
pub struct LinkResolver<'a> {
    exact: HashMap<&'a str, Candidates<'a>>,
    suffixes: HashMap<&'a str, Candidates<'a>>,
    base_names: HashMap<&'a str, Candidates<'a>>,
}

impl<'a> LinkResolver<'a> {
    /// Builds the lookup tables from every record in the corpus.
    pub fn from_records(records: &'a [NoteRecord]) -> Self {
        let mut exact = HashMap::new();
        let mut suffixes = HashMap::new();
        let mut base_names = HashMap::new();

        for record in records {
            let identity = record.identity();

            Candidates::add(&mut exact, identity.as_str(), identity);
            if identity.without_extension() != identity.as_str() {
                Candidates::add(&mut exact, identity.without_extension(), identity);
            }

            for suffix in identity.path_suffixes() {
                Candidates::add(&mut suffixes, suffix, identity);
                if let Some(stem) = suffix.strip_suffix(crate::domain::NOTE_EXTENSION) {
                    if !stem.is_empty() {
                        Candidates::add(&mut suffixes, stem, identity);
                    }
                }
            }

            Candidates::add(&mut base_names, identity.base_name(), identity);
        }

        Self {
            exact,
            suffixes,
            base_names,
        }
    }

    /// Looks up the note a target spec refers to.
    ///
    /// The spec's anchor (from the first `#` or `^`) is ignored. A spec that
    /// is only an anchor refers to `source` itself.
    pub fn lookup(&self, target_spec: &str, source: &'a NoteIdentity) -> Option<&'a NoteIdentity> {
        let name = note_name(target_spec);
        if name.is_empty() {
            return Some(source);
        }

        let (tier, found) = [
            ("exact", &self.exact),
            ("suffix", &self.suffixes),
            ("base name", &self.base_names),
        ]
        .into_iter()
        .find_map(|(tier, table)| table.get(name).map(|c| (tier, *c)))?;

        if found.count > 1 {
            debug!(
                "[[{}]] matches {} notes by {}; using {}",
                target_spec, found.count, tier, found.best
            );
        } else {
            trace!("[[{}]] resolved by {} to {}", target_spec, tier, found.best);
        }

        Some(found.best)
    }

    /// Resolves one link written in `source`.
    pub fn resolve(&self, target_spec: &str, source: &'a NoteIdentity) -> ResolvedLink {
        let target = match self.lookup(target_spec, source) {
            Some(identity) => LinkTarget::Resolved(identity.clone()),
            None => LinkTarget::Dangling,
        };

        ResolvedLink {
            source: source.clone(),
            target_spec: target_spec.to_string(),
            target,
        }
    }
}

/// Resolves every link reference in the corpus.
///
/// `references` must be index-aligned with `records`. Links come out in
/// record order, then in text order within a record.
pub fn resolve_all(records: &[NoteRecord], references: &[Vec<Reference>]) -> Vec<ResolvedLink> {
    let resolver = LinkResolver::from_records(records);

    let links: Vec<ResolvedLink> = records
        .iter()
        .zip(references)
        .flat_map(|(record, refs)| {
            let resolver = &resolver;
            refs.iter()
                .filter_map(Reference::as_link)
                .map(move |spec| resolver.resolve(spec, record.identity()))
        })
        .collect();

    let dangling = links.iter().filter(|l| l.is_dangling()).count();
    debug!(
        "resolved {} links ({} dangling)",
        links.len() - dangling,
        dangling
    );

    links
}

/// Strips the anchor and surrounding noise from a target spec.
fn note_name(target_spec: &str) -> &str {
    let end = target_spec
        .find(['#', '^'])
        .unwrap_or(target_spec.len());
    target_spec[..end].trim().trim_start_matches("./").trim_start_matches('/')
}
