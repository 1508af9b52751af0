//! The metrics pipeline: build records, extract, resolve, aggregate, serialize.
//!
//! A run is a pure function of its input. Only extraction fans out across
//! threads; resolution and aggregation need the whole corpus and run after
//! extraction has finished.

pub mod aggregate;
pub mod extract;
pub mod report;
pub mod resolve;

use log::debug;

use crate::domain::{MetricsResult, NoteSource, Report, build_records};

pub use aggregate::aggregate;
pub use extract::{extract, extract_all};
pub use report::{to_json, to_json_pretty};
pub use resolve::{LinkResolver, resolve_all};

/// Computes the metrics report for a corpus.
///
/// `root` is the corpus root used to relativize absolute identities.
///
/// # Errors
///
/// Returns `MetricsError::DuplicateIdentity` or `MetricsError::InvalidIdentity`
/// if the sources do not form a valid corpus. No partial report is produced.
///
/// # Examples
///
/// ```
/// use vault_metrics::domain::NoteSource;
/// use vault_metrics::engine::compute_report;
///
/// let report = compute_report(
///     vec![NoteSource::new("[[b]]", "a.md"), NoteSource::new("", "b.md")],
///     "",
/// )
/// .unwrap();
///
/// assert_eq!(report.notes["a.md"].out_links, 1);
/// assert_eq!(report.notes["b.md"].in_links, 1);
/// ```
pub fn compute_report<I>(sources: I, root: &str) -> MetricsResult<Report>
where
    I: IntoIterator<Item = NoteSource>,
{
    let records = build_records(sources, root)?;
    let references = extract_all(&records);
    debug!(
        "extracted {} references from {} notes",
        references.iter().map(Vec::len).sum::<usize>(),
        records.len()
    );

    let links = resolve_all(&records, &references);
    Ok(aggregate(&records, &references, &links))
}

/// Computes the report and renders it as compact JSON.
///
/// # Errors
///
/// Fails like [`compute_report`], or with `MetricsError::EncodingFailure`.
pub fn compute_json<I>(sources: I, root: &str) -> MetricsResult<String>
where
    I: IntoIterator<Item = NoteSource>,
{
    let report = compute_report(sources, root)?;
    to_json(&report)
}
