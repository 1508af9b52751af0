//! Core types: NoteIdentity, NoteRecord, Reference, ResolvedLink, Report

mod error;
mod identity;
mod metrics;
mod note;
mod reference;

pub use error::{MetricsError, MetricsResult};
pub use identity::{NOTE_EXTENSION, NoteIdentity};
pub use metrics::{CorpusMetrics, NoteMetrics, Report};
pub use note::{NoteRecord, NoteSource, build_records, count_chars, count_words};
pub use reference::{LinkTarget, Reference, ResolvedLink};
