//! Errors surfaced by the metrics engine.

use thiserror::Error;

use crate::domain::NoteIdentity;

/// Fatal errors that abort a metrics run.
///
/// Malformed markdown is never an error; only an ambiguous corpus or an
/// unrepresentable report stops the pipeline.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Two input notes normalize to the same identity.
    #[error("duplicate note identity: {identity}")]
    DuplicateIdentity { identity: NoteIdentity },

    /// A note path is empty once normalized against the corpus root.
    #[error("invalid note identity '{path}': path is empty relative to the corpus root")]
    InvalidIdentity { path: String },

    /// The report could not be serialized.
    #[error("failed to encode report: {0}")]
    EncodingFailure(#[from] serde_json::Error),
}

/// Result type for engine operations.
pub type MetricsResult<T> = Result<T, MetricsError>;
