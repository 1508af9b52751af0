//! Command handlers for the CLI.

mod completions;
mod report;
mod stats;

use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::domain::Report;
use crate::engine::compute_report;
use crate::infra::load_sources;

pub use completions::handle_completions;
pub use report::handle_report;
pub use stats::{build_stats, handle_stats};

// ===========================================
// Shared Utilities
// ===========================================

/// Loads every note of the vault and runs the metrics pipeline.
pub(crate) fn load_report(notes_dir: &Path) -> Result<Report> {
    let sources = load_sources(notes_dir)
        .with_context(|| format!("failed to read vault {}", notes_dir.display()))?;

    // Identities from the scanner are already vault-relative.
    let report = compute_report(sources, "").context("failed to compute metrics")?;

    info!(
        "{} notes, {} links ({} dangling)",
        report.corpus.note_count,
        report.corpus.total_link_count,
        report.corpus.dangling_link_count()
    );
    Ok(report)
}
