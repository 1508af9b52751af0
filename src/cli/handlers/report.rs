//! Report command handler.

use std::path::Path;

use anyhow::{Context, Result};

use super::load_report;
use crate::cli::ReportArgs;
use crate::cli::config::Config;
use crate::engine::{to_json, to_json_pretty};
use crate::infra::write_report;

pub fn handle_report(args: &ReportArgs, notes_dir: &Path, config: &Config) -> Result<()> {
    let report = load_report(notes_dir)?;

    let json = if args.pretty {
        to_json_pretty(&report)
    } else {
        to_json(&report)
    }
    .context("failed to encode report")?;

    if args.stdout {
        println!("{json}");
        return Ok(());
    }

    let path = config.report_path(notes_dir, args.output.as_ref());
    write_report(&path, &json)
        .with_context(|| format!("failed to write report {}", path.display()))?;

    println!(
        "Wrote metrics for {} notes to {}",
        report.corpus.note_count,
        path.display()
    );
    Ok(())
}
