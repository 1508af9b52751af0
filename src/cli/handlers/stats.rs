//! Stats command handler.

use std::path::Path;

use anyhow::Result;

use super::load_report;
use crate::cli::StatsArgs;
use crate::cli::output::{
    LinkedNoteListing, NoteNameListing, Output, OutputFormat, StatsListing, TagListing,
};
use crate::domain::Report;

pub fn handle_stats(args: &StatsArgs, notes_dir: &Path) -> Result<()> {
    let report = load_report(notes_dir)?;
    let stats = build_stats(&report, args.top);

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(&stats))?);
        }
        OutputFormat::Human => print_human(&stats, args.top),
    }
    Ok(())
}

/// Summarizes a report for display.
///
/// Tags are ordered by usage, most used first; `top` limits the most-linked
/// list.
pub fn build_stats(report: &Report, top: usize) -> StatsListing {
    let corpus = &report.corpus;

    let mut tags: Vec<TagListing> = corpus
        .tag_usage
        .iter()
        .map(|(name, count)| TagListing {
            name: name.clone(),
            count: *count,
        })
        .collect();
    tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    let most_linked = report
        .most_linked(top)
        .into_iter()
        .map(|m| LinkedNoteListing {
            path: m.identity.to_string(),
            in_links: m.in_links,
        })
        .collect();

    let notes = report.notes.values();
    let longest_name = notes
        .clone()
        .max_by(|a, b| {
            a.name_char_count
                .cmp(&b.name_char_count)
                .then_with(|| b.identity.cmp(&a.identity))
        })
        .map(|m| NoteNameListing {
            path: m.identity.to_string(),
            name_chars: m.name_char_count,
        });

    StatsListing {
        note_count: corpus.note_count,
        total_word_count: corpus.total_word_count,
        total_link_count: corpus.total_link_count,
        resolved_link_count: corpus.resolved_link_count,
        dangling_link_count: corpus.dangling_link_count(),
        duplicate_base_names: corpus.duplicate_base_names,
        total_tag_usage: corpus.total_tag_usage,
        property_count: notes.clone().map(|m| m.property_count).sum(),
        alias_count: notes.clone().map(|m| m.alias_count).sum(),
        todo_count: notes.clone().map(|m| m.todo_count).sum(),
        max_path_depth: notes.map(|m| m.path_depth).max().unwrap_or(0),
        longest_name,
        orphans: corpus.orphans.iter().map(ToString::to_string).collect(),
        dangling: corpus.dangling.iter().cloned().collect(),
        tags,
        most_linked,
    }
}

fn print_human(stats: &StatsListing, top: usize) {
    println!("Notes:            {}", stats.note_count);
    println!("Words:            {}", stats.total_word_count);
    println!(
        "Links:            {} ({} resolved, {} dangling)",
        stats.total_link_count, stats.resolved_link_count, stats.dangling_link_count
    );
    println!("Orphans:          {}", stats.orphans.len());
    println!("Duplicate names:  {}", stats.duplicate_base_names);
    println!(
        "Tags:             {} unique, {} uses",
        stats.tags.len(),
        stats.total_tag_usage
    );
    println!(
        "Properties:       {} ({} aliases)",
        stats.property_count, stats.alias_count
    );
    println!("Todos:            {}", stats.todo_count);
    println!("Max path depth:   {}", stats.max_path_depth);
    if let Some(longest) = &stats.longest_name {
        println!(
            "Longest name:     {} ({} chars)",
            longest.path, longest.name_chars
        );
    }

    if !stats.most_linked.is_empty() {
        println!("\nMost linked:");
        for note in &stats.most_linked {
            println!("  {:>4}  {}", note.in_links, note.path);
        }
    }

    if !stats.tags.is_empty() {
        println!("\nTop tags:");
        for tag in stats.tags.iter().take(top) {
            println!("  {:>4}  #{}", tag.count, tag.name);
        }
    }

    if !stats.orphans.is_empty() {
        println!("\nOrphans:");
        for path in &stats.orphans {
            println!("  {}", path);
        }
    }

    if !stats.dangling.is_empty() {
        println!("\nDangling links:");
        for target in &stats.dangling {
            println!("  [[{}]]", target);
        }
    }
}
