//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Vault summary printed by `stats`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsListing {
    pub note_count: usize,
    pub total_word_count: usize,
    pub total_link_count: usize,
    pub resolved_link_count: usize,
    pub dangling_link_count: usize,
    pub duplicate_base_names: usize,
    pub total_tag_usage: usize,
    pub property_count: usize,
    pub alias_count: usize,
    pub todo_count: usize,
    pub max_path_depth: usize,
    /// Longest note name in characters, with its path.
    pub longest_name: Option<NoteNameListing>,
    pub orphans: Vec<String>,
    pub dangling: Vec<String>,
    pub tags: Vec<TagListing>,
    pub most_linked: Vec<LinkedNoteListing>,
}

/// A tag with its usage count.
#[derive(Debug, Serialize)]
pub struct TagListing {
    pub name: String,
    pub count: usize,
}

/// A note with the character length of its name.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteNameListing {
    pub path: String,
    pub name_chars: usize,
}

/// A note with its incoming link count.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedNoteListing {
    pub path: String,
    pub in_links: usize,
}
