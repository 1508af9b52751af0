//! File I/O and frontmatter parsing

pub mod frontmatter;
mod fs;

pub use fs::{FsError, load_sources, read_note_text, scan_vault, write_report};
