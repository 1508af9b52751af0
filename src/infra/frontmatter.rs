//! Frontmatter detection and tag extraction for markdown notes.

use serde_yaml::Value;
use thiserror::Error;

/// Keys whose values are read as note tags.
const TAG_KEYS: &[&str] = &["tags", "tag"];

/// Keys whose values are read as note aliases.
const ALIAS_KEYS: &[&str] = &["aliases", "alias"];

/// Property counts of a frontmatter block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Properties {
    /// Top-level keys in the block.
    pub count: usize,
    pub aliases: usize,
}

/// A YAML frontmatter block found at the start of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frontmatter<'a> {
    /// The YAML between the delimiters.
    pub yaml: &'a str,
    /// Byte offset in the full text where the body begins.
    pub body_start: usize,
}

/// Errors during frontmatter parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid YAML in frontmatter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
}

/// Locates a frontmatter block.
///
/// # Format
/// ```text
/// ---
/// tags: [project, draft]
/// ---
/// Body content here...
/// ```
///
/// The opening delimiter must be the very first line. Returns `None` when
/// the text does not open with `---` or the block is never closed; such text
/// is treated as plain body.
pub fn split(content: &str) -> Option<Frontmatter<'_>> {
    let after_opening = if content.starts_with("---\r\n") {
        5
    } else if content.starts_with("---\n") {
        4
    } else {
        return None;
    };

    let yaml_and_rest = &content[after_opening..];
    let closing_pos = find_closing_delimiter(yaml_and_rest)?;
    let yaml = &yaml_and_rest[..closing_pos];

    let after_closing = &yaml_and_rest[closing_pos..];
    let delimiter_len = if after_closing.starts_with("---\r\n") {
        5
    } else if after_closing.starts_with("---\n") {
        4
    } else {
        3
    };

    Some(Frontmatter {
        yaml,
        body_start: after_opening + closing_pos + delimiter_len,
    })
}

/// Reads tag names from frontmatter YAML.
///
/// Accepts a sequence (`tags: [a, b]`) or a single string split on commas
/// and whitespace (`tags: a, b`). A leading `#` on a name is dropped.
/// Non-string scalars such as numbers are kept in their YAML text form.
///
/// # Errors
///
/// Returns `ParseError::InvalidYaml` if the block is not valid YAML.
pub fn parse_tags(yaml: &str) -> Result<Vec<String>, ParseError> {
    if yaml.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_yaml::from_str(yaml)?;
    let mut tags = Vec::new();

    for key in TAG_KEYS {
        match value.get(*key) {
            Some(Value::String(s)) => {
                tags.extend(
                    s.split(|c: char| c == ',' || c.is_whitespace())
                        .filter_map(clean_tag),
                );
            }
            Some(Value::Sequence(items)) => {
                tags.extend(items.iter().filter_map(scalar_text).filter_map(|s| clean_tag(&s)));
            }
            _ => {}
        }
    }

    Ok(tags)
}

/// Counts the top-level properties and the aliases of a frontmatter block.
///
/// An alias key holding a sequence counts each entry; a non-empty string
/// counts as one alias. YAML that is not a mapping has no properties.
///
/// # Errors
///
/// Returns `ParseError::InvalidYaml` if the block is not valid YAML.
pub fn parse_properties(yaml: &str) -> Result<Properties, ParseError> {
    if yaml.trim().is_empty() {
        return Ok(Properties::default());
    }

    let value: Value = serde_yaml::from_str(yaml)?;
    let Value::Mapping(mapping) = &value else {
        return Ok(Properties::default());
    };

    let aliases = ALIAS_KEYS
        .iter()
        .map(|key| match value.get(*key) {
            Some(Value::Sequence(items)) => items.len(),
            Some(Value::String(s)) if !s.trim().is_empty() => 1,
            _ => 0,
        })
        .sum();

    Ok(Properties {
        count: mapping.len(),
        aliases,
    })
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn clean_tag(raw: &str) -> Option<String> {
    let name = raw.trim();
    let name = name.strip_prefix('#').unwrap_or(name);
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Finds the position of the closing `---` delimiter.
///
/// The closing delimiter must:
/// - Appear at the start of a line
/// - Be exactly `---` followed by newline or EOF
fn find_closing_delimiter(content: &str) -> Option<usize> {
    let mut pos = 0;
    let bytes = content.as_bytes();

    while pos < bytes.len() {
        if pos + 3 <= bytes.len() && &content[pos..pos + 3] == "---" {
            let after = pos + 3;
            if after >= bytes.len()
                || bytes[after] == b'\n'
                || (bytes[after] == b'\r' && after + 1 < bytes.len() && bytes[after + 1] == b'\n')
            {
                return Some(pos);
            }
        }

        match content[pos..].find('\n') {
            Some(newline_offset) => pos += newline_offset + 1,
            None => break,
        }
    }

    None
}
