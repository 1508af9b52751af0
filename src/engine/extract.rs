//! Markdown feature extraction: headings, wiki links and tags.
//!
//! Code blocks and code spans come from a CommonMark parse, so fences, indented
//! blocks and backtick runs follow the CommonMark rules. Wiki links and tags are
//! not CommonMark, so a scanner walks the remaining text once, line by line.
//! Delimiters are all ASCII, so it steps over bytes and only slices at
//! delimiter positions, which are always char boundaries.

use std::ops::Range;

use log::debug;
use pulldown_cmark::{Event, Parser, Tag};
use rayon::prelude::*;

use crate::domain::{NoteRecord, Reference};
use crate::infra::frontmatter;

/// Extracts references from every record, in parallel.
///
/// The returned vector is index-aligned with `records`.
pub fn extract_all(records: &[NoteRecord]) -> Vec<Vec<Reference>> {
    records
        .par_iter()
        .map(|record| extract(record.text()))
        .collect()
}

/// Extracts references from one note's text, ordered by position.
///
/// Frontmatter tags come first, then body references in text order. Nothing
/// here fails: unterminated links, stray backticks and malformed frontmatter
/// simply produce fewer references.
pub fn extract(text: &str) -> Vec<Reference> {
    let mut refs = Vec::new();

    let body_start = match frontmatter::split(text) {
        Some(fm) => {
            match frontmatter::parse_tags(fm.yaml) {
                Ok(tags) => refs.extend(tags.into_iter().map(Reference::Tag)),
                Err(e) => debug!("ignoring frontmatter tags: {}", e),
            }
            fm.body_start
        }
        None => 0,
    };

    Scanner::new(text, refs).run(body_start)
}

struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    /// Code blocks and code spans, in text order. Nothing inside is scanned.
    code: Vec<Range<usize>>,
    refs: Vec<Reference>,
    /// Cleared once a search for `]]` fails; no later `[[` can close either.
    closers_left: bool,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str, refs: Vec<Reference>) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            code: Vec::new(),
            refs,
            closers_left: true,
        }
    }

    fn run(mut self, start: usize) -> Vec<Reference> {
        self.code = code_ranges(self.text, start);

        let mut pos = start;
        while pos < self.bytes.len() {
            let line_end = self.line_end(pos);
            let line = &self.text[pos..line_end];
            let first = pos + (line.len() - line.trim_start().len());

            let inline_start = match parse_heading(line) {
                Some((level, text_offset)) if self.code_end(first).is_none() => {
                    self.refs
                        .push(Reference::heading(level, line[text_offset..].trim()));
                    pos + text_offset
                }
                _ => pos,
            };

            pos = self.scan_inline(inline_start, line_end);
        }

        self.refs
    }

    /// Scans inline content up to `line_end` and returns where the next line
    /// starts. Links and code that span lines move the end forward.
    fn scan_inline(&mut self, from: usize, mut line_end: usize) -> usize {
        let mut i = from;

        while i < line_end {
            if let Some(end) = self.code_end(i) {
                if end > line_end {
                    if self.starts_line(end) {
                        return end;
                    }
                    line_end = self.line_end(end);
                }
                i = end;
                continue;
            }

            match self.bytes[i] {
                b'[' if self.bytes.get(i + 1) == Some(&b'[') => {
                    match self.take_link(i) {
                        Some(after) => {
                            if after > line_end {
                                line_end = self.line_end(after);
                            }
                            i = after;
                        }
                        None => i += 2,
                    }
                }
                b'#' => i = self.take_tag(i),
                _ => i += 1,
            }
        }

        line_end + 1
    }

    /// Returns the end of the code range covering `pos`, if any.
    fn code_end(&self, pos: usize) -> Option<usize> {
        let idx = self.code.partition_point(|range| range.end <= pos);
        self.code
            .get(idx)
            .filter(|range| range.start <= pos)
            .map(|range| range.end)
    }

    fn starts_line(&self, pos: usize) -> bool {
        pos >= self.bytes.len() || self.bytes[pos - 1] == b'\n'
    }

    /// Reads a `[[target|alias]]` link opened at `start`.
    ///
    /// Returns the position after the closing `]]`, or `None` if the link is
    /// never closed.
    fn take_link(&mut self, start: usize) -> Option<usize> {
        if !self.closers_left {
            return None;
        }

        let content_start = start + 2;
        let Some(offset) = self.text[content_start..].find("]]") else {
            self.closers_left = false;
            return None;
        };

        let content = &self.text[content_start..content_start + offset];
        let target = content.split('|').next().unwrap_or("").trim();
        if !target.is_empty() {
            self.refs.push(Reference::Link(target.to_string()));
        }

        Some(content_start + offset + 2)
    }

    /// Reads a `#tag` at `start`, returning the position to continue from.
    fn take_tag(&mut self, start: usize) -> usize {
        let preceded_by_word = self.text[..start]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || c == '#');
        if preceded_by_word {
            return start + 1;
        }

        let name_start = start + 1;
        let name_len: usize = self.text[name_start..]
            .chars()
            .take_while(|c| is_tag_char(*c))
            .map(char::len_utf8)
            .sum();

        if name_len == 0 {
            return start + 1;
        }

        let end = name_start + name_len;
        self.refs
            .push(Reference::Tag(self.text[name_start..end].to_string()));
        end
    }

    fn line_end(&self, from: usize) -> usize {
        self.text[from..]
            .find('\n')
            .map_or(self.bytes.len(), |offset| from + offset)
    }
}

fn is_tag_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || c == '/'
}

/// Collects the byte ranges of fenced and indented code blocks and of inline
/// code spans in `text[from..]`, as CommonMark parses them.
fn code_ranges(text: &str, from: usize) -> Vec<Range<usize>> {
    Parser::new(&text[from..])
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Start(Tag::CodeBlock(_)) | Event::Code(_) => {
                Some(range.start + from..range.end + from)
            }
            _ => None,
        })
        .collect()
}

/// Recognizes an ATX heading: one to six `#` as the first non-whitespace
/// run, followed by whitespace.
///
/// Returns the level and the byte offset within `line` where the heading
/// text begins (just after the `#` run).
fn parse_heading(line: &str) -> Option<(u8, usize)> {
    let indent = line.len() - line.trim_start().len();
    let rest = &line[indent..];
    let hashes = rest.bytes().take_while(|b| *b == b'#').count();

    if hashes == 0 || hashes > 6 {
        return None;
    }

    let first = rest[hashes..].chars().next()?;
    if !first.is_whitespace() {
        return None;
    }

    Some((hashes as u8, indent + hashes))
}
