//! Vault scanning, note reading and atomic report writes.

use crate::domain::NoteSource;
use log::{debug, trace};
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Errors during file system operations on a vault.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("not found: {path}")]
    NotFound { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parent directory does not exist: {path}")]
    ParentNotFound { path: PathBuf },

    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("invalid encoding in {path}: {encoding}")]
    InvalidEncoding { path: PathBuf, encoding: String },
}

impl FsError {
    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => FsError::NotFound { path: path.into() },
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path: path.into() },
            _ => FsError::Io {
                path: path.into(),
                source: error,
            },
        }
    }
}

/// Reads a note file as UTF-8 text.
///
/// A leading UTF-8 byte order mark is dropped.
///
/// # Errors
///
/// Returns `FsError::NotFound` or `FsError::PermissionDenied` if the file
/// cannot be opened, and `FsError::InvalidEncoding` for UTF-16 byte order
/// marks or invalid UTF-8.
pub fn read_note_text(path: &Path) -> Result<String, FsError> {
    let bytes = std::fs::read(path).map_err(|e| FsError::from_io(path, e))?;
    decode_note(bytes, path)
}

fn decode_note(bytes: Vec<u8>, path: &Path) -> Result<String, FsError> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(FsError::InvalidEncoding {
            path: path.into(),
            encoding: "UTF-16 LE detected (byte order mark FF FE); convert to UTF-8".into(),
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(FsError::InvalidEncoding {
            path: path.into(),
            encoding: "UTF-16 BE detected (byte order mark FE FF); convert to UTF-8".into(),
        });
    }

    let mut content = String::from_utf8(bytes).map_err(|e| FsError::InvalidEncoding {
        path: path.into(),
        encoding: format!("invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
    })?;

    if content.starts_with('\u{FEFF}') {
        content.replace_range(..'\u{FEFF}'.len_utf8(), "");
    }
    Ok(content)
}

/// Scans a vault recursively for markdown (`.md`) files.
///
/// Hidden files and directories (starting with `.`) are skipped. Paths are
/// returned relative to `dir`, sorted, with forward slashes.
///
/// # Errors
///
/// Returns `FsError::NotFound` if the directory doesn't exist,
/// `FsError::NotADirectory` if it is a file, and `FsError::Walk` if a
/// subdirectory cannot be listed.
pub fn scan_vault(dir: &Path) -> Result<Vec<String>, FsError> {
    if !dir.exists() {
        return Err(FsError::NotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(FsError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut paths = Vec::new();
    let walker = WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = entry.map_err(|e| FsError::Walk {
            path: dir.to_path_buf(),
            source: e,
        })?;
        if !entry.file_type().is_file() || !has_md_extension(&entry) {
            continue;
        }
        if let Some(relative) = relative_identity(entry.path(), dir) {
            trace!("found {}", relative);
            paths.push(relative);
        }
    }

    paths.sort();
    Ok(paths)
}

/// Reads every note of a vault into engine input.
///
/// Identities are vault-relative paths. Any unreadable note fails the whole
/// load so a report never silently misses notes.
///
/// # Errors
///
/// Propagates scanning and reading errors.
pub fn load_sources(dir: &Path) -> Result<Vec<NoteSource>, FsError> {
    let paths = scan_vault(dir)?;
    let sources = paths
        .into_iter()
        .map(|relative| {
            let text = read_note_text(&dir.join(&relative))?;
            Ok(NoteSource::new(text, relative))
        })
        .collect::<Result<Vec<_>, FsError>>()?;

    debug!("loaded {} notes from {}", sources.len(), dir.display());
    Ok(sources)
}

/// Replaces a report file atomically.
///
/// The content goes to a temporary file in the same directory, which is then
/// renamed over `path`. An existing report is untouched unless the rename
/// succeeds.
///
/// # Errors
///
/// Returns `FsError::ParentNotFound` if the parent directory doesn't exist,
/// and `FsError::AtomicWrite` if the rename fails.
pub fn write_report(path: &Path, content: &str) -> Result<(), FsError> {
    let parent = match path.parent() {
        Some(p) if p.as_os_str().is_empty() => Path::new("."),
        Some(p) => p,
        None => return Err(FsError::ParentNotFound { path: path.into() }),
    };

    if !parent.is_dir() {
        return Err(FsError::ParentNotFound {
            path: parent.into(),
        });
    }

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| FsError::Io {
        path: path.into(),
        source: e,
    })?;

    temp.write_all(content.as_bytes())
        .and_then(|()| temp.write_all(b"\n"))
        .map_err(|e| FsError::Io {
            path: path.into(),
            source: e,
        })?;

    temp.persist(path).map_err(|e| FsError::AtomicWrite {
        path: path.into(),
        source: e.error,
    })?;

    debug!("wrote {}", path.display());
    Ok(())
}

fn relative_identity(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<&str> = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<_>>()?;
    Some(parts.join("/"))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|s| s.starts_with('.'))
}

fn has_md_extension(entry: &DirEntry) -> bool {
    entry.path().extension().is_some_and(|e| e == "md")
}
