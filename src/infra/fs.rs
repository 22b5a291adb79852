//! Reading note dumps and writing exported files.

use crate::domain::Note;
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors during file system operations.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("notes file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse notes in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid encoding in {path}: {encoding}")]
    InvalidEncoding { path: PathBuf, encoding: String },

    #[error("output directory does not exist: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    /// Creates an appropriate FsError from an io::Error.
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

/// Reads notes from a JSON file.
///
/// The file holds the notes application's JSON: a single note object or an
/// array of notes. A UTF-8 byte order mark is ignored.
///
/// # Errors
///
/// Returns `FsError::NotFound` if the file doesn't exist.
/// Returns `FsError::InvalidEncoding` if the file is UTF-16.
/// Returns `FsError::Parse` if the JSON is not a note or list of notes.
pub fn read_notes(path: &Path) -> Result<Vec<Note>, FsError> {
    let bytes = std::fs::read(path).map_err(|e| FsError::from_io(path, e))?;
    parse_notes(&bytes, path)
}

fn parse_notes(bytes: &[u8], path: &Path) -> Result<Vec<Note>, FsError> {
    if bytes.starts_with(&[0xFF, 0xFE]) || bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(FsError::InvalidEncoding {
            path: path.into(),
            encoding: "UTF-16 byte order mark detected; convert to UTF-8".into(),
        });
    }
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);

    // Dispatch on the first token so a bad note reports its own field error.
    let is_array = bytes
        .iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|&b| b == b'[');
    let parsed = if is_array {
        serde_json::from_slice::<Vec<Note>>(bytes)
    } else {
        serde_json::from_slice::<Note>(bytes).map(|note| vec![note])
    };

    parsed.map_err(|e| FsError::Parse {
        path: path.into(),
        source: e,
    })
}

/// Writes an exported file into `dir` atomically and returns its path.
///
/// Uses a temporary file in the same directory and an atomic rename, so a
/// failed export never leaves a truncated file behind. An existing file with
/// the same name is replaced.
///
/// # Errors
///
/// Returns `FsError::DirectoryNotFound` if `dir` doesn't exist.
/// Returns `FsError::AtomicWrite` if the rename fails.
pub fn write_export(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, FsError> {
    if !dir.is_dir() {
        return Err(FsError::DirectoryNotFound { path: dir.into() });
    }

    let path = dir.join(filename);
    let mut temp = NamedTempFile::new_in(dir).map_err(|e| FsError::Io {
        path: path.clone(),
        source: e,
    })?;

    temp.write_all(bytes).map_err(|e| FsError::Io {
        path: path.clone(),
        source: e,
    })?;

    temp.persist(&path).map_err(|e| FsError::AtomicWrite {
        path: path.clone(),
        source: e.error,
    })?;

    Ok(path)
}
