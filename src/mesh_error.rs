//! MeshRemapError: Unified error type for mesh-remap public APIs
//!
//! Every fallible operation in the crate reports through this enum. Missing
//! correspondences between decompositions are *not* errors; they are encoded
//! as `-1` in the decomposition maps and skipped downstream.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Unified error type for mesh-remap operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshRemapError {
    /// A required case file (mesh, addressing list, dictionary, field) is absent.
    #[error("required file `{}` does not exist", .0.display())]
    MissingFile(PathBuf),
    /// Reading or writing a file failed.
    #[error("I/O error on `{}`: {message}", path.display())]
    Io { path: PathBuf, message: String },
    /// A dictionary file could not be tokenized.
    #[error("malformed dictionary `{}`: {message}", path.display())]
    DictionaryParse { path: PathBuf, message: String },
    /// A dictionary is missing a mandatory keyword.
    #[error("dictionary `{}` has no entry `{keyword}`", path.display())]
    MissingKeyword { path: PathBuf, keyword: String },
    /// A label list could not be parsed.
    #[error("malformed label list: {0}")]
    ListParse(String),
    /// A mesh or field file could not be decoded.
    #[error("mesh I/O parse error: {0}")]
    MeshIoParse(String),
    /// Mesh connectivity or geometry is inconsistent.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// A processor directory carries no time directories.
    #[error("no time directories found under `{}`", .0.display())]
    NoTimeDirectories(PathBuf),
    /// A requested time directory does not exist.
    #[error("time `{time}` not found under `{}`", case.display())]
    UnknownTime { case: PathBuf, time: String },
    /// An index stored in one array points past the end of another.
    #[error("{what} index {index} out of bounds (len {len})")]
    IndexOutOfBounds {
        what: &'static str,
        index: usize,
        len: usize,
    },
    /// An addressing array carries a value it must not (e.g. a negative cell index).
    #[error("invalid addressing at entry {entry}: value {value}")]
    InvalidAddressing { entry: usize, value: i64 },
    /// A field or map does not have the size the mesh demands.
    #[error("field `{field}` size mismatch: expected {expected}, found {found}")]
    FieldSizeMismatch {
        field: String,
        expected: usize,
        found: usize,
    },
    /// A membership list names a subdomain the decomposition does not have.
    #[error("subdomain {subdomain} is outside the decomposition (0..{count})")]
    UnknownSubdomain { subdomain: i64, count: usize },
    /// A utility was pointed at a field kind it does not handle.
    #[error("field `{field}` has unsupported type: {found}")]
    UnsupportedFieldType { field: String, found: String },
}

impl MeshRemapError {
    /// Wrap an [`std::io::Error`] with the path it happened on.
    ///
    /// `NotFound` is promoted to [`MeshRemapError::MissingFile`].
    pub fn io(path: impl AsRef<Path>, err: std::io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        if err.kind() == std::io::ErrorKind::NotFound {
            MeshRemapError::MissingFile(path)
        } else {
            MeshRemapError::Io {
                path,
                message: err.to_string(),
            }
        }
    }
}
