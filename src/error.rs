//! Error taxonomy for a duplicate scan.
//!
//! Errors fall in two classes:
//! - fatal: the directory tree cannot be walked or the catalog cannot grow.
//!   These abort the run.
//! - per-file: a single file cannot be opened, mapped, or has changed size.
//!   These are counted as failures and only exclude that file from its group.

use std::{collections::TryReserveError, fmt, io, path::PathBuf};

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every failure a scan can run into.
#[derive(Debug, Error)]
pub enum Error {
    /// The top-level directory could not be opened for traversal.
    #[error("error reading directory {path}: {source}")]
    Traversal {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The catalog could not grow to hold another entry.
    #[error("insufficient memory to catalog {path}")]
    Allocation {
        path: PathBuf,
        #[source]
        source: TryReserveError,
    },

    /// A file could not be opened for reading.
    #[error("unable to open file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file was opened but its contents could not be mapped.
    #[error("unable to map file {path}: {source}")]
    Map {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file on disk no longer has the length it was catalogued with.
    #[error("{path} changed size during scan (expected {expected} bytes, found {actual})")]
    SizeChanged {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },
}

impl Error {
    /// The path this error is about.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Traversal { path, .. }
            | Self::Allocation { path, .. }
            | Self::Open { path, .. }
            | Self::Map { path, .. }
            | Self::SizeChanged { path, .. } => path,
        }
    }

    /// Whether this error must abort the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Traversal { .. } | Self::Allocation { .. })
    }
}

/// Which of the two files handed to the comparator failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => f.write_str("first"),
            Side::Second => f.write_str("second"),
        }
    }
}

/// A comparison that could not be carried out.
#[derive(Debug, Error)]
#[error("{side} file of comparison: {source}")]
pub struct CompareError {
    pub side: Side,
    #[source]
    pub source: Error,
}
