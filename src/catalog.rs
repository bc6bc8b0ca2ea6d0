//! Size-ordered catalog of every file a scan discovers.
//!
//! Entries are kept sorted by ascending size. Files of the same size are
//! contiguous and stay in the order they were inserted, so the first file
//! the walker yields for a size is always the first of its run.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// One discovered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    path: PathBuf,
    size: u64,
}

impl CatalogEntry {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

/// All files of one run, ordered by non-decreasing size.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file after every entry of the same or smaller size.
    ///
    /// Fails with [`Error::Allocation`] when the catalog cannot grow; the
    /// catalog is left unchanged in that case.
    pub fn insert(&mut self, path: impl Into<PathBuf>, size: u64) -> Result<()> {
        let path = path.into();
        if let Err(source) = self.entries.try_reserve(1) {
            return Err(Error::Allocation { path, source });
        }

        let at = self.entries.partition_point(|entry| entry.size <= size);
        self.entries.insert(at, CatalogEntry { path, size });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Maximal runs of entries sharing one size, smallest size first.
    pub fn size_groups(&self) -> impl Iterator<Item = &[CatalogEntry]> + '_ {
        self.entries.chunk_by(|a, b| a.size == b.size)
    }

    /// Number of runs with at least two members, i.e. the ones that need comparing.
    pub fn candidate_groups(&self) -> usize {
        self.size_groups().filter(|group| group.len() > 1).count()
    }
}
