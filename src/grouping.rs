//! Duplicate grouping over a size-ordered [`Catalog`].
//!
//! Each run of equal-size entries is resolved on its own:
//! - a single entry cannot have a duplicate and is skipped;
//! - two entries are compared byte for byte directly;
//! - three or more entries (a cluster) are fingerprinted first, and only
//!   members whose fingerprints collide are compared in full.
//!
//! Per-file failures are logged, counted in the returned [`RunStats`] and
//! exclude only the affected file. They never stop the run.

use std::path::Path;

use log::{debug, trace, warn};

use crate::{
    catalog::{Catalog, CatalogEntry},
    compare::files_equal,
    error::{CompareError, Side},
    fingerprint::fingerprint,
    stats::RunStats,
};

/// A representative file and every file confirmed byte-identical to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup<'a> {
    pub size: u64,
    pub first: &'a Path,
    pub duplicates: Vec<&'a Path>,
}

/// A cluster member whose prefix fingerprint has been computed.
///
/// It borrows its path from the catalog, which therefore outlives it.
#[derive(Debug, Clone, Copy)]
pub struct FingerprintEntry<'a> {
    entry: &'a CatalogEntry,
    fingerprint: u16,
}

impl<'a> FingerprintEntry<'a> {
    pub fn path(&self) -> &'a Path {
        self.entry.path()
    }

    pub fn fingerprint(&self) -> u16 {
        self.fingerprint
    }
}

/// Walk every size run of `catalog` in order, handing each confirmed group to `on_group`.
pub fn find_duplicates<'a, F>(catalog: &'a Catalog, mut on_group: F) -> RunStats
where
    F: FnMut(DuplicateGroup<'a>),
{
    let mut stats = RunStats::default();
    for group in catalog.size_groups() {
        stats += resolve_size_group(group, &mut on_group);
    }
    stats
}

/// Resolve one maximal run of equal-size entries.
pub fn resolve_size_group<'a, F>(group: &'a [CatalogEntry], on_group: &mut F) -> RunStats
where
    F: FnMut(DuplicateGroup<'a>),
{
    match group {
        [] | [_] => RunStats::default(),
        [first, second] => resolve_pair(first, second, on_group),
        _ => resolve_cluster(group, on_group),
    }
}

fn resolve_pair<'a, F>(
    first: &'a CatalogEntry,
    second: &'a CatalogEntry,
    on_group: &mut F,
) -> RunStats
where
    F: FnMut(DuplicateGroup<'a>),
{
    let mut stats = RunStats::default();
    let size = first.size();

    match files_equal(first.path(), second.path(), size) {
        Ok(true) => on_group(DuplicateGroup {
            size,
            first: first.path(),
            duplicates: vec![second.path()],
        }),
        Ok(false) => trace!(
            "{} and {} differ",
            first.path().display(),
            second.path().display()
        ),
        Err(err) => {
            warn!("{}", err.source);
            stats.record_failure();
        }
    }

    stats
}

fn resolve_cluster<'a, F>(group: &'a [CatalogEntry], on_group: &mut F) -> RunStats
where
    F: FnMut(DuplicateGroup<'a>),
{
    resolve_cluster_with(group, files_equal, on_group)
}

fn resolve_cluster_with<'a, C, F>(
    group: &'a [CatalogEntry],
    mut compare: C,
    on_group: &mut F,
) -> RunStats
where
    C: FnMut(&Path, &Path, u64) -> Result<bool, CompareError>,
    F: FnMut(DuplicateGroup<'a>),
{
    let mut stats = RunStats::default();
    let size = group[0].size();
    debug!("Fingerprinting {} files of {} bytes", group.len(), size);

    let mut pending: Vec<FingerprintEntry<'a>> = Vec::with_capacity(group.len());
    for entry in group {
        match fingerprint(entry.path(), size) {
            Ok(fingerprint) => pending.push(FingerprintEntry { entry, fingerprint }),
            Err(err) => {
                warn!("{err}");
                stats.record_failure();
            }
        }
    }

    // Anchors are taken front to back; every member confirmed equal to the
    // anchor leaves the working set, so each file is reported at most once.
    let mut next = 0;
    while next < pending.len() {
        let anchor = pending[next];
        next += 1;

        let mut duplicates = Vec::new();
        let mut anchor_failed = false;
        let mut kept = pending.split_off(next);
        kept.retain(|candidate| {
            if anchor_failed || candidate.fingerprint != anchor.fingerprint {
                return true;
            }
            match compare(anchor.path(), candidate.path(), size) {
                Ok(true) => {
                    duplicates.push(candidate.path());
                    false
                }
                Ok(false) => true,
                Err(err) => {
                    warn!("{}", err.source);
                    stats.record_failure();
                    match err.side {
                        Side::First => {
                            anchor_failed = true;
                            true
                        }
                        Side::Second => false,
                    }
                }
            }
        });
        pending.extend(kept);

        if !duplicates.is_empty() {
            on_group(DuplicateGroup {
                size,
                first: anchor.path(),
                duplicates,
            });
        }
    }

    stats
}
