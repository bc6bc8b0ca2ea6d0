//! Directory traversal feeding the [`Catalog`].

use std::fs;

use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::{
    catalog::Catalog,
    config::ScanConfig,
    error::{Error, Result},
    stats::RunStats,
};

/// Recursively catalog every regular file under `config.root` of at least
/// `config.min_size` bytes.
///
/// Entries are visited in file-name order so repeated runs over the same tree
/// catalog files identically. Symlinks are not followed.
///
/// An unreadable root and a failed catalog insert abort the walk. Unreadable
/// subdirectories and files whose metadata cannot be read are logged and
/// counted as failed.
pub fn build_catalog(config: &ScanConfig) -> Result<(Catalog, RunStats)> {
    build_catalog_with(config, |_| {})
}

/// Like [`build_catalog`], calling `on_file` after each catalogued file.
pub fn build_catalog_with<F>(config: &ScanConfig, mut on_file: F) -> Result<(Catalog, RunStats)>
where
    F: FnMut(&RunStats),
{
    let root = &config.root;
    fs::read_dir(root).map_err(|source| Error::Traversal {
        path: root.clone(),
        source,
    })?;

    info!("Scanning files...");
    let mut catalog = Catalog::new();
    let mut stats = RunStats::default();

    let walker = WalkDir::new(root).follow_links(false).sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                if err.depth() == 0 {
                    return Err(Error::Traversal {
                        path: root.clone(),
                        source: err.into(),
                    });
                }
                warn!("Error reading directory entry: {err}");
                stats.record_failure();
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let size = match entry.metadata() {
            Ok(meta) => meta.len(),
            Err(err) => {
                warn!("Error calculating size of file {}: {err}", entry.path().display());
                stats.record_failure();
                continue;
            }
        };

        if size < config.min_size {
            debug!("Skipping {} ({size} bytes)", entry.path().display());
            stats.record_skipped();
            continue;
        }

        if let Err(err) = catalog.insert(entry.into_path(), size) {
            stats.record_failure();
            return Err(err);
        }
        stats.record_scanned();
        on_file(&stats);
    }

    debug!(
        "Catalogued {} files, skipped {}, {} failed",
        stats.scanned, stats.skipped, stats.failed
    );
    Ok((catalog, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, contents: &[u8]) {
        fs::write(dir.join(name), contents).unwrap();
    }

    fn config(root: &Path, min_size: u64) -> ScanConfig {
        ScanConfig {
            root: root.to_path_buf(),
            min_size,
        }
    }

    #[test]
    fn recurses_and_orders_by_size() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        write_file(dir.path(), "big.txt", b"0123456789");
        write_file(dir.path(), "nested/small.txt", b"ab");
        write_file(dir.path(), "mid.txt", b"abcde");

        let (catalog, stats) = build_catalog(&config(dir.path(), 1)).unwrap();

        let sizes: Vec<_> = catalog.entries().iter().map(|e| e.size()).collect();
        assert_eq!(sizes, vec![2, 5, 10]);
        assert!(catalog.entries()[0].path().ends_with("nested/small.txt"));
        assert_eq!(stats.scanned, 3);
        assert_eq!(stats.failed, 0);
    }

    #[test]
    fn files_below_minimum_are_skipped_not_scanned() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "empty", b"");
        write_file(dir.path(), "small", &[0u8; 50]);
        write_file(dir.path(), "large", &[0u8; 150]);

        let (catalog, stats) = build_catalog(&config(dir.path(), 100)).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(stats.scanned, 1);
        assert_eq!(stats.skipped, 2);
    }

    #[test]
    fn same_size_files_follow_name_order() {
        let dir = TempDir::new().unwrap();
        for name in ["c", "a", "b"] {
            write_file(dir.path(), name, b"same");
        }

        let (catalog, _) = build_catalog(&config(dir.path(), 1)).unwrap();

        let names: Vec<_> = catalog
            .entries()
            .iter()
            .map(|e| e.path().file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn missing_root_is_a_traversal_error() {
        let dir = TempDir::new().unwrap();
        let err = build_catalog(&config(&dir.path().join("absent"), 1)).unwrap_err();

        assert!(matches!(err, Error::Traversal { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn progress_callback_sees_every_catalogued_file() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "one", b"1");
        write_file(dir.path(), "two", b"22");

        let mut calls = 0;
        build_catalog_with(&config(dir.path(), 1), |_| calls += 1).unwrap();
        assert_eq!(calls, 2);
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_not_catalogued() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "target", b"content");
        std::os::unix::fs::symlink(dir.path().join("target"), dir.path().join("link")).unwrap();

        let (catalog, _) = build_catalog(&config(dir.path(), 1)).unwrap();
        assert_eq!(catalog.len(), 1);
    }
}
