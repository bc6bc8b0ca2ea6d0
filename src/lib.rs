//! Core logic for crcdupe.
//!
//! Duplicate files are found in three stages, each one only looking at what
//! survived the previous:
//! - size: the [`Catalog`] keeps files ordered by size so equal sizes are adjacent
//! - fingerprint: a CRC-16 over the first 512 bytes of each file in a run of three or more
//! - content: a byte-exact comparison of the remaining candidates
//!
//! The CLI, progress bars and colouring live in `src/main.rs`.

pub mod catalog;
pub mod compare;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod grouping;
pub mod logging;
pub mod mapped;
pub mod report;
pub mod stats;
pub mod walk;

pub use catalog::{Catalog, CatalogEntry};
pub use compare::files_equal;
pub use config::ScanConfig;
pub use error::{CompareError, Error, Result, Side};
pub use fingerprint::{FINGERPRINT_WINDOW, fingerprint};
pub use grouping::{DuplicateGroup, FingerprintEntry, find_duplicates, resolve_size_group};
pub use stats::RunStats;
pub use walk::{build_catalog, build_catalog_with};
