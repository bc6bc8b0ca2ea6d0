//! Settings for one scan, built from command-line input.

use std::path::{MAIN_SEPARATOR, PathBuf};

/// Files smaller than this are never catalogued.
pub const DEFAULT_MIN_SIZE: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub root: PathBuf,
    pub min_size: u64,
}

impl ScanConfig {
    /// Build a config from the raw directory and optional minimum-size arguments.
    pub fn from_args(directory: &str, min_size: Option<&str>) -> Self {
        Self {
            root: trim_trailing_separator(directory),
            min_size: min_size.map_or(DEFAULT_MIN_SIZE, parse_min_size),
        }
    }
}

/// Drop one trailing path separator, leaving a bare root (`/`) alone.
pub fn trim_trailing_separator(raw: &str) -> PathBuf {
    let trimmed = match raw.strip_suffix(['/', MAIN_SEPARATOR]) {
        Some(rest) if !rest.is_empty() => rest,
        _ => raw,
    };
    PathBuf::from(trimmed)
}

/// Parse a minimum size leniently.
///
/// Leading decimal digits are used; anything non-numeric counts as 0. The
/// result is raised to [`DEFAULT_MIN_SIZE`], so empty files stay excluded.
pub fn parse_min_size(raw: &str) -> u64 {
    let raw = raw.trim_start();
    let digits = raw
        .find(|c: char| !c.is_ascii_digit())
        .map_or(raw, |end| &raw[..end]);
    digits.parse::<u64>().unwrap_or(0).max(DEFAULT_MIN_SIZE)
}
