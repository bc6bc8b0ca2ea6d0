//! Rendering of duplicate groups and run counters.
//!
//! The text form is the tool's stdout contract:
//!
//! ```text
//!
//! <size>
//! <representative path>
//! <duplicate path>
//! ...
//! <scanned> files scanned, <failed> file(s) failed.
//! ```

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{grouping::DuplicateGroup, stats::RunStats};

/// Write one group: a blank line, the size, then one path per line.
pub fn write_group<W: Write>(out: &mut W, group: &DuplicateGroup<'_>) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", group.size)?;
    writeln!(out, "{}", group.first.display())?;
    for dupe in &group.duplicates {
        writeln!(out, "{}", dupe.display())?;
    }
    Ok(())
}

/// Write the final counters line.
pub fn write_summary<W: Write>(out: &mut W, stats: &RunStats) -> io::Result<()> {
    writeln!(
        out,
        "{} files scanned, {} file(s) failed.",
        stats.scanned, stats.failed
    )
}

/// Human-readable byte formatting (KB, MB, GB).
pub fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let b = bytes as f64;

    if b >= GB {
        format!("{:.2} GB", b / GB)
    } else if b >= MB {
        format!("{:.2} MB", b / MB)
    } else if b >= KB {
        format!("{:.2} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

/// An owned copy of a duplicate group, kept for the JSON report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportGroup {
    pub size: u64,
    pub first: PathBuf,
    pub duplicates: Vec<PathBuf>,
}

impl From<&DuplicateGroup<'_>> for ReportGroup {
    fn from(group: &DuplicateGroup<'_>) -> Self {
        Self {
            size: group.size,
            first: group.first.to_path_buf(),
            duplicates: group.duplicates.iter().map(|p| p.to_path_buf()).collect(),
        }
    }
}

impl ReportGroup {
    /// Bytes that removing every duplicate in this group would free.
    pub fn reclaimable_bytes(&self) -> u64 {
        self.size * self.duplicates.len() as u64
    }
}

/// Total bytes held by duplicates across `groups`.
pub fn reclaimable_bytes(groups: &[ReportGroup]) -> u64 {
    groups.iter().map(ReportGroup::reclaimable_bytes).sum()
}

/// Machine-readable summary of a run.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub groups: &'a [ReportGroup],
    pub scanned: u64,
    pub failed: u64,
    pub reclaimable_bytes: u64,
}

impl<'a> JsonReport<'a> {
    pub fn new(groups: &'a [ReportGroup], stats: &RunStats) -> Self {
        Self {
            groups,
            scanned: stats.scanned,
            failed: stats.failed,
            reclaimable_bytes: reclaimable_bytes(groups),
        }
    }

    /// Write the report as pretty-printed JSON to `path`.
    pub fn write_to(&self, path: &Path) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()
    }
}
