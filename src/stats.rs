//! Run counters, returned by each stage and summed by the caller.

use std::ops::AddAssign;

/// Tallies of what a stage did to the files it touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Files that were catalogued.
    pub scanned: u64,
    /// Files that could not be stat'ed, opened or mapped.
    pub failed: u64,
    /// Regular files left out because they are below the minimum size.
    pub skipped: u64,
}

impl RunStats {
    pub fn record_scanned(&mut self) {
        self.scanned += 1;
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }
}

impl AddAssign for RunStats {
    fn add_assign(&mut self, other: Self) {
        self.scanned += other.scanned;
        self.failed += other.failed;
        self.skipped += other.skipped;
    }
}
