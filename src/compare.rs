//! Byte-exact comparison of two same-size files.

use std::path::Path;

use crate::{
    error::{CompareError, Side},
    mapped::MappedFile,
};

/// Compare exactly `size` bytes of two files.
///
/// Both files are mapped for the duration of the call and released before
/// it returns, on success, mismatch and error alike. An error names which
/// side failed; callers must treat it as "not equal".
pub fn files_equal(first: &Path, second: &Path, size: u64) -> Result<bool, CompareError> {
    let a = MappedFile::open(first, size, size).map_err(|source| CompareError {
        side: Side::First,
        source,
    })?;
    let b = MappedFile::open(second, size, size).map_err(|source| CompareError {
        side: Side::Second,
        source,
    })?;

    Ok(a.bytes() == b.bytes())
}
