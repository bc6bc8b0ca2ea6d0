//! Scoped read-only mapping of a file prefix.
//!
//! A [`MappedFile`] owns both the descriptor and the mapping; dropping it
//! unmaps and closes, whichever way the caller leaves its scope.

use std::{fs::File, path::Path};

use memmap2::{Mmap, MmapOptions};

use crate::error::{Error, Result};

#[derive(Debug)]
pub struct MappedFile {
    // Field order matters: the map is dropped before the file it came from.
    map: Option<Mmap>,
    _file: File,
}

impl MappedFile {
    /// Open `path` read-only and map its first `len` bytes.
    ///
    /// `expected_size` is the length the file was catalogued with. A file
    /// that has since grown or shrunk is rejected rather than mapped, so a
    /// truncated file can never be read past its end.
    pub fn open(path: &Path, expected_size: u64, len: u64) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let actual = file
            .metadata()
            .map_err(|source| Error::Open {
                path: path.to_path_buf(),
                source,
            })?
            .len();
        if actual != expected_size {
            return Err(Error::SizeChanged {
                path: path.to_path_buf(),
                expected: expected_size,
                actual,
            });
        }

        if len == 0 {
            return Ok(Self {
                map: None,
                _file: file,
            });
        }

        let map_error = |source| Error::Map {
            path: path.to_path_buf(),
            source,
        };
        let len = usize::try_from(len)
            .map_err(|_| map_error(std::io::Error::other("file too large to map")))?;

        // SAFETY: the mapping is read-only and private to this value; the
        // length was checked against the file's current size above.
        let map = unsafe { MmapOptions::new().len(len).map(&file) }.map_err(map_error)?;

        Ok(Self {
            map: Some(map),
            _file: file,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        self.map.as_deref().unwrap_or(&[])
    }
}
