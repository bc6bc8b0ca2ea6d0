//! Cheap content fingerprint used to pre-filter same-size files.
//!
//! The fingerprint is a CRC-16/ARC (the Linux kernel's `crc16`, seeded with
//! zero) over the first [`FINGERPRINT_WINDOW`] bytes of a file. Equal
//! fingerprints only mean "worth a full comparison", never "equal".

use std::path::Path;

use crc::{CRC_16_ARC, Crc};

use crate::{error::Result, mapped::MappedFile};

/// Number of leading bytes covered by a fingerprint.
pub const FINGERPRINT_WINDOW: u64 = 512;

const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_ARC);

/// CRC-16 over a byte slice.
pub fn crc16(bytes: &[u8]) -> u16 {
    CRC16.checksum(bytes)
}

/// Fingerprint the first `min(size, 512)` bytes of the file at `path`.
///
/// The file is mapped only for the duration of this call.
pub fn fingerprint(path: &Path, size: u64) -> Result<u16> {
    let window = size.min(FINGERPRINT_WINDOW);
    let mapped = MappedFile::open(path, size, window)?;
    Ok(crc16(mapped.bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn crc16_matches_kernel_check_value() {
        assert_eq!(crc16(b"123456789"), 0xBB3D);
        assert_eq!(crc16(b""), 0);
    }

    #[test]
    fn short_files_are_fingerprinted_whole() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("short.txt");
        fs::write(&path, b"123456789").unwrap();

        assert_eq!(fingerprint(&path, 9).unwrap(), 0xBB3D);
    }

    #[test]
    fn only_the_first_512_bytes_count() {
        let dir = TempDir::new().unwrap();
        let mut left = vec![b'X'; 600];
        let mut right = left.clone();
        left[550] = b'L';
        right[550] = b'R';
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, &left).unwrap();
        fs::write(&b, &right).unwrap();

        assert_eq!(fingerprint(&a, 600).unwrap(), fingerprint(&b, 600).unwrap());
    }

    #[test]
    fn differing_prefixes_differ() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, b"abcd").unwrap();
        fs::write(&b, b"wxyz").unwrap();

        assert_ne!(fingerprint(&a, 4).unwrap(), fingerprint(&b, 4).unwrap());
    }

    #[test]
    fn unopenable_file_reports_open_error() {
        let dir = TempDir::new().unwrap();
        let err = fingerprint(&dir.path().join("missing"), 12).unwrap_err();
        assert!(matches!(err, Error::Open { .. }));
    }
}
