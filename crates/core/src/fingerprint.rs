//! Content fingerprints for media files.
//!
//! A fingerprint is a SHA-256 hex digest of the file bytes. The registry
//! treats it as an opaque unique key, so any fixed-length digest works; this
//! module provides the one the project uses.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::CoreError;

/// Default chunk size for [`fingerprint_file_partial`] (64 KiB).
pub const DEFAULT_PARTIAL_CHUNK_BYTES: u64 = 64 * 1024;

/// Digest and size of a hashed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFingerprint {
    pub hash: String,
    pub file_size: i64,
}

/// Compute a SHA-256 hex digest of the given bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

/// Hash the whole file.
pub fn fingerprint_file(path: &Path) -> io::Result<FileFingerprint> {
    let mut file = File::open(path)?;
    let file_size = file_size(&file)?;

    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;

    Ok(FileFingerprint {
        hash: format!("{:x}", hasher.finalize()),
        file_size,
    })
}

/// Hash only the first and last `chunk_bytes` of the file plus its size.
///
/// Files no larger than `2 * chunk_bytes` are hashed whole, so for small
/// files this matches [`fingerprint_file`]. Faster for very large files, at
/// the cost of ignoring the middle of the content.
pub fn fingerprint_file_partial(path: &Path, chunk_bytes: u64) -> io::Result<FileFingerprint> {
    let mut file = File::open(path)?;
    let file_size = file_size(&file)?;

    let mut hasher = Sha256::new();
    if file_size as u64 <= chunk_bytes.saturating_mul(2) {
        io::copy(&mut file, &mut hasher)?;
    } else {
        let mut chunk = Vec::with_capacity(chunk_bytes as usize);
        (&mut file).take(chunk_bytes).read_to_end(&mut chunk)?;
        hasher.update(&chunk);

        chunk.clear();
        file.seek(SeekFrom::End(-(chunk_bytes as i64)))?;
        (&mut file).take(chunk_bytes).read_to_end(&mut chunk)?;
        hasher.update(&chunk);

        hasher.update(file_size.to_string().as_bytes());
    }

    Ok(FileFingerprint {
        hash: format!("{:x}", hasher.finalize()),
        file_size,
    })
}

fn file_size(file: &File) -> io::Result<i64> {
    let len = file.metadata()?.len();
    i64::try_from(len).map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "file too large"))
}

/// Validate a caller-supplied fingerprint and return it trimmed.
pub fn validate_fingerprint(hash: &str) -> Result<&str, CoreError> {
    let hash = hash.trim();
    if hash.is_empty() {
        return Err(CoreError::Validation("fingerprint must not be empty".into()));
    }
    Ok(hash)
}

/// Human-readable size using 1024-based units (`"512 B"`, `"1.5 KB"`).
pub fn format_file_size(bytes: i64) -> String {
    const UNIT: i64 = 1024;
    const PREFIXES: &[u8] = b"KMGTPE";

    if bytes < UNIT {
        return format!("{bytes} B");
    }

    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }

    format!(
        "{:.1} {}B",
        bytes as f64 / div as f64,
        PREFIXES[exp] as char
    )
}
