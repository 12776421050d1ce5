//! Content fingerprints for image files.
//!
//! Metrics attached to an artwork remember the SHA-256 of the bytes they were
//! computed from. Content-based rather than mtime-based, so a re-upload of the
//! same file (or a `git checkout` that resets modification times) does not
//! look like a change.

use sha2::{Digest, Sha256};
use std::io;
use std::path::Path;

/// SHA-256 of a byte buffer, returned as a lowercase hex string.
pub fn hash_bytes(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// SHA-256 of a file's contents, returned as a lowercase hex string.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(hash_bytes(&bytes))
}
