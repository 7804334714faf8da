//! Content hashing helpers built on blake3.

use std::path::Path;

/// Hash bytes down to a `u64` for cheap change detection.
#[inline]
pub fn compute(bytes: &[u8]) -> u64 {
    let hash = blake3::hash(bytes);
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(buf)
}

/// Stable identifier for a content file, derived from its source path.
///
/// Hex-encoded and truncated to 16 characters. The id survives edits to the
/// file body, it changes only when the file moves.
pub fn content_id(path: &Path) -> String {
    let hash = blake3::hash(path.to_string_lossy().as_bytes());
    hex::encode(&hash.as_bytes()[..8])
}
