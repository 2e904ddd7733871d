//! `ETag` generation functions.

use sha2::{Digest, Sha256};

/// ## Summary
/// Generates an `ETag` from content bytes using SHA256.
///
/// The `ETag` is the hex-encoded SHA256 hash of the content, wrapped in
/// quotes. Only handed out for writes whose stored bytes are known to
/// equal the hashed buffer.
#[must_use]
pub fn generate_etag(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let hash = hasher.finalize();
    format!("\"{}\"", hex::encode(hash))
}
