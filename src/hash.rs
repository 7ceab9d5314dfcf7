//! BLAKE3 content hashing for cache-busting file names

use blake3::Hasher;

/// Number of hex characters kept from the digest
pub const HASH_LENGTH: usize = 16;

/// Calculate the content hash of a string
///
/// The hash only depends on the content, so the same polyfill code always
/// ends up in the same output file and stays cacheable across builds.
pub fn content_hash(content: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(content.as_bytes());
    let mut hex = hasher.finalize().to_hex().to_string();
    hex.truncate(HASH_LENGTH);
    hex
}
