//! Content hashing via xxh3, used for cache keys and change detection.

/// Hash file content with xxh3-64. Same algorithm used for both the parse
/// cache key and incremental-scan change detection so a cache hit always
/// implies an unchanged hash and vice versa.
pub fn hash_content(content: &[u8]) -> u64 {
    xxhash_rust::xxh3::xxh3_64(content)
}
