//! Key hashing: a fixed multiplicative string hash.

/// Multiplier applied to the accumulator before each byte is added.
pub const MULTIPLIER: u64 = 97;

/// Hash a byte sequence.
///
/// Starts from zero and folds every byte in as `acc * MULTIPLIER + byte`
/// with wrapping arithmetic. Deterministic and total; the empty sequence
/// hashes to zero.
#[inline]
pub fn hash_bytes(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(0u64, |acc, &b| acc.wrapping_mul(MULTIPLIER).wrapping_add(b as u64))
}

/// Bucket index for a precomputed hash under `capacity` buckets.
#[inline]
pub(crate) fn bucket_index(hash: u64, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    (hash % capacity as u64) as usize
}
