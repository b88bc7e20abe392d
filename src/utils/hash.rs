//! Content hashing for change detection.

/// 64-bit fingerprint of `bytes` (first 8 bytes of the blake3 digest).
pub fn compute(bytes: &[u8]) -> u64 {
    let digest = blake3::hash(bytes);
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(prefix)
}
