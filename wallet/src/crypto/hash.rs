//! # Hashing Utilities
//!
//! BLAKE2b is the ledger's hash of choice, so it is ours. Two widths:
//!
//! - **BLAKE2b-256**: seeds from passphrases, ECDSA message digests and the
//!   digest of oversized signing payloads.
//! - **BLAKE2b-512**: only for SS58 checksums, where the format fixes the
//!   width and we keep the first two bytes.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Blake2b512, Digest};

use crate::config::HASH_OUTPUT_LENGTH;

type Blake2b256 = Blake2b<U32>;

/// BLAKE2b with a 256-bit output.
///
/// # Example
///
/// ```
/// use comhub_wallet::crypto::blake2_256;
///
/// let digest = blake2_256(b"hello");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn blake2_256(data: &[u8]) -> [u8; HASH_OUTPUT_LENGTH] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// BLAKE2b-512 over the concatenation of `parts`.
///
/// Takes parts rather than one slice so SS58 can hash
/// `"SS58PRE" || prefix || key` without building a temporary buffer.
pub fn blake2_512(parts: &[&[u8]]) -> [u8; 64] {
    let mut hasher = Blake2b512::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 64];
    out.copy_from_slice(&hasher.finalize());
    out
}
