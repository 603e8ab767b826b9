//! Hashing utilities.
//!
//! Two distinct concerns:
//! - `fingerprint` (blake3): stable hex digest embedded in the built index
//!   so consumers and watch mode can tell whether the collection changed.
//! - `compute` (FxHasher): fast non-cryptographic u64 for in-process change
//!   detection (config reloads).

use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Length of the shortened hex fingerprint.
pub const FINGERPRINT_LEN: usize = 16;

/// Compute the shortened blake3 hex fingerprint of a byte slice.
#[inline]
pub fn fingerprint<T: AsRef<[u8]> + ?Sized>(data: &T) -> String {
    let digest = blake3::hash(data.as_ref());
    let mut hx = hex::encode(digest.as_bytes());
    hx.truncate(FINGERPRINT_LEN);
    hx
}

/// Fast non-cryptographic 64-bit hash, for change detection only.
#[inline]
pub fn compute<T: AsRef<[u8]> + ?Sized>(data: &T) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(data.as_ref());
    hasher.finish()
}
