//!
//! SHA-256 hashing utilities.
//!
//! Used wherever a stable, collision-resistant fingerprint is needed:
//! selector derivation from function signatures and code/payload digests
//! in diagnostics. Output is identical on every platform.
//!

use sha2::{Digest, Sha256};

/// Return the 32-byte SHA-256 digest of `bytes`.
#[must_use]
pub fn sha256(bytes: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(bytes));

    out
}

/// Return the first four bytes of the SHA-256 digest of `bytes`.
#[must_use]
pub fn sha256_prefix4(bytes: &[u8]) -> [u8; 4] {
    let digest = sha256(bytes);

    [digest[0], digest[1], digest[2], digest[3]]
}

///
/// TESTS
///
