//! SHA-256 digest computation.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest that gets signed for a canonical record.
pub fn canonical_digest(canonical: &[u8]) -> [u8; 32] {
    Sha256::digest(canonical).into()
}

/// Compute SHA-256 of arbitrary bytes and return it hex-encoded.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
