//! Ed25519 signature verification.

use crate::crypto::digest::canonical_digest;
use crate::LicsealError;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};

/// Verify a hex-encoded Ed25519 signature against canonical record bytes.
///
/// Any failure (bad hex, wrong length, mismatch) is `InvalidSignature`:
/// callers trying several decoy interpretations treat them all alike.
pub fn verify_signature_hex(
    signature_hex: &str,
    canonical: &[u8],
    verifying_key: &VerifyingKey,
) -> Result<(), LicsealError> {
    let sig_bytes = hex::decode(signature_hex).map_err(|_| LicsealError::InvalidSignature)?;

    let signature =
        Signature::from_slice(&sig_bytes).map_err(|_| LicsealError::InvalidSignature)?;

    let digest = canonical_digest(canonical);

    verifying_key
        .verify(&digest, &signature)
        .map_err(|_| LicsealError::InvalidSignature)?;

    Ok(())
}
