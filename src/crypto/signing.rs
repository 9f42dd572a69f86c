//! Ed25519 signing over the SHA-256 digest of a canonical record.

use crate::crypto::digest::canonical_digest;
use crate::LicsealError;
use ed25519_dalek::{Signer, SigningKey};

/// Length of a hex-rendered Ed25519 signature.
pub const SIGNATURE_HEX_LEN: usize = 128;

/// Sign canonical record bytes and return the signature as lowercase hex.
///
/// The signed message is `SHA-256(canonical)`. The signature is checked
/// against the key's own public half before it is returned, so a broken key
/// surfaces here instead of in every deployed product.
pub fn sign_canonical(canonical: &[u8], signing_key: &SigningKey) -> Result<String, LicsealError> {
    let digest = canonical_digest(canonical);

    let signature = signing_key
        .try_sign(&digest)
        .map_err(|e| LicsealError::Signing(format!("Ed25519 signing failed: {}", e)))?;

    signing_key
        .verifying_key()
        .verify_strict(&digest, &signature)
        .map_err(|_| {
            LicsealError::Signing("Signature does not verify under the key's public half".to_string())
        })?;

    Ok(hex::encode(signature.to_bytes()))
}
