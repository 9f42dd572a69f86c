//! Offline license verification.
//!
//! The verifier holds only the public key. It never checks dates or module
//! entitlements; it returns the recovered [`LicenseRecord`] and the caller
//! applies policy (see [`crate::policy`]).

use crate::config::VerifierConfig;
use crate::crypto::decoy::{split_tagged, strip_decoy};
use crate::crypto::keys::decode_verifying_key;
use crate::crypto::verify::verify_signature_hex;
use crate::protocol::envelope::decode_artifact;
use crate::protocol::models::LicenseRecord;
use crate::LicsealError;
use ed25519_dalek::VerifyingKey;
use tracing::{debug, warn};

/// Verifies license artifacts against a public key.
///
/// Cheap to share: holds an immutable key and config, no interior state.
#[derive(Debug, Clone)]
pub struct Verifier {
    verifying_key: VerifyingKey,
    config: VerifierConfig,
}

impl Verifier {
    /// Create a verifier from an SPKI PEM public key.
    ///
    /// # Errors
    /// - `KeyRead` - The public key cannot be parsed
    pub fn new(public_key_pem: &str, config: VerifierConfig) -> Result<Self, LicsealError> {
        let verifying_key = decode_verifying_key(public_key_pem)?;
        Ok(Self {
            verifying_key,
            config,
        })
    }

    /// Verify an artifact and return the signed record.
    ///
    /// This performs:
    /// 1. Framing detection (tagged header, else base64, else raw JSON)
    /// 2. Parse of the signed license object
    /// 3. Decoy prefix removal
    /// 4. Canonical re-serialization of the record
    /// 5. Ed25519 verification of `SHA-256(canonical)`
    ///
    /// # Errors
    /// - `MalformedArtifact` - Not a license artifact of the expected shape
    /// - `InvalidSignature` - No signature interpretation validates
    pub fn verify(&self, artifact: &[u8]) -> Result<LicenseRecord, LicsealError> {
        let result = self.verify_inner(artifact);
        if let Err(ref e) = result {
            warn!(error = %e, "License rejected");
        }
        result
    }

    fn verify_inner(&self, artifact: &[u8]) -> Result<LicenseRecord, LicsealError> {
        let (signed, framing) = decode_artifact(artifact)?;
        let record = signed.record();

        let canonical = record.canonical_bytes().map_err(|e| {
            LicsealError::MalformedArtifact(format!("Canonical serialization failed: {}", e))
        })?;

        if framing.tagged {
            let signature_hex = split_tagged(&signed.signature)?;
            verify_signature_hex(signature_hex, &canonical, &self.verifying_key)?;
            return Ok(record);
        }

        for decoy_len in self.config.legacy_candidates() {
            let Some(signature_hex) = strip_decoy(&signed.signature, decoy_len) else {
                debug!(decoy_len, "Signature field too short for decoy length");
                continue;
            };

            match verify_signature_hex(signature_hex, &canonical, &self.verifying_key) {
                Ok(()) => {
                    debug!(decoy_len, "Signature verified");
                    return Ok(record);
                }
                Err(_) => debug!(decoy_len, "Signature interpretation rejected"),
            }
        }

        Err(LicsealError::InvalidSignature)
    }

    /// Boolean gate for hosts that only need accept/reject.
    pub fn is_valid(&self, artifact: &[u8]) -> bool {
        self.verify(artifact).is_ok()
    }
}

/// One-shot verification.
///
/// `decoy_prefix_len` applies to legacy artifacts only; `None` tries no
/// prefix, then the legacy default length.
pub fn verify(
    artifact: &[u8],
    public_key_pem: &str,
    decoy_prefix_len: Option<usize>,
) -> Result<LicenseRecord, LicsealError> {
    Verifier::new(public_key_pem, VerifierConfig { decoy_prefix_len })?.verify(artifact)
}
