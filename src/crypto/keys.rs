//! Ed25519 key material in PEM form.
//!
//! Private keys are PKCS#8 (`BEGIN PRIVATE KEY`), public keys are SPKI
//! (`BEGIN PUBLIC KEY`).

use crate::crypto::digest::sha256_hex;
use crate::LicsealError;
use ed25519_dalek::pkcs8::spki::der::pem::LineEnding;
use ed25519_dalek::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use ed25519_dalek::{SigningKey, VerifyingKey};
use once_cell::sync::OnceCell;
use rand::rngs::OsRng;
use std::collections::HashMap;
use std::sync::RwLock;

/// A freshly generated key pair, PEM-encoded.
#[derive(Clone)]
pub struct KeyPairPem {
    /// PKCS#8 private key.
    pub private_pem: String,
    /// SPKI public key.
    pub public_pem: String,
}

impl std::fmt::Debug for KeyPairPem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPairPem")
            .field("private_pem", &"<redacted>")
            .field("public_pem", &self.public_pem)
            .finish()
    }
}

/// Parse a PKCS#8 PEM private key.
pub fn decode_signing_key(pem: &str) -> Result<SigningKey, LicsealError> {
    SigningKey::from_pkcs8_pem(pem.trim())
        .map_err(|e| LicsealError::KeyRead(format!("Invalid Ed25519 private key PEM: {}", e)))
}

/// Most distinct public keys held by [`decode_verifying_key`]'s cache.
pub const KEY_CACHE_CAPACITY: usize = 16;

/// Cache for decoded verifying keys, keyed by trimmed PEM text.
static KEY_CACHE: OnceCell<RwLock<HashMap<String, VerifyingKey>>> = OnceCell::new();

/// Parse an SPKI PEM public key.
///
/// The key is cached after first decode; products verify on every startup
/// against the same embedded key. The cache is cleared once it holds
/// [`KEY_CACHE_CAPACITY`] keys, so hosts rotating through many keys only
/// pay a re-decode.
pub fn decode_verifying_key(pem: &str) -> Result<VerifyingKey, LicsealError> {
    let pem = pem.trim();

    let cache = KEY_CACHE.get_or_init(|| RwLock::new(HashMap::new()));
    if let Ok(guard) = cache.read() {
        if let Some(key) = guard.get(pem) {
            return Ok(*key);
        }
    }

    let verifying_key = VerifyingKey::from_public_key_pem(pem)
        .map_err(|e| LicsealError::KeyRead(format!("Invalid Ed25519 public key PEM: {}", e)))?;

    // Best-effort insert into cache. If locking fails, still return the decoded key.
    if let Ok(mut guard) = cache.write() {
        if guard.len() >= KEY_CACHE_CAPACITY && !guard.contains_key(pem) {
            guard.clear();
        }
        guard.insert(pem.to_string(), verifying_key);
    }

    Ok(verifying_key)
}

/// Encode a signing key and its public half as PEM.
pub fn encode_keypair(signing_key: &SigningKey) -> Result<KeyPairPem, LicsealError> {
    let private_pem = signing_key
        .to_pkcs8_pem(LineEnding::LF)
        .map_err(|e| LicsealError::KeyRead(format!("Failed to encode private key: {}", e)))?;
    let public_pem = encode_verifying_key(&signing_key.verifying_key())?;

    Ok(KeyPairPem {
        private_pem: private_pem.as_str().to_owned(),
        public_pem,
    })
}

/// Encode a public key as SPKI PEM.
pub fn encode_verifying_key(verifying_key: &VerifyingKey) -> Result<String, LicsealError> {
    verifying_key
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| LicsealError::KeyRead(format!("Failed to encode public key: {}", e)))
}

/// Generate a new Ed25519 key pair from the OS CSPRNG.
pub fn generate_keypair() -> Result<KeyPairPem, LicsealError> {
    let signing_key = SigningKey::generate(&mut OsRng);
    encode_keypair(&signing_key)
}

/// SHA-256 fingerprint (hex) of the raw public key bytes.
pub fn fingerprint(verifying_key: &VerifyingKey) -> String {
    sha256_hex(verifying_key.as_bytes())
}

/// Fingerprint of a PEM public key.
pub fn public_key_fingerprint(pem: &str) -> Result<String, LicsealError> {
    decode_verifying_key(pem).map(|key| fingerprint(&key))
}

#[cfg(test)]
pub(crate) mod test_keys {
    use super::*;

    // Test signing seed (DO NOT USE IN PRODUCTION).
    // This is a well-known Ed25519 test vector seed.
    pub const TEST_SIGNING_SEED_BYTES: [u8; 32] = [
        0x9d, 0x61, 0xb1, 0x9d, 0xef, 0xfd, 0x5a, 0x60, 0xba, 0x84, 0x4a, 0xf4, 0x92, 0xec, 0x2c,
        0xc4, 0x44, 0x49, 0xc5, 0x69, 0x7b, 0x32, 0x69, 0x19, 0x70, 0x3b, 0xac, 0x03, 0x1c, 0xae,
        0x7f, 0x60,
    ];
    pub const TEST_VERIFY_KEY_HEX: &str =
        "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a";

    pub fn test_signing_key() -> SigningKey {
        SigningKey::from_bytes(&TEST_SIGNING_SEED_BYTES)
    }

    pub fn test_keypair_pem() -> KeyPairPem {
        encode_keypair(&test_signing_key()).unwrap()
    }
}
