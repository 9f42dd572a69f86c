//! License issuance.
//!
//! The issuer turns a [`LicenseRequest`] into artifact bytes:
//! 1. Validate the request
//! 2. Serialize the record canonically
//! 3. Sign `SHA-256(canonical)` with the Ed25519 private key
//! 4. Add the decoy prefix (if configured)
//! 5. Frame as JSON / base64, optionally tagged

use crate::config::IssuerConfig;
use crate::crypto::decoy::compose_signature_field;
use crate::crypto::keys::{decode_signing_key, encode_verifying_key, fingerprint};
use crate::crypto::signing::sign_canonical;
use crate::protocol::envelope::{encode_artifact, Encoding, Framing};
use crate::protocol::models::{LicenseRecord, SignedLicense};
use crate::LicsealError;
use ed25519_dalek::SigningKey;
use tracing::info;

/// Vendor-supplied inputs for one license.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseRequest {
    /// Customer identifier (non-empty).
    pub customer_id: String,
    /// Feature modules, in the order they should be signed.
    pub modules: Vec<String>,
    /// Activation window start, `YYYY-MM-DD`.
    pub start_date: String,
    /// Activation window end, `YYYY-MM-DD`.
    pub end_date: String,
}

impl LicenseRequest {
    fn to_record(&self) -> LicenseRecord {
        LicenseRecord::new(
            self.customer_id.clone(),
            self.start_date.clone(),
            self.end_date.clone(),
            self.modules.clone(),
        )
    }
}

/// Signs license records with a private key.
///
/// Holds only immutable key material; one instance can issue any number of
/// licenses.
pub struct Issuer {
    signing_key: SigningKey,
    config: IssuerConfig,
}

impl std::fmt::Debug for Issuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Issuer")
            .field("key_fingerprint", &fingerprint(&self.signing_key.verifying_key()))
            .field("config", &self.config)
            .finish()
    }
}

impl Issuer {
    /// Create an issuer from a PKCS#8 PEM private key.
    ///
    /// # Errors
    /// - `Config` - Configuration validation fails
    /// - `KeyRead` - The private key cannot be parsed
    pub fn new(private_key_pem: &str, config: IssuerConfig) -> Result<Self, LicsealError> {
        config.validate()?;
        let signing_key = decode_signing_key(private_key_pem)?;
        Ok(Self {
            signing_key,
            config,
        })
    }

    /// Issue a license and return the artifact bytes.
    ///
    /// # Errors
    /// - `InvalidInput` - Request fails issuance preconditions
    /// - `Signing` - The signature operation failed
    pub fn issue(&self, request: &LicenseRequest) -> Result<Vec<u8>, LicsealError> {
        let record = request.to_record();
        record.validate()?;

        let canonical = record.canonical_bytes().map_err(|e| {
            LicsealError::Signing(format!("Canonical serialization failed: {}", e))
        })?;

        let signature_hex = sign_canonical(&canonical, &self.signing_key)?;
        let signature_field = compose_signature_field(
            &signature_hex,
            self.config.effective_decoy_len(),
            self.config.tagged,
        );

        let json = SignedLicense::new(record, signature_field).to_json()?;

        let framing = Framing {
            encoding: if self.config.base64_wrap {
                Encoding::Base64
            } else {
                Encoding::Json
            },
            tagged: self.config.tagged,
        };

        info!(
            customer_id = %request.customer_id,
            modules = request.modules.len(),
            key = %fingerprint(&self.signing_key.verifying_key()),
            "License issued"
        );

        Ok(encode_artifact(&json, framing))
    }

    /// Public key (SPKI PEM) matching this issuer's private key.
    pub fn public_key_pem(&self) -> Result<String, LicsealError> {
        encode_verifying_key(&self.signing_key.verifying_key())
    }
}

/// One-shot issuance.
///
/// Equivalent to `Issuer::new(private_key_pem, config)?.issue(..)`.
pub fn issue(
    customer_id: &str,
    modules: &[&str],
    start_date: &str,
    end_date: &str,
    private_key_pem: &str,
    config: &IssuerConfig,
) -> Result<Vec<u8>, LicsealError> {
    let request = LicenseRequest {
        customer_id: customer_id.to_string(),
        modules: modules.iter().map(|m| (*m).to_string()).collect(),
        start_date: start_date.to_string(),
        end_date: end_date.to_string(),
    };
    Issuer::new(private_key_pem, config.clone())?.issue(&request)
}
