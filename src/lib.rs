//! # Licseal
//!
//! **Offline-verifiable signed software licenses.**
//!
//! A vendor issues a license binding a customer id, an activation window
//! and a list of feature modules, signed with an Ed25519 private key. The
//! deployed product verifies it with the public key alone, with no network
//! access to the vendor.
//!
//! ## Features
//!
//! - **Canonical signing** — the record is serialized as compact JSON with a
//!   fixed key order; `SHA-256` of those bytes is signed with Ed25519
//! - **Legacy-compatible artifacts** — raw JSON or base64-wrapped JSON, with
//!   an optional random decoy prefix on the signature field
//! - **Tagged artifacts** — an explicit `LICSEAL/1` header and a
//!   self-describing decoy length, no format guessing
//! - **Fail-closed verification** — every failure is a typed error, never a
//!   partial success
//!
//! ## Quickstart
//!
//! ```no_run
//! use licseal::{Issuer, IssuerConfig, LicenseRequest, Verifier, VerifierConfig};
//!
//! fn main() -> Result<(), licseal::LicsealError> {
//!     let keys = licseal::generate_keypair()?;
//!
//!     let issuer = Issuer::new(&keys.private_pem, IssuerConfig::default())?;
//!     let artifact = issuer.issue(&LicenseRequest {
//!         customer_id: "ACME".to_string(),
//!         modules: vec!["gps".to_string(), "ticket".to_string()],
//!         start_date: "2025-01-01".to_string(),
//!         end_date: "2025-12-31".to_string(),
//!     })?;
//!
//!     let verifier = Verifier::new(&keys.public_pem, VerifierConfig::default())?;
//!     let record = verifier.verify(&artifact)?;
//!     licseal::policy::access::check_access(&record, &["gps"], &licseal::SystemClock)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Threat Model
//!
//! Licseal guarantees that only the holder of the private key can produce an
//! artifact the verifier accepts, and that any change to the customer id,
//! dates or module list (including reordering) is rejected.
//!
//! Licseal does **not** prevent binary patching, replacing the embedded
//! public key, or winding back the host clock. The decoy prefix is
//! obfuscation only.

#![deny(warnings)]
#![deny(missing_docs)]

// Core modules
pub mod clock;
pub mod config;
pub mod errors;

// Crypto layer
pub mod crypto;

// Protocol layer
pub mod protocol;

// Issuance and verification
pub mod issuer;
pub mod verifier;

// Policy layer
pub mod policy;

// Persistence
pub mod store;

// Re-exports for public API
pub use clock::{Clock, SystemClock};
pub use config::{IssuerConfig, VerifierConfig, LEGACY_DECOY_PREFIX_LEN};
pub use crypto::keys::{generate_keypair, public_key_fingerprint, KeyPairPem};
pub use errors::LicsealError;
pub use issuer::{issue, Issuer, LicenseRequest};
pub use protocol::envelope::FORMAT_TAG;
pub use protocol::models::{LicenseRecord, SignedLicense};
pub use verifier::{verify, Verifier};

#[cfg(any(test, feature = "test-seams"))]
pub use clock::MockClock;
