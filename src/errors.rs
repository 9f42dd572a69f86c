//! Licseal error types.

use thiserror::Error;

/// Errors that can occur while issuing or verifying a license.
#[derive(Debug, Error)]
pub enum LicsealError {
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Issuance input rejected before signing.
    #[error("Invalid license input: {0}")]
    InvalidInput(String),

    /// Key material is missing or cannot be parsed.
    #[error("Key read error: {0}")]
    KeyRead(String),

    /// The signature operation rejected the digest or key.
    #[error("Signing error: {0}")]
    Signing(String),

    /// Artifact is not structured text of the expected shape.
    #[error("Malformed license artifact: {0}")]
    MalformedArtifact(String),

    /// Signature does not validate against the recovered record.
    #[error("License signature verification failed")]
    InvalidSignature,

    /// Today falls outside the license activation window.
    #[error("License not active on {today} (valid {start} to {end})")]
    DateRange {
        /// Start of the activation window as stored in the record.
        start: String,
        /// End of the activation window as stored in the record.
        end: String,
        /// The date that was checked.
        today: String,
    },

    /// Required feature module is not licensed.
    #[error("Required module not licensed: {module}")]
    EntitlementMissing {
        /// The module identifier that was required but missing.
        module: String,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(String),
}
