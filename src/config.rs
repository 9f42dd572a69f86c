//! Issuer and verifier configuration.

use crate::LicsealError;

/// Decoy prefix length agreed between legacy issuers and verifiers.
pub const LEGACY_DECOY_PREFIX_LEN: usize = 129;

/// Largest decoy prefix a tagged artifact can describe (four hex digits).
/// Issuers apply the same bound to legacy artifacts.
pub const MAX_TAGGED_DECOY_LEN: usize = 0xFFFF;

/// Configuration for license issuance.
///
/// The two legacy switches (`decoy_prefix`, `base64_wrap`) are independent of
/// each other and of the protocol: they only change how the signed record is
/// packaged, never what is signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuerConfig {
    /// Prepend random hex characters to the signature field.
    pub decoy_prefix: bool,

    /// Number of random hex characters in the decoy prefix.
    /// Legacy verifiers expect [`LEGACY_DECOY_PREFIX_LEN`].
    pub decoy_len: usize,

    /// Wrap the JSON artifact in a single base64 block.
    pub base64_wrap: bool,

    /// Emit the `LICSEAL/1` header and a self-describing decoy length.
    /// Untagged artifacts are readable by legacy verifiers.
    pub tagged: bool,
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            decoy_prefix: true,
            decoy_len: LEGACY_DECOY_PREFIX_LEN,
            base64_wrap: true,
            tagged: false,
        }
    }
}

impl IssuerConfig {
    /// Plain artifacts: no decoy, no base64, no header.
    pub fn plain() -> Self {
        Self {
            decoy_prefix: false,
            decoy_len: 0,
            base64_wrap: false,
            tagged: false,
        }
    }

    /// Effective decoy length (zero when the prefix is disabled).
    pub fn effective_decoy_len(&self) -> usize {
        if self.decoy_prefix {
            self.decoy_len
        } else {
            0
        }
    }

    /// Validate configuration for obvious errors.
    pub fn validate(&self) -> Result<(), LicsealError> {
        if self.decoy_prefix && self.decoy_len == 0 {
            return Err(LicsealError::Config(
                "decoy_len must be non-zero when decoy_prefix is enabled".to_string(),
            ));
        }
        if self.effective_decoy_len() > MAX_TAGGED_DECOY_LEN {
            return Err(LicsealError::Config(format!(
                "decoy_len must be at most {}, got {}",
                MAX_TAGGED_DECOY_LEN, self.decoy_len
            )));
        }
        Ok(())
    }
}

/// Configuration for license verification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifierConfig {
    /// Decoy prefix length for legacy (untagged) artifacts.
    ///
    /// `None` tries no prefix first, then [`LEGACY_DECOY_PREFIX_LEN`].
    /// Tagged artifacts describe their own prefix and ignore this.
    pub decoy_prefix_len: Option<usize>,
}

impl VerifierConfig {
    /// Candidate decoy lengths to try for a legacy artifact, in order.
    pub fn legacy_candidates(&self) -> Vec<usize> {
        match self.decoy_prefix_len {
            Some(len) => vec![len],
            None => vec![0, LEGACY_DECOY_PREFIX_LEN],
        }
    }
}
