//! Decoy prefix handling for the signature field.
//!
//! A decoy prefix is random hex prepended to the real signature. It hides
//! where the signature starts and provides no cryptographic guarantee.
//!
//! Legacy artifacts: `<decoy><signature>`, decoy length agreed out-of-band.
//! Tagged artifacts: `<len:4 hex><decoy><signature>`.

use crate::LicsealError;
use rand::rngs::OsRng;
use rand::RngCore;

/// Width of the decoy length field in tagged signature fields.
pub const TAGGED_LEN_WIDTH: usize = 4;

/// Generate `len` random lowercase hex characters.
pub fn random_hex(len: usize) -> String {
    let mut bytes = vec![0u8; len.div_ceil(2)];
    OsRng.fill_bytes(&mut bytes);
    let mut out = hex::encode(bytes);
    out.truncate(len);
    out
}

/// Build the stored signature field.
pub fn compose_signature_field(signature_hex: &str, decoy_len: usize, tagged: bool) -> String {
    let decoy = random_hex(decoy_len);
    if tagged {
        format!(
            "{:0width$x}{}{}",
            decoy_len,
            decoy,
            signature_hex,
            width = TAGGED_LEN_WIDTH
        )
    } else {
        format!("{}{}", decoy, signature_hex)
    }
}

/// Strip a legacy decoy prefix of known length.
///
/// Returns `None` when the field is too short for that interpretation.
pub fn strip_decoy(field: &str, decoy_len: usize) -> Option<&str> {
    let rest = field.get(decoy_len..)?;
    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}

/// Split a tagged signature field into the real signature hex.
pub fn split_tagged(field: &str) -> Result<&str, LicsealError> {
    let len_hex = field.get(..TAGGED_LEN_WIDTH).ok_or_else(|| {
        LicsealError::MalformedArtifact("Tagged signature field is too short".to_string())
    })?;

    let decoy_len = len_hex
        .bytes()
        .all(|b| b.is_ascii_hexdigit())
        .then(|| usize::from_str_radix(len_hex, 16).ok())
        .flatten()
        .ok_or_else(|| {
            LicsealError::MalformedArtifact(format!("Invalid decoy length field: {}", len_hex))
        })?;

    strip_decoy(&field[TAGGED_LEN_WIDTH..], decoy_len).ok_or(LicsealError::InvalidSignature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_hex_lengths() {
        for len in [0, 1, 2, 129, 130] {
            let s = random_hex(len);
            assert_eq!(s.len(), len);
            assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn test_random_hex_is_random() {
        assert_ne!(random_hex(129), random_hex(129));
    }

    #[test]
    fn test_compose_legacy() {
        let field = compose_signature_field("abcd", 129, false);
        assert_eq!(field.len(), 133);
        assert!(field.ends_with("abcd"));
        assert_eq!(strip_decoy(&field, 129), Some("abcd"));
    }

    #[test]
    fn test_compose_without_decoy() {
        assert_eq!(compose_signature_field("abcd", 0, false), "abcd");
        assert_eq!(compose_signature_field("abcd", 0, true), "0000abcd");
    }

    #[test]
    fn test_compose_tagged_roundtrip() {
        let field = compose_signature_field("abcd", 129, true);
        assert!(field.starts_with("0081"));
        assert_eq!(split_tagged(&field).unwrap(), "abcd");
    }

    #[test]
    fn test_strip_decoy_too_short() {
        assert_eq!(strip_decoy("abc", 3), None);
        assert_eq!(strip_decoy("abc", 10), None);
    }

    #[test]
    fn test_strip_decoy_non_ascii_boundary() {
        // Offsets inside a multi-byte char are rejected, not panicked on.
        assert_eq!(strip_decoy("éabc", 1), None);
    }

    #[test]
    fn test_split_tagged_bad_length_field() {
        let result = split_tagged("zzzzabcd");
        assert!(matches!(result, Err(LicsealError::MalformedArtifact(_))));
    }

    #[test]
    fn test_split_tagged_length_exceeds_field() {
        let result = split_tagged("00ffabcd");
        assert!(matches!(result, Err(LicsealError::InvalidSignature)));
    }

    #[test]
    fn test_split_tagged_rejects_sign_prefix() {
        let result = split_tagged("+081abcd");
        assert!(matches!(result, Err(LicsealError::MalformedArtifact(_))));
    }

    #[test]
    fn test_split_tagged_too_short() {
        let result = split_tagged("00");
        assert!(matches!(result, Err(LicsealError::MalformedArtifact(_))));
    }
}
