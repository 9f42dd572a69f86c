//! Shared helpers for integration tests.

#![allow(dead_code)]

use base64::{engine::general_purpose::STANDARD, Engine};
use licseal::{IssuerConfig, KeyPairPem, LicenseRequest};

/// Fresh key pair for one test.
pub fn fresh_keys() -> KeyPairPem {
    licseal::generate_keypair().unwrap()
}

/// The reference scenario: ACME, modules a,b, calendar 2025.
pub fn acme_request() -> LicenseRequest {
    LicenseRequest {
        customer_id: "ACME".to_string(),
        modules: vec!["a".to_string(), "b".to_string()],
        start_date: "2025-01-01".to_string(),
        end_date: "2025-12-31".to_string(),
    }
}

/// Issue `request` under `config` with `keys`.
pub fn issue(keys: &KeyPairPem, config: IssuerConfig, request: &LicenseRequest) -> Vec<u8> {
    licseal::Issuer::new(&keys.private_pem, config)
        .unwrap()
        .issue(request)
        .unwrap()
}

/// Unwrap a base64 artifact into its JSON value.
pub fn artifact_json(artifact: &[u8]) -> serde_json::Value {
    let text = std::str::from_utf8(artifact).unwrap().trim();
    let json = match STANDARD.decode(text) {
        Ok(bytes) => String::from_utf8(bytes).unwrap(),
        Err(_) => text.to_string(),
    };
    serde_json::from_str(&json).unwrap()
}

/// Re-encode a JSON value as a legacy artifact (base64 if `wrap`).
pub fn legacy_artifact(value: &serde_json::Value, wrap: bool) -> Vec<u8> {
    let json = serde_json::to_string(value).unwrap();
    if wrap {
        STANDARD.encode(json).into_bytes()
    } else {
        json.into_bytes()
    }
}
