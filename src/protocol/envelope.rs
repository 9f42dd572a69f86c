//! Artifact framing: raw JSON, base64-wrapped JSON, and the tagged header.
//!
//! Legacy artifacts carry no format marker, so the reader tries base64 first
//! and falls back to raw JSON. Tagged artifacts start with a header line
//! that names the encoding:
//!
//! ```text
//! LICSEAL/1 base64
//! eyJjdXN0b21lcklkIjoiQUNNRSIs...
//! ```

use crate::protocol::models::SignedLicense;
use crate::LicsealError;
use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::debug;

/// Header token of tagged artifacts.
pub const FORMAT_TAG: &str = "LICSEAL/1";

const TAG_FAMILY: &str = "LICSEAL/";

/// Body encoding of an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// UTF-8 JSON text.
    Json,
    /// Standard base64 over the UTF-8 JSON text.
    Base64,
}

impl Encoding {
    fn as_str(self) -> &'static str {
        match self {
            Encoding::Json => "json",
            Encoding::Base64 => "base64",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "json" => Some(Encoding::Json),
            "base64" => Some(Encoding::Base64),
            _ => None,
        }
    }
}

/// How an artifact was framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Framing {
    /// Body encoding.
    pub encoding: Encoding,
    /// Whether the artifact carried the `LICSEAL/1` header.
    pub tagged: bool,
}

/// Base64-wrap JSON text.
pub fn wrap_base64(json: &str) -> String {
    STANDARD.encode(json.as_bytes())
}

/// Undo [`wrap_base64`]. Embedded ASCII whitespace (line wrapping) is ignored.
pub fn unwrap_base64(text: &str) -> Option<String> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(compact).ok()?;
    String::from_utf8(bytes).ok()
}

/// Package signed-license JSON into artifact bytes.
pub fn encode_artifact(json: &str, framing: Framing) -> Vec<u8> {
    let body = match framing.encoding {
        Encoding::Json => json.to_string(),
        Encoding::Base64 => wrap_base64(json),
    };

    if framing.tagged {
        format!("{} {}\n{}", FORMAT_TAG, framing.encoding.as_str(), body).into_bytes()
    } else {
        body.into_bytes()
    }
}

/// Recover the signed license and its framing from artifact bytes.
pub fn decode_artifact(bytes: &[u8]) -> Result<(SignedLicense, Framing), LicsealError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| LicsealError::MalformedArtifact("Artifact is not UTF-8 text".to_string()))?
        .trim();

    if text.starts_with(TAG_FAMILY) {
        return decode_tagged(text);
    }

    // Legacy: base64 first, then raw JSON.
    if let Some(json) = unwrap_base64(text) {
        if let Ok(signed) = SignedLicense::from_json(&json) {
            debug!("Legacy artifact decoded as base64");
            return Ok((
                signed,
                Framing {
                    encoding: Encoding::Base64,
                    tagged: false,
                },
            ));
        }
    }

    debug!("Legacy artifact treated as raw JSON");
    let signed = SignedLicense::from_json(text)?;
    Ok((
        signed,
        Framing {
            encoding: Encoding::Json,
            tagged: false,
        },
    ))
}

fn decode_tagged(text: &str) -> Result<(SignedLicense, Framing), LicsealError> {
    let (header, body) = text.split_once('\n').ok_or_else(|| {
        LicsealError::MalformedArtifact("Tagged artifact has no body".to_string())
    })?;

    let mut parts = header.split_whitespace();
    let version = parts.next().unwrap_or_default();
    if version != FORMAT_TAG {
        return Err(LicsealError::MalformedArtifact(format!(
            "Unsupported artifact version: {}",
            version
        )));
    }

    let encoding = parts.next().and_then(Encoding::parse).ok_or_else(|| {
        LicsealError::MalformedArtifact(format!("Unknown artifact encoding in header: {}", header))
    })?;

    if parts.next().is_some() {
        return Err(LicsealError::MalformedArtifact(format!(
            "Unexpected tokens in header: {}",
            header
        )));
    }

    let json = match encoding {
        Encoding::Json => body.trim().to_string(),
        Encoding::Base64 => unwrap_base64(body).ok_or_else(|| {
            LicsealError::MalformedArtifact("Tagged base64 body does not decode".to_string())
        })?,
    };

    debug!(encoding = encoding.as_str(), "Tagged artifact decoded");
    let signed = SignedLicense::from_json(&json)?;
    Ok((
        signed,
        Framing {
            encoding,
            tagged: true,
        },
    ))
}
