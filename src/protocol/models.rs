//! License record and signed artifact structs.

use crate::LicsealError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used for `startDate` / `endDate`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The signed license payload.
///
/// Field order is significant: it fixes the key order of the canonical
/// serialization, and therefore the signed bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseRecord {
    customer_id: String,
    start_date: String,
    end_date: String,
    modules: Vec<String>,
}

impl LicenseRecord {
    /// Build a record from raw fields. No validation is performed.
    pub fn new(
        customer_id: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        modules: Vec<String>,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            modules,
        }
    }

    /// Canonical serialization: compact JSON, fixed key order.
    pub fn canonical_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Check issuance preconditions.
    ///
    /// Rejects an empty customer id, empty module ids, dates that are not
    /// strict `YYYY-MM-DD`, and `startDate > endDate`. An empty module list
    /// is allowed.
    pub fn validate(&self) -> Result<(), LicsealError> {
        if self.customer_id.trim().is_empty() {
            return Err(LicsealError::InvalidInput(
                "customerId cannot be empty".to_string(),
            ));
        }

        if let Some(pos) = self.modules.iter().position(|m| m.trim().is_empty()) {
            return Err(LicsealError::InvalidInput(format!(
                "module at index {} is empty",
                pos
            )));
        }

        let start = parse_iso_date(&self.start_date).ok_or_else(|| {
            LicsealError::InvalidInput(format!(
                "startDate must be YYYY-MM-DD, got {:?}",
                self.start_date
            ))
        })?;
        let end = parse_iso_date(&self.end_date).ok_or_else(|| {
            LicsealError::InvalidInput(format!(
                "endDate must be YYYY-MM-DD, got {:?}",
                self.end_date
            ))
        })?;

        if start > end {
            return Err(LicsealError::InvalidInput(format!(
                "startDate {} is after endDate {}",
                self.start_date, self.end_date
            )));
        }

        Ok(())
    }

    /// Customer identifier.
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// Start date exactly as signed.
    pub fn start_date_str(&self) -> &str {
        &self.start_date
    }

    /// End date exactly as signed.
    pub fn end_date_str(&self) -> &str {
        &self.end_date
    }

    /// Parsed start date, if it is a valid `YYYY-MM-DD` date.
    pub fn start_date(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.start_date)
    }

    /// Parsed end date, if it is a valid `YYYY-MM-DD` date.
    pub fn end_date(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.end_date)
    }

    /// Licensed modules in authored order.
    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    /// Whether `module` is licensed.
    pub fn has_module(&self, module: &str) -> bool {
        self.modules.iter().any(|m| m == module)
    }
}

/// Parse a strict `YYYY-MM-DD` date.
///
/// `chrono` accepts unpadded fields; those are rejected here so the string
/// that gets signed is the one a reader expects.
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(s, DATE_FORMAT).ok()?;
    (date.format(DATE_FORMAT).to_string() == s).then_some(date)
}

/// The distributable artifact object: record fields plus signature field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedLicense {
    /// Customer identifier.
    pub customer_id: String,
    /// Activation window start.
    pub start_date: String,
    /// Activation window end.
    pub end_date: String,
    /// Licensed modules in authored order.
    pub modules: Vec<String>,
    /// Optional decoy prefix followed by the signature hex.
    pub signature: String,
}

impl SignedLicense {
    /// Attach a signature field to a record.
    pub fn new(record: LicenseRecord, signature: String) -> Self {
        Self {
            customer_id: record.customer_id,
            start_date: record.start_date,
            end_date: record.end_date,
            modules: record.modules,
            signature,
        }
    }

    /// The record portion, as the issuer would have built it.
    pub fn record(&self) -> LicenseRecord {
        LicenseRecord::new(
            self.customer_id.clone(),
            self.start_date.clone(),
            self.end_date.clone(),
            self.modules.clone(),
        )
    }

    /// Serialize as compact JSON.
    pub fn to_json(&self) -> Result<String, LicsealError> {
        serde_json::to_string(self).map_err(|e| {
            LicsealError::Signing(format!("Failed to serialize signed license: {}", e))
        })
    }

    /// Parse from JSON text.
    pub fn from_json(json: &str) -> Result<Self, LicsealError> {
        serde_json::from_str(json).map_err(|e| {
            LicsealError::MalformedArtifact(format!("Failed to parse license JSON: {}", e))
        })
    }
}
