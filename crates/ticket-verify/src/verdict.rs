//! Verification outcome types.
//!
//! A verification ends in exactly one [`VerificationResult`]. It converts
//! into the wire response handed back to clients and into the record the
//! caller persists.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason attached to a successful verification
pub const REASON_VERIFIED: &str = "Ticket verified successfully";

/// Reason attached when the identifier check fails
pub const REASON_ID_MISMATCH: &str = "Ticket ID does not match or could not be extracted";

/// Reason attached when the ticket is too old
pub fn outside_window_reason(window_days: i64) -> String {
    format!(
        "Ticket date is outside valid window (must be within last {} days)",
        window_days
    )
}

/// Status of a verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Valid,
    Invalid,
    /// Awaiting manual review. Never produced by [`crate::TicketVerifier`].
    Pending,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Valid => "valid",
            VerificationStatus::Invalid => "invalid",
            VerificationStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of a single verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub status: VerificationStatus,
    /// Human-readable explanation, never empty
    pub reason: String,
    /// Normalized candidate identifier, possibly empty
    pub extracted_id: String,
}

impl VerificationResult {
    pub fn verified(extracted_id: impl Into<String>) -> Self {
        Self {
            status: VerificationStatus::Valid,
            reason: REASON_VERIFIED.to_string(),
            extracted_id: extracted_id.into(),
        }
    }

    pub fn id_mismatch(extracted_id: impl Into<String>) -> Self {
        Self {
            status: VerificationStatus::Invalid,
            reason: REASON_ID_MISMATCH.to_string(),
            extracted_id: extracted_id.into(),
        }
    }

    pub fn outside_window(extracted_id: impl Into<String>, window_days: i64) -> Self {
        Self {
            status: VerificationStatus::Invalid,
            reason: outside_window_reason(window_days),
            extracted_id: extracted_id.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status == VerificationStatus::Valid
    }

    /// Client-facing view of this result
    pub fn to_response(&self) -> VerificationResponse {
        VerificationResponse {
            valid: self.is_valid(),
            reason: self.reason.clone(),
            extracted_id: self.extracted_id.clone(),
        }
    }
}

/// JSON body returned to clients: `{ valid, reason, extractedId }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResponse {
    pub valid: bool,
    pub reason: String,
    pub extracted_id: String,
}

impl From<VerificationResult> for VerificationResponse {
    fn from(result: VerificationResult) -> Self {
        Self {
            valid: result.is_valid(),
            reason: result.reason,
            extracted_id: result.extracted_id,
        }
    }
}

/// Row describing a verification, shaped for the caller's storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub ticket_identifier: Option<String>,
    pub extracted_ticket_id: String,
    pub validation_status: VerificationStatus,
    pub validation_reason: String,
    /// Calendar date of the ticket (UTC)
    pub ticket_date: NaiveDate,
}

impl VerificationRecord {
    pub fn new(
        ticket_identifier: Option<&str>,
        result: &VerificationResult,
        ticket_date: DateTime<Utc>,
    ) -> Self {
        Self {
            ticket_identifier: ticket_identifier.map(str::to_string),
            extracted_ticket_id: result.extracted_id.clone(),
            validation_status: result.status,
            validation_reason: result.reason.clone(),
            ticket_date: ticket_date.date_naive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_value(VerificationStatus::Valid).unwrap(), json!("valid"));
        assert_eq!(serde_json::to_value(VerificationStatus::Invalid).unwrap(), json!("invalid"));
        assert_eq!(serde_json::to_value(VerificationStatus::Pending).unwrap(), json!("pending"));
        assert_eq!(VerificationStatus::Pending.to_string(), "pending");
    }

    #[test]
    fn test_default_window_reason() {
        assert_eq!(
            outside_window_reason(60),
            "Ticket date is outside valid window (must be within last 60 days)"
        );
    }

    #[test]
    fn test_response_shape() {
        let response = VerificationResult::verified("ABC12345").to_response();
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "valid": true,
                "reason": "Ticket verified successfully",
                "extractedId": "ABC12345"
            })
        );
    }

    #[test]
    fn test_invalid_response() {
        let response: VerificationResponse = VerificationResult::id_mismatch("").into();
        assert!(!response.valid);
        assert_eq!(response.reason, REASON_ID_MISMATCH);
        assert_eq!(response.extracted_id, "");
    }

    #[test]
    fn test_record_uses_calendar_date() {
        let result = VerificationResult::verified("ABC12345");
        let date = Utc.with_ymd_and_hms(2026, 10, 18, 23, 59, 0).unwrap();
        let record = VerificationRecord::new(Some("ABC12345"), &result, date);

        assert_eq!(record.ticket_date, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        assert_eq!(record.validation_status, VerificationStatus::Valid);

        let row = serde_json::to_value(&record).unwrap();
        assert_eq!(row["ticket_date"], json!("2026-10-18"));
        assert_eq!(row["validation_status"], json!("valid"));
        assert_eq!(row["extracted_ticket_id"], json!("ABC12345"));
    }
}
