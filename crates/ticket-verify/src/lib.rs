//! Ticket verification core.
//!
//! Checks that a review is backed by a real cinema ticket: a candidate
//! identifier is extracted from the ticket text, fuzzy-matched against the
//! identifier the user typed, and the ticket date is checked against a
//! validity window.
//!
//! Verification is a pure, synchronous computation. It never performs I/O
//! and never fails: every problem is reported through the returned
//! [`VerificationResult`].
//!
//! # Example
//!
//! ```
//! use ticket_verify::{verify, VerifyRequest, VerificationStatus};
//!
//! let request = VerifyRequest::new("ABC12345").with_text("TICKET-ABC12345");
//! let result = verify(&request);
//! assert_eq!(result.status, VerificationStatus::Valid);
//! assert_eq!(result.extracted_id, "ABC12345");
//! ```

pub mod config;
pub mod extractor;
pub mod matcher;
pub mod normalizer;
pub mod verdict;
pub mod window;

pub use config::{ConfigError, PatternSpec, VerifierConfig};
pub use extractor::{extract_identifier, Extraction};
pub use matcher::{compare_ids, ids_match, levenshtein, IdMatch};
pub use normalizer::normalize;
pub use verdict::{
    VerificationRecord, VerificationResponse, VerificationResult, VerificationStatus,
};
pub use window::within_window;

use chrono::{DateTime, Utc};
use config::CompiledPattern;
use lazy_static::lazy_static;
use serde::Deserialize;
use tracing::debug;

lazy_static! {
    static ref DEFAULT_VERIFIER: TicketVerifier = TicketVerifier::default();
}

/// A verification request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    /// Identifier as entered by the user
    pub ticket_identifier: Option<String>,
    /// Text read off the ticket. Defaults to `ticket_identifier`.
    #[serde(default)]
    pub ticket_text: Option<String>,
    /// Evaluation time. Defaults to now.
    #[serde(default)]
    pub reference_time: Option<DateTime<Utc>>,
    /// Date printed on the ticket. Defaults to the evaluation time, since
    /// no date is read off the ticket yet.
    #[serde(default)]
    pub ticket_date: Option<DateTime<Utc>>,
}

impl VerifyRequest {
    pub fn new(ticket_identifier: impl Into<String>) -> Self {
        Self {
            ticket_identifier: Some(ticket_identifier.into()),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.ticket_text = Some(text.into());
        self
    }

    pub fn at(mut self, reference_time: DateTime<Utc>) -> Self {
        self.reference_time = Some(reference_time);
        self
    }

    pub fn dated(mut self, ticket_date: DateTime<Utc>) -> Self {
        self.ticket_date = Some(ticket_date);
        self
    }

    /// The text extraction runs on
    fn source_text(&self) -> Option<&str> {
        self.ticket_text
            .as_deref()
            .or(self.ticket_identifier.as_deref())
    }
}

/// Stateless verifier holding the compiled extraction patterns.
///
/// Immutable once built, so one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct TicketVerifier {
    patterns: Vec<CompiledPattern>,
    max_edit_distance: usize,
    validity_window_days: i64,
}

impl Default for TicketVerifier {
    fn default() -> Self {
        let config = VerifierConfig::default();
        Self {
            patterns: extractor::DEFAULT_PATTERNS.clone(),
            max_edit_distance: config.max_edit_distance,
            validity_window_days: config.validity_window_days,
        }
    }
}

impl TicketVerifier {
    /// Build a verifier from a config, compiling its patterns
    pub fn from_config(config: &VerifierConfig) -> Result<Self, ConfigError> {
        if config.validity_window_days < 0 {
            return Err(ConfigError::NegativeWindow(config.validity_window_days));
        }

        Ok(Self {
            patterns: config.compile_patterns()?,
            max_edit_distance: config.max_edit_distance,
            validity_window_days: config.validity_window_days,
        })
    }

    pub fn validity_window_days(&self) -> i64 {
        self.validity_window_days
    }

    pub fn max_edit_distance(&self) -> usize {
        self.max_edit_distance
    }

    /// Extract the normalized candidate identifier from ticket text
    pub fn extract(&self, text: Option<&str>) -> String {
        extractor::extract_with(text, &self.patterns).id
    }

    /// Run a verification.
    ///
    /// The date check takes precedence over the identifier check.
    pub fn verify(&self, request: &VerifyRequest) -> VerificationResult {
        let now = request.reference_time.unwrap_or_else(Utc::now);
        let ticket_date = request.ticket_date.unwrap_or(now);

        let extraction = extractor::extract_with(request.source_text(), &self.patterns);
        debug!(
            pattern = extraction.pattern.unwrap_or("fallback"),
            "extracted ticket identifier"
        );

        let date_ok = window::within_window(ticket_date, now, self.validity_window_days);
        let id_match = matcher::compare_ids(
            &extraction.id,
            request.ticket_identifier.as_deref(),
            self.max_edit_distance,
        );

        let result = if !date_ok {
            VerificationResult::outside_window(extraction.id, self.validity_window_days)
        } else if !id_match.is_match() {
            VerificationResult::id_mismatch(extraction.id)
        } else {
            VerificationResult::verified(extraction.id)
        };

        debug!(status = %result.status, ?id_match, date_ok, "ticket verification complete");
        result
    }
}

/// Verify with the built-in configuration
pub fn verify(request: &VerifyRequest) -> VerificationResult {
    DEFAULT_VERIFIER.verify(request)
}
