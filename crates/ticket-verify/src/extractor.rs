//! Ticket identifier extraction.
//!
//! Stands in for OCR: the ticket text is scanned with an ordered list of
//! patterns and the first capture wins. When nothing matches, the whole
//! text is normalized instead.

use crate::config::{CompiledPattern, VerifierConfig};
use crate::normalizer::normalize;
use lazy_static::lazy_static;

lazy_static! {
    /// Built-in patterns: `TICKET <run>`, `ID <run>`, then a bare 8-12 char run
    pub(crate) static ref DEFAULT_PATTERNS: Vec<CompiledPattern> = VerifierConfig::default()
        .compile_patterns()
        .expect("built-in ticket patterns compile");
}

/// An extracted identifier and the pattern that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction<'p> {
    pub id: String,
    /// `None` when the identifier came from fallback normalization
    pub pattern: Option<&'p str>,
}

impl Extraction<'_> {
    fn empty() -> Self {
        Extraction {
            id: String::new(),
            pattern: None,
        }
    }
}

/// Extract an identifier with the built-in patterns
pub fn extract_identifier(text: Option<&str>) -> String {
    extract_with(text, &DEFAULT_PATTERNS).id
}

/// Extract an identifier using the given patterns, in order
pub fn extract_with<'p>(text: Option<&str>, patterns: &'p [CompiledPattern]) -> Extraction<'p> {
    let text = match text {
        Some(t) if !t.is_empty() => t,
        _ => return Extraction::empty(),
    };

    for pattern in patterns {
        let capture = pattern
            .regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty());

        if let Some(id) = capture {
            return Extraction {
                id: id.to_uppercase(),
                pattern: Some(pattern.name.as_str()),
            };
        }
    }

    Extraction {
        id: normalize(text),
        pattern: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PatternSpec;

    #[test]
    fn test_ticket_label() {
        assert_eq!(extract_identifier(Some("TICKET-ABC12345")), "ABC12345");
        assert_eq!(extract_identifier(Some("ticket: abc123")), "ABC123");
        assert_eq!(extract_identifier(Some("Ticket   Q1W2E3R4")), "Q1W2E3R4");
    }

    #[test]
    fn test_ticket_label_wins_over_id_label() {
        assert_eq!(
            extract_identifier(Some("TICKET: ABCDEF12 ID: ZZZZZZZZ")),
            "ABCDEF12"
        );
        assert_eq!(
            extract_identifier(Some("ID: ZZZZZZZZ TICKET: ABCDEF12")),
            "ABCDEF12"
        );
    }

    #[test]
    fn test_id_label() {
        let extraction = extract_with(Some("Order id: qwe98765"), &DEFAULT_PATTERNS);
        assert_eq!(extraction.id, "QWE98765");
        assert_eq!(extraction.pattern, Some("id_label"));
    }

    #[test]
    fn test_bare_run() {
        let extraction = extract_with(Some("seat 14 row C 7HGT5521K"), &DEFAULT_PATTERNS);
        assert_eq!(extraction.id, "7HGT5521K");
        assert_eq!(extraction.pattern, Some("bare_run"));
    }

    #[test]
    fn test_run_longer_than_twelve_is_not_bare() {
        // no word boundary inside a 13 char run
        let extraction = extract_with(Some("ABCDEFGHJKLMN"), &DEFAULT_PATTERNS);
        assert_eq!(extraction.pattern, None);
        assert_eq!(extraction.id, "ABCDEFGHJKLMN");
    }

    #[test]
    fn test_bare_run_ends_at_non_ascii_letter() {
        let extraction = extract_with(Some("ABCDEFGHé 1"), &DEFAULT_PATTERNS);
        assert_eq!(extraction.id, "ABCDEFGH");
        assert_eq!(extraction.pattern, Some("bare_run"));
    }

    #[test]
    fn test_label_does_not_fold_non_ascii() {
        // U+212A KELVIN SIGN is not a `K`
        let extraction = extract_with(Some("TIC\u{212A}ET abc123"), &DEFAULT_PATTERNS);
        assert_eq!(extraction.pattern, None);
        assert_eq!(extraction.id, "TICETABC123");
        assert_eq!(extract_identifier(Some("tic\u{212A}et: abc123")), "TICETABC123");
    }

    #[test]
    fn test_fallback_normalization() {
        let extraction = extract_with(Some("no-patterns-here!!"), &DEFAULT_PATTERNS);
        assert_eq!(extraction.id, "NOPATTERNSHERE");
        assert_eq!(extraction.pattern, None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_identifier(None), "");
        assert_eq!(extract_identifier(Some("")), "");
        assert_eq!(extract_identifier(Some("?!")), "");
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let text = "Cinema 5 - ticket #AB12CD34 - 19:30";
        assert_eq!(extract_identifier(Some(text)), extract_identifier(Some(text)));
    }

    #[test]
    fn test_empty_pattern_list_falls_back() {
        let extraction = extract_with(Some("TICKET-ABC12345"), &[]);
        assert_eq!(extraction.id, "TICKETABC12345");
    }

    #[test]
    fn test_custom_patterns_in_order() {
        let patterns = VerifierConfig {
            patterns: vec![
                PatternSpec::new("booking", r"BOOKING#([0-9]{6})"),
                PatternSpec::new("ticket", r"(?i-u:TICKET)[:\s-]*([A-Za-z0-9]{6,12})"),
            ],
            ..VerifierConfig::default()
        }
        .compile_patterns()
        .unwrap();

        let extraction = extract_with(Some("TICKET ABCDEF BOOKING#654321"), &patterns);
        assert_eq!(extraction.id, "654321");
        assert_eq!(extraction.pattern, Some("booking"));
    }
}
