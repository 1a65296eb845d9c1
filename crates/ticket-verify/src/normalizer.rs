//! Identifier normalization.
//!
//! Ticket identifiers are compared in a canonical form: upper-cased, with
//! everything except ASCII letters and digits removed. Upper-casing runs
//! before the filter, so `ß` becomes `SS` and survives while other
//! non-ASCII characters are dropped.

/// Normalize an identifier to upper-case ASCII alphanumerics
pub fn normalize(text: &str) -> String {
    text.to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .collect()
}
