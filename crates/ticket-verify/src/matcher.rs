//! Identifier matching.
//!
//! Compares an extracted identifier against the one the user typed,
//! tolerating a bounded number of transcription errors.

use crate::config::DEFAULT_MAX_EDIT_DISTANCE;
use crate::normalizer::normalize;

/// Outcome of comparing two identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdMatch {
    /// Equal after normalization
    Exact,
    /// Within the tolerated edit distance
    Fuzzy { distance: usize },
    /// Too far apart
    Mismatch { distance: usize },
    /// One side is missing or normalizes to nothing
    Missing,
}

impl IdMatch {
    pub fn is_match(&self) -> bool {
        matches!(self, IdMatch::Exact | IdMatch::Fuzzy { .. })
    }
}

/// Levenshtein distance over chars (unit-cost insert, delete, substitute)
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in table[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            table[i][j] = if a[i - 1] == b[j - 1] {
                table[i - 1][j - 1]
            } else {
                1 + table[i - 1][j - 1].min(table[i][j - 1]).min(table[i - 1][j])
            };
        }
    }

    table[a.len()][b.len()]
}

/// Compare an extracted identifier with the user-provided one.
///
/// Fails closed: a missing provided identifier, or either side normalizing
/// to an empty string, never matches.
pub fn compare_ids(extracted: &str, provided: Option<&str>, max_distance: usize) -> IdMatch {
    let provided = match provided {
        Some(p) if !p.is_empty() => normalize(p),
        _ => return IdMatch::Missing,
    };
    let extracted = normalize(extracted);

    // an empty extracted id must fail even against a symbol-only entry
    if provided.is_empty() || extracted.is_empty() {
        return IdMatch::Missing;
    }

    if extracted == provided {
        return IdMatch::Exact;
    }

    let distance = levenshtein(&extracted, &provided);
    if distance <= max_distance {
        IdMatch::Fuzzy { distance }
    } else {
        IdMatch::Mismatch { distance }
    }
}

/// Match with the default tolerance
pub fn ids_match(extracted: &str, provided: Option<&str>) -> bool {
    compare_ids(extracted, provided, DEFAULT_MAX_EDIT_DISTANCE).is_match()
}
