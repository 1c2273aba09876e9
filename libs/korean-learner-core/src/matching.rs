//! Answer grading for typed review answers.

use crate::types::{GradeOptions, Quality};
use serde::{Deserialize, Serialize};

/// Largest edit distance still accepted as a typo.
pub const TYPO_TOLERANCE: usize = 2;

/// Characters removed before comparing answers.
const STRIPPED_PUNCTUATION: [char; 5] = ['.', ',', '!', '?', '\''];

/// Which grading rule produced a quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Exact,
    Close,
    Partial,
    Wrong,
}

impl MatchTier {
    fn quality(self) -> Quality {
        match self {
            Self::Exact => Quality::PERFECT,
            Self::Close => Quality::CLOSE,
            Self::Partial => Quality::PARTIAL,
            Self::Wrong => Quality::WRONG,
        }
    }
}

/// Result of grading a typed answer against the expected answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeResult {
    pub quality: Quality,
    /// Whether the quality counts as a pass.
    pub is_correct: bool,
    pub tier: MatchTier,
    /// Edit distance between the normalized answers.
    pub distance: usize,
    /// Normalized typed answer (for display).
    pub typed_normalized: String,
    /// Normalized expected answer (for display).
    pub expected_normalized: String,
}

/// Grade a typed answer.
///
/// Rules are tried in order: exact match, edit distance within
/// [`TYPO_TOLERANCE`], containment of one answer in the other, wrong.
/// In strict mode only the first two pass and every pass scores 5.
pub fn grade(typed: &str, expected: &str, options: GradeOptions) -> GradeResult {
    let typed_normalized = normalize(typed);
    let expected_normalized = normalize(expected);
    let distance = levenshtein_distance(&typed_normalized, &expected_normalized);

    let tier = if typed_normalized == expected_normalized {
        MatchTier::Exact
    } else if distance <= TYPO_TOLERANCE {
        MatchTier::Close
    } else if !options.strict && contains_either(&typed_normalized, &expected_normalized) {
        MatchTier::Partial
    } else {
        MatchTier::Wrong
    };

    let quality = match (options.strict, tier) {
        (true, MatchTier::Exact | MatchTier::Close) => Quality::PERFECT,
        _ => tier.quality(),
    };

    GradeResult {
        quality,
        is_correct: quality.is_pass(),
        tier,
        distance,
        typed_normalized,
        expected_normalized,
    }
}

/// Normalize an answer: lowercase, drop `. , ! ? '`, collapse whitespace, trim.
pub fn normalize(s: &str) -> String {
    let stripped: String = s
        .to_lowercase()
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

// A blank answer must not earn partial credit by being a substring of everything.
fn contains_either(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}

/// Calculate Levenshtein distance between two strings, counted in chars.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Single row; `diagonal` holds the previous row's value at j - 1.
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;

        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal
            } else {
                1 + diagonal.min(above).min(row[j])
            };
            diagonal = above;
        }
    }

    row[b.len()]
}
