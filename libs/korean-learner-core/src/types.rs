//! Core types for the vocabulary trainer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Default ease factor for a card that has never been reviewed.
pub const DEFAULT_EASE: f64 = 2.5;

/// Ease factor floor.
pub const MIN_EASE: f64 = 1.3;

/// Recall quality on the 0-5 scale. Values of 3 and above count as a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quality(u8);

impl Quality {
    /// Exact match.
    pub const PERFECT: Self = Self(5);
    /// Within typo tolerance.
    pub const CLOSE: Self = Self(4);
    /// One answer contains the other.
    pub const PARTIAL: Self = Self(3);
    /// Wrong answer.
    pub const WRONG: Self = Self(1);

    /// Lowest quality that still counts as a successful recall.
    pub const PASS_THRESHOLD: u8 = 3;

    /// Create a quality score, rejecting values outside 0-5.
    pub fn new(value: u8) -> Result<Self, CoreError> {
        if value > 5 {
            return Err(CoreError::InvalidArgument(format!(
                "quality must be between 0 and 5, got {}",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether this grade counts as a successful recall.
    pub fn is_pass(self) -> bool {
        self.0 >= Self::PASS_THRESHOLD
    }

    /// Whether this grade is a lapse.
    pub fn is_lapse(self) -> bool {
        !self.is_pass()
    }
}

impl TryFrom<u8> for Quality {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> Self {
        quality.0
    }
}

/// Scheduling state carried between reviews.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardState {
    /// Consecutive successful recalls since the last lapse.
    pub repetitions: u32,
    /// Days until the next review. Zero before the first review.
    pub interval: u32,
    pub ease_factor: f64,
}

impl Default for CardState {
    fn default() -> Self {
        Self {
            repetitions: 0,
            interval: 0,
            ease_factor: DEFAULT_EASE,
        }
    }
}

/// A vocabulary card under spaced repetition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    /// Korean prompt.
    pub front: String,
    /// Expected English answer.
    pub back: String,
    #[serde(default)]
    pub learned: bool,
    #[serde(flatten)]
    pub state: CardState,
    /// `None` until the card has been learned.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub next_review: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_incorrect: Option<DateTime<Utc>>,
}

impl Card {
    /// Create a freshly seeded card with default scheduling state.
    pub fn new(id: i64, front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            id,
            front: front.into(),
            back: back.into(),
            learned: false,
            state: CardState::default(),
            next_review: None,
            last_incorrect: None,
        }
    }

    /// Whether the card is eligible for review at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.learned && self.next_review.map_or(true, |due| due <= now)
    }
}

/// Options for the answer grader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeOptions {
    /// Collapse the four quality tiers to pass (5) or fail (1).
    #[serde(default)]
    pub strict: bool,
}

impl GradeOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Result of grading one review attempt. Not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub card_id: i64,
    pub front: String,
    pub quality: Quality,
    pub is_correct: bool,
    /// Normalized user answer.
    pub user_answer: String,
    /// Expected answer as stored on the card.
    pub correct_answer: String,
    pub reviewed_at: DateTime<Utc>,
}
