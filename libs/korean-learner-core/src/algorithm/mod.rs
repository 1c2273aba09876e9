//! Spaced repetition scheduling.

pub mod sm2;

use crate::error::Result;
use crate::types::{Card, CardState, Quality};
use chrono::{DateTime, Utc};

/// Result of scheduling a card after review.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulingResult {
    pub new_state: CardState,
    pub next_due: DateTime<Utc>,
}

/// Trait for spaced repetition algorithms.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Calculate next review state after a graded review.
    fn schedule(&self, state: &CardState, quality: Quality, now: DateTime<Utc>) -> SchedulingResult;

    /// Initial state for a new card.
    fn initial_state(&self) -> CardState;
}

/// Get algorithm by name.
pub fn get_algorithm(name: &str) -> Option<Box<dyn SpacedRepetitionAlgorithm>> {
    match name {
        "sm2" => Some(Box::new(sm2::Sm2::default())),
        _ => None,
    }
}

/// Schedule a raw 0-5 quality with the default SM-2 parameters.
///
/// Fails with `InvalidArgument` when `quality` is outside 0-5.
pub fn schedule(state: &CardState, quality: u8, now: DateTime<Utc>) -> Result<SchedulingResult> {
    let quality = Quality::new(quality)?;
    Ok(sm2::Sm2::default().schedule(state, quality, now))
}

impl Card {
    /// Copy of this card with a scheduling result applied.
    ///
    /// A lapse also stamps `last_incorrect` with `now`.
    pub fn apply_review(&self, result: &SchedulingResult, quality: Quality, now: DateTime<Utc>) -> Card {
        Card {
            state: result.new_state,
            next_review: Some(result.next_due),
            last_incorrect: if quality.is_lapse() {
                Some(now)
            } else {
                self.last_incorrect
            },
            ..self.clone()
        }
    }
}
