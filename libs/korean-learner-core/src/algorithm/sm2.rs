//! SM-2 spaced repetition algorithm.
//!
//! Based on SuperMemo 2 with configurable parameters.

use super::{SchedulingResult, SpacedRepetitionAlgorithm};
use crate::types::{CardState, Quality, DEFAULT_EASE, MIN_EASE};
use chrono::{DateTime, Duration, Utc};

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    /// Interval after the first successful recall.
    pub first_interval: u32,
    /// Interval after the second successful recall.
    pub second_interval: u32,
    /// Interval after a lapse.
    pub lapse_interval: u32,
    /// Upper bound on any interval, in days.
    pub maximum_interval: u32,
}

/// Default interval cap: roughly a hundred years.
pub const DEFAULT_MAXIMUM_INTERVAL: u32 = 36_500;

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: DEFAULT_EASE,
            minimum_ease: MIN_EASE,
            first_interval: 1,
            second_interval: 6,
            lapse_interval: 1,
            maximum_interval: DEFAULT_MAXIMUM_INTERVAL,
        }
    }
}

impl SpacedRepetitionAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn initial_state(&self) -> CardState {
        CardState {
            repetitions: 0,
            interval: 0,
            ease_factor: self.initial_ease,
        }
    }

    fn schedule(&self, state: &CardState, quality: Quality, now: DateTime<Utc>) -> SchedulingResult {
        let new_state = if quality.is_lapse() {
            // Lapse: start over, ease is left alone
            CardState {
                repetitions: 0,
                interval: self.lapse_interval,
                ease_factor: state.ease_factor,
            }
        } else {
            let ease_factor = (state.ease_factor + ease_delta(quality)).max(self.minimum_ease);
            let repetitions = state.repetitions + 1;
            let interval = match repetitions {
                1 => self.first_interval,
                2 => self.second_interval,
                _ => {
                    let grown = (f64::from(state.interval) * ease_factor).round();
                    grown.min(f64::from(self.maximum_interval)).max(1.0) as u32
                }
            };
            CardState {
                repetitions,
                interval: interval.min(self.maximum_interval),
                ease_factor,
            }
        };

        let next_due = now
            .checked_add_signed(Duration::days(i64::from(new_state.interval)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        SchedulingResult { new_state, next_due }
    }
}

/// Ease adjustment for a passing grade: +0.1 at 5, 0 at 4, -0.14 at 3.
pub fn ease_delta(quality: Quality) -> f64 {
    let miss = f64::from(5 - quality.value());
    0.1 - miss * (0.08 + miss * 0.02)
}
