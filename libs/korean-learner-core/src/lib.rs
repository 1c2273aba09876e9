//! Core library for the Korean vocabulary trainer.
//!
//! Provides:
//! - Answer grading for typed answers (normalization, Levenshtein distance)
//! - SM-2 spaced repetition scheduling
//! - Due-set queries and review forecasts
//! - Review sessions with a retry queue
//! - Dashboard statistics and the seed deck
//! - Shared types (Card, CardState, Quality, etc.)

pub mod algorithm;
pub mod clock;
pub mod error;
pub mod matching;
pub mod queue;
pub mod seed;
pub mod session;
pub mod stats;
pub mod types;

pub use algorithm::{get_algorithm, schedule, SchedulingResult, SpacedRepetitionAlgorithm};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CoreError, Result, SeedError};
pub use matching::{grade, levenshtein_distance, normalize, GradeResult, MatchTier};
pub use queue::{
    cards_to_learn, due_cards, forecast_by_day, forecast_by_hour, mark_learned, next_due, DayForecast,
    HourForecast,
};
pub use seed::{builtin_deck, parse_seed};
pub use session::{RetryQueue, ReviewSession, SessionProgress, SessionSummary};
pub use stats::{recent_mistakes, DashboardStats, DeckProgress};
pub use types::{Card, CardState, GradeOptions, Quality, ReviewOutcome};
