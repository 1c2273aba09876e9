//! API request and response types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export shared types from korean-learner-core
pub use korean_learner_core::{
    Card, DashboardStats, DayForecast, GradeResult, HourForecast, ReviewOutcome, ReviewSession,
    SessionProgress, SessionSummary,
};

/// Default page size for the mistakes view.
pub const DEFAULT_MISTAKES_LIMIT: usize = 10;

// === Learn ===

#[derive(Debug, Serialize, Deserialize)]
pub struct LearnBatchResponse {
    pub cards: Vec<Card>,
    /// Unlearned cards left in the collection, batch included.
    pub remaining: usize,
}

// === Study ===

#[derive(Debug, Serialize, Deserialize)]
pub struct StudyQueueResponse {
    pub cards: Vec<Card>,
    pub next_due: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GradeRequest {
    pub card_id: i64,
    pub answer: String,
    /// Overrides the server's grading mode.
    pub strict: Option<bool>,
}

/// Review one card, either by typed answer or by self-assessed quality.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub card_id: i64,
    pub answer: Option<String>,
    pub quality: Option<u8>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub card: Card,
    pub quality: u8,
    pub is_correct: bool,
    /// Present when an answer was graded.
    pub grade: Option<GradeResult>,
}

// === Sessions ===

/// Prompt side of the card being asked.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionCard {
    pub id: i64,
    pub front: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub current: Option<SessionCard>,
    pub progress: SessionProgress,
    pub remaining: usize,
    pub finished: bool,
}

impl SessionResponse {
    pub fn new(id: Uuid, session: &ReviewSession) -> Self {
        Self {
            id,
            current: session.current().map(|card| SessionCard {
                id: card.id,
                front: card.front.clone(),
            }),
            progress: session.progress(),
            remaining: session.remaining(),
            finished: session.is_finished(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub outcome: ReviewOutcome,
    pub session: SessionResponse,
    /// Set once the last card has been answered correctly.
    pub summary: Option<SessionSummary>,
}

// === Stats ===

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: DashboardStats,
    pub forecast: Vec<DayForecast>,
}

#[derive(Debug, Deserialize)]
pub struct HourlyForecastQuery {
    /// Defaults to today.
    pub date: Option<NaiveDate>,
    /// Offset of the viewer's time zone from UTC.
    pub offset_minutes: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HourlyForecastResponse {
    pub date: NaiveDate,
    pub hours: Vec<HourForecast>,
}

#[derive(Debug, Deserialize)]
pub struct MistakesQuery {
    pub limit: Option<usize>,
}
