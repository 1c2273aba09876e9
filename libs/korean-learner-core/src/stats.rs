//! Dashboard statistics derived from a card collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::queue::{due_cards, next_due};
use crate::session::percent;
use crate::types::Card;

/// Overall progress through the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckProgress {
    NotStarted,
    InProgress,
    AllSeen,
}

/// Summary numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub due_now: usize,
    pub to_learn: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_due: Option<DateTime<Utc>>,
    pub total_cards: usize,
    /// Cards with at least one successful recall.
    pub seen_cards: usize,
    pub seen_percent: u32,
    /// Mean ease factor rounded to two places, `None` for an empty deck.
    pub average_ease: Option<f64>,
    pub progress: DeckProgress,
}

impl DashboardStats {
    pub fn compute(cards: &[Card], now: DateTime<Utc>) -> Self {
        let total_cards = cards.len();
        let seen_cards = cards.iter().filter(|c| c.state.repetitions > 0).count();

        let average_ease = if total_cards == 0 {
            None
        } else {
            let sum: f64 = cards.iter().map(|c| c.state.ease_factor).sum();
            Some((sum / total_cards as f64 * 100.0).round() / 100.0)
        };

        let progress = if total_cards > 0 && seen_cards == total_cards {
            DeckProgress::AllSeen
        } else if seen_cards > 0 {
            DeckProgress::InProgress
        } else {
            DeckProgress::NotStarted
        };

        Self {
            due_now: due_cards(cards, now).len(),
            to_learn: cards.iter().filter(|c| !c.learned).count(),
            next_due: next_due(cards),
            total_cards,
            seen_cards,
            seen_percent: percent(seen_cards, total_cards),
            average_ease,
            progress,
        }
    }
}

/// Cards missed most recently, newest first.
pub fn recent_mistakes(cards: &[Card], limit: usize) -> Vec<&Card> {
    let mut missed: Vec<&Card> = cards.iter().filter(|c| c.last_incorrect.is_some()).collect();
    missed.sort_by(|a, b| b.last_incorrect.cmp(&a.last_incorrect));
    missed.truncate(limit);
    missed
}
