//! Test fixtures and factory functions for creating test data.

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use korean_learner_core::Card;

/// Small unlearned deck.
pub fn sample_deck() -> Vec<Card> {
    vec![
        Card::new(1, "안녕하세요", "hello"),
        Card::new(2, "감사합니다", "thank you"),
        Card::new(3, "물", "water"),
    ]
}

/// Card already learned and due at `due`.
pub fn learned_card(id: i64, front: &str, back: &str, due: DateTime<Utc>) -> Card {
    let mut card = Card::new(id, front, back);
    card.learned = true;
    card.next_review = Some(due);
    card
}

/// Three learned cards due at now-1s, now+1s and now+5s.
pub fn staggered_deck(now: DateTime<Utc>) -> Vec<Card> {
    vec![
        learned_card(1, "안녕하세요", "hello", now - Duration::milliseconds(1000)),
        learned_card(2, "감사합니다", "thank you", now + Duration::milliseconds(1000)),
        learned_card(3, "물", "water", now + Duration::milliseconds(5000)),
    ]
}

/// Create a typed-answer review request body.
pub fn answer_review_request(card_id: i64, answer: &str) -> serde_json::Value {
    json!({ "card_id": card_id, "answer": answer })
}

/// Create a self-assessed review request body.
pub fn quality_review_request(card_id: i64, quality: u8) -> serde_json::Value {
    json!({ "card_id": card_id, "quality": quality })
}

/// Create a session answer request body.
pub fn answer_request(answer: &str) -> serde_json::Value {
    json!({ "answer": answer })
}
