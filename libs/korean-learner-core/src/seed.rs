//! Seed vocabulary content.
//!
//! # Format
//! ```json
//! [
//!   { "id": 1, "front": "안녕하세요", "back": "hello" },
//!   { "id": 2, "front": "감사합니다", "back": "thank you" }
//! ]
//! ```

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::SeedError;
use crate::types::Card;

const BUILTIN_DECK: &str = include_str!("../data/seed_cards.json");

#[derive(Debug, Deserialize)]
struct SeedEntry {
    id: i64,
    front: String,
    back: String,
}

/// Parse seed content into cards with default scheduling state.
pub fn parse_seed(content: &str) -> Result<Vec<Card>, SeedError> {
    let entries: Vec<SeedEntry> = serde_json::from_str(content)?;
    let mut seen_ids = HashSet::with_capacity(entries.len());
    let mut cards = Vec::with_capacity(entries.len());

    for (position, entry) in entries.into_iter().enumerate() {
        if !seen_ids.insert(entry.id) {
            return Err(SeedError::DuplicateId {
                id: entry.id,
                position,
            });
        }

        let front = entry.front.trim();
        if front.is_empty() {
            return Err(SeedError::MissingFront { id: entry.id });
        }
        let back = entry.back.trim();
        if back.is_empty() {
            return Err(SeedError::MissingBack { id: entry.id });
        }

        cards.push(Card::new(entry.id, front, back));
    }

    Ok(cards)
}

/// The bundled Korean starter deck.
pub fn builtin_deck() -> Vec<Card> {
    // Checked by `builtin_deck_parses`.
    parse_seed(BUILTIN_DECK).unwrap_or_default()
}
