//! Review sessions over a user's due cards.
//!
//! A [`ReviewSession`] is a plain value: it owns the collection it updates
//! and every operation goes through `&mut self`. Callers that need to
//! persist before committing can clone, submit on the clone, save
//! `cards()`, and then keep the clone.

use std::collections::{BTreeSet, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::algorithm::sm2::Sm2;
use crate::algorithm::SpacedRepetitionAlgorithm;
use crate::error::{CoreError, Result};
use crate::matching::grade;
use crate::queue::due_cards;
use crate::types::{Card, GradeOptions, ReviewOutcome};

/// FIFO of missed card ids. Pushing an id that is already queued is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetryQueue {
    ids: VecDeque<i64>,
}

impl RetryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `id` to the tail. Returns false if it was already queued.
    pub fn push(&mut self, id: i64) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push_back(id);
        true
    }

    pub fn pop(&mut self) -> Option<i64> {
        self.ids.pop_front()
    }

    pub fn front(&self) -> Option<i64> {
        self.ids.front().copied()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// How far through the session the user is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProgress {
    /// Distinct cards answered correctly so far.
    pub reviewed: usize,
    pub total: usize,
    pub percent: u32,
}

/// End-of-session tally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub timestamp: DateTime<Utc>,
    /// Graded attempts, retries included.
    pub total: usize,
    pub correct: usize,
    pub accuracy: u32,
    pub wrong_cards: Vec<ReviewOutcome>,
}

/// State of one review session.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    cards: Vec<Card>,
    queue: VecDeque<i64>,
    retry: RetryQueue,
    options: GradeOptions,
    algorithm: Sm2,
    total_to_review: usize,
    completed: BTreeSet<i64>,
    outcomes: Vec<ReviewOutcome>,
    started_at: DateTime<Utc>,
}

impl ReviewSession {
    /// Start a session over the cards due at `now`.
    pub fn start(cards: Vec<Card>, now: DateTime<Utc>, options: GradeOptions) -> Self {
        Self::with_algorithm(cards, now, options, Sm2::default())
    }

    pub fn with_algorithm(cards: Vec<Card>, now: DateTime<Utc>, options: GradeOptions, algorithm: Sm2) -> Self {
        let queue: VecDeque<i64> = due_cards(&cards, now).iter().map(|c| c.id).collect();
        Self {
            total_to_review: queue.len(),
            cards,
            queue,
            retry: RetryQueue::new(),
            options,
            algorithm,
            completed: BTreeSet::new(),
            outcomes: Vec::new(),
            started_at: now,
        }
    }

    /// Card awaiting an answer: the main queue first, then retries.
    pub fn current(&self) -> Option<&Card> {
        self.current_id().and_then(|id| self.card(id))
    }

    /// Id of the card awaiting an answer.
    pub fn current_id(&self) -> Option<i64> {
        self.queue.front().copied().or_else(|| self.retry.front())
    }

    fn advance(&mut self) {
        if self.queue.pop_front().is_none() {
            self.retry.pop();
        }
    }

    /// Grade `answer` against the current card and reschedule it.
    ///
    /// A miss sends the card to the back of the retry queue.
    pub fn submit(&mut self, answer: &str, now: DateTime<Utc>) -> Result<ReviewOutcome> {
        let id = self.current_id().ok_or(CoreError::SessionFinished)?;
        let index = self
            .cards
            .iter()
            .position(|c| c.id == id)
            .ok_or(CoreError::CardNotFound(id))?;

        let card = &self.cards[index];
        let graded = grade(answer, &card.back, self.options);
        let result = self.algorithm.schedule(&card.state, graded.quality, now);
        let updated = card.apply_review(&result, graded.quality, now);

        let outcome = ReviewOutcome {
            card_id: id,
            front: card.front.clone(),
            quality: graded.quality,
            is_correct: graded.is_correct,
            user_answer: graded.typed_normalized,
            correct_answer: card.back.clone(),
            reviewed_at: now,
        };

        self.cards[index] = updated;
        self.advance();
        if outcome.is_correct {
            self.completed.insert(id);
        } else {
            self.retry.push(id);
        }
        self.outcomes.push(outcome.clone());

        Ok(outcome)
    }

    pub fn is_finished(&self) -> bool {
        self.current_id().is_none()
    }

    pub fn card(&self, id: i64) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Replace the session's copy of a card with a newer stored version.
    ///
    /// Returns `false` if the card is not part of this session's collection.
    pub fn refresh_card(&mut self, card: Card) -> bool {
        match self.cards.iter_mut().find(|c| c.id == card.id) {
            Some(slot) => {
                *slot = card;
                true
            }
            None => false,
        }
    }

    /// Collection with every update applied so far.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }

    pub fn outcomes(&self) -> &[ReviewOutcome] {
        &self.outcomes
    }

    pub fn total_to_review(&self) -> usize {
        self.total_to_review
    }

    /// Cards still waiting in either queue.
    pub fn remaining(&self) -> usize {
        self.queue.len() + self.retry.len()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn options(&self) -> GradeOptions {
        self.options
    }

    pub fn progress(&self) -> SessionProgress {
        let reviewed = self.completed.len();
        SessionProgress {
            reviewed,
            total: self.total_to_review,
            percent: percent(reviewed, self.total_to_review),
        }
    }

    pub fn summary(&self, now: DateTime<Utc>) -> SessionSummary {
        let correct = self.outcomes.iter().filter(|o| o.is_correct).count();
        SessionSummary {
            timestamp: now,
            total: self.outcomes.len(),
            correct,
            accuracy: percent(correct, self.outcomes.len()),
            wrong_cards: self
                .outcomes
                .iter()
                .filter(|o| !o.is_correct)
                .cloned()
                .collect(),
        }
    }
}

pub(crate) fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 * 100.0 / whole as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Quality;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap()
    }

    fn due(id: i64, front: &str, back: &str) -> Card {
        let mut card = Card::new(id, front, back);
        card.learned = true;
        card.next_review = Some(now() - Duration::minutes(5));
        card
    }

    fn deck() -> Vec<Card> {
        vec![
            due(1, "안녕하세요", "hello"),
            due(2, "감사합니다", "thank you"),
            due(3, "물", "water"),
        ]
    }

    #[test]
    fn retry_queue_dedupes_and_keeps_order() {
        let mut queue = RetryQueue::new();
        assert!(queue.push(3));
        assert!(queue.push(1));
        assert!(!queue.push(3));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop(), Some(3));
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn session_queues_only_due_cards() {
        let mut cards = deck();
        cards[1].next_review = Some(now() + Duration::days(2));
        cards.push(Card::new(4, "책", "book"));

        let session = ReviewSession::start(cards, now(), GradeOptions::default());
        assert_eq!(session.total_to_review(), 2);
        assert_eq!(session.current().map(|c| c.id), Some(1));
    }

    #[test]
    fn empty_session_is_finished() {
        let mut session = ReviewSession::start(vec![], now(), GradeOptions::default());
        assert!(session.is_finished());
        assert!(session.current().is_none());
        assert_eq!(session.submit("anything", now()), Err(CoreError::SessionFinished));
        assert_eq!(session.progress().percent, 0);
        assert_eq!(session.summary(now()).accuracy, 0);
    }

    #[test]
    fn missed_card_returns_after_main_queue() {
        let mut session = ReviewSession::start(deck(), now(), GradeOptions::strict());

        let first = session.submit("goodbye", now()).unwrap();
        assert!(!first.is_correct);
        assert_eq!(first.quality, Quality::WRONG);

        assert_eq!(session.current().map(|c| c.id), Some(2));
        session.submit("thank you", now()).unwrap();
        assert_eq!(session.current().map(|c| c.id), Some(3));
        session.submit("water", now()).unwrap();

        // Card 1 comes back from the retry queue.
        assert_eq!(session.current().map(|c| c.id), Some(1));
        assert_eq!(session.remaining(), 1);
        let retry = session.submit("hello", now()).unwrap();
        assert!(retry.is_correct);
        assert!(session.is_finished());
    }

    #[test]
    fn retry_uses_latest_card_state() {
        let mut session = ReviewSession::start(deck(), now(), GradeOptions::strict());
        session.submit("nope", now()).unwrap();
        let after_miss = session.card(1).unwrap().clone();
        assert_eq!(after_miss.state.repetitions, 0);
        assert_eq!(after_miss.state.interval, 1);
        assert_eq!(after_miss.last_incorrect, Some(now()));

        session.submit("thank you", now()).unwrap();
        session.submit("water", now()).unwrap();
        let later = now() + Duration::minutes(2);
        session.submit("hello", later).unwrap();

        let card = session.card(1).unwrap();
        assert_eq!(card.state.repetitions, 1);
        assert_eq!(card.next_review, Some(later + Duration::days(1)));
        assert_eq!(card.last_incorrect, Some(now()));
    }

    #[test]
    fn summary_counts_every_attempt() {
        let mut session = ReviewSession::start(deck(), now(), GradeOptions::strict());
        session.submit("helo", now()).unwrap();
        session.submit("no idea", now()).unwrap();
        session.submit("water", now()).unwrap();
        session.submit("thanks you", now()).unwrap();

        let summary = session.summary(now());
        assert_eq!(summary.total, 4);
        assert_eq!(summary.correct, 3);
        assert_eq!(summary.accuracy, 75);
        assert_eq!(summary.wrong_cards.len(), 1);
        assert_eq!(summary.wrong_cards[0].front, "감사합니다");
        assert_eq!(summary.wrong_cards[0].user_answer, "no idea");
        assert_eq!(summary.wrong_cards[0].correct_answer, "thank you");

        let progress = session.progress();
        assert_eq!(progress.reviewed, 3);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.percent, 100);
    }

    #[test]
    fn clone_is_independent() {
        let session = ReviewSession::start(deck(), now(), GradeOptions::default());
        let mut attempt = session.clone();
        attempt.submit("hello", now()).unwrap();

        assert_eq!(session.current().map(|c| c.id), Some(1));
        assert_eq!(session.card(1).unwrap().state.repetitions, 0);
        assert_eq!(attempt.card(1).unwrap().state.repetitions, 1);
    }

    #[test]
    fn refreshed_card_is_graded_from_new_state() {
        let mut session = ReviewSession::start(deck(), now(), GradeOptions::default());
        let mut newer = session.card(1).unwrap().clone();
        newer.state.repetitions = 2;
        newer.state.interval = 6;

        assert!(session.refresh_card(newer));
        session.submit("hello", now()).unwrap();

        let card = session.card(1).unwrap();
        assert_eq!(card.state.repetitions, 3);
        assert!(card.state.interval > 6);
        assert!(!session.refresh_card(Card::new(99, "없음", "none")));
    }
}
