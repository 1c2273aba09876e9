//! In-memory registry of review sessions and their summaries.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use korean_learner_core::{ReviewSession, SessionSummary};
use uuid::Uuid;

use crate::db::UserKey;

/// Summaries kept per user.
pub const HISTORY_LIMIT: usize = 50;

struct ActiveSession {
    owner: UserKey,
    session: ReviewSession,
}

/// One open session per user, plus the summaries of finished ones.
#[derive(Default)]
pub struct SessionRegistry {
    active: Mutex<HashMap<Uuid, ActiveSession>>,
    history: Mutex<HashMap<UserKey, Vec<SessionSummary>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `session` for `owner`, replacing any session they left open.
    pub fn open(&self, owner: &UserKey, session: ReviewSession) -> Uuid {
        let id = Uuid::new_v4();
        let mut active = lock(&self.active);
        active.retain(|_, entry| &entry.owner != owner);
        active.insert(
            id,
            ActiveSession {
                owner: owner.clone(),
                session,
            },
        );
        id
    }

    /// Copy of the session, if it exists and belongs to `owner`.
    pub fn snapshot(&self, id: Uuid, owner: &UserKey) -> Option<ReviewSession> {
        lock(&self.active)
            .get(&id)
            .filter(|entry| &entry.owner == owner)
            .map(|entry| entry.session.clone())
    }

    /// Replace the stored session with an updated copy.
    ///
    /// Returns `false` if the session was discarded or belongs to someone else.
    pub fn commit(&self, id: Uuid, owner: &UserKey, session: ReviewSession) -> bool {
        match lock(&self.active).get_mut(&id) {
            Some(entry) if &entry.owner == owner => {
                entry.session = session;
                true
            }
            _ => false,
        }
    }

    pub fn record(&self, owner: &UserKey, summary: SessionSummary) {
        let mut history = lock(&self.history);
        let summaries = history.entry(owner.clone()).or_default();
        summaries.insert(0, summary);
        summaries.truncate(HISTORY_LIMIT);
    }

    /// Past summaries, newest first.
    pub fn history(&self, owner: &UserKey) -> Vec<SessionSummary> {
        lock(&self.history).get(owner).cloned().unwrap_or_default()
    }
}
