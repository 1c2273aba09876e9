//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wiring the router to an in-memory store and a fixed clock
//! - Authentication helpers

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};

use korean_learner_backend::config::StudySettings;
use korean_learner_backend::db::{CardStore, MemoryCardStore, UserKey};
use korean_learner_backend::services::auth::StaticTokenAuth;
use korean_learner_backend::{router, AppState};
use korean_learner_core::{Card, FixedClock};

pub const MINJI_TOKEN: &str = "minji-token";
pub const MINJI_EMAIL: &str = "minji@example.com";
pub const JUN_TOKEN: &str = "jun-token";
pub const JUN_EMAIL: &str = "jun@example.com";

/// Instant every test clock starts at.
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 2, 7, 30, 0).unwrap()
}

/// Test context containing the store, clock and test server.
pub struct TestContext {
    pub store: Arc<MemoryCardStore>,
    pub clock: Arc<FixedClock>,
    pub server: TestServer,
}

impl TestContext {
    /// Create a context over the given seed deck with default settings.
    pub fn new(seed: Vec<Card>) -> Self {
        Self::with_settings(seed, StudySettings::default())
    }

    pub fn with_settings(seed: Vec<Card>, settings: StudySettings) -> Self {
        let store = Arc::new(MemoryCardStore::new());
        let clock = Arc::new(FixedClock::new(start_time()));
        let auth = StaticTokenAuth::new([(MINJI_TOKEN, MINJI_EMAIL), (JUN_TOKEN, JUN_EMAIL)]);

        let state = AppState::new(store.clone(), Arc::new(auth), clock.clone(), seed, settings);
        let server = TestServer::new(router(state)).expect("Failed to build test server");

        Self {
            store,
            clock,
            server,
        }
    }

    /// Stored collection for a user, if any.
    pub fn stored_cards(&self, email: &str) -> Option<Vec<Card>> {
        self.store
            .load(&UserKey::for_email(email))
            .expect("Failed to load collection")
    }

    /// Store a collection for a user directly.
    pub fn store_cards(&self, email: &str, cards: &[Card]) {
        self.store
            .save(&UserKey::for_email(email), cards)
            .expect("Failed to save collection");
    }

    /// Format authorization header value.
    pub fn auth_header_value(token: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", token)).expect("Invalid token")
    }
}
