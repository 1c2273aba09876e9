pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use korean_learner_core::{builtin_deck, parse_seed, Card, Clock, SystemClock};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, StudySettings};
use crate::db::{CardStore, SqliteCardStore};
use crate::services::auth::{AuthProvider, StaticTokenAuth};
use crate::services::cards::CollectionLocks;
use crate::services::sessions::SessionRegistry;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CardStore>,
    pub auth: Arc<dyn AuthProvider>,
    pub clock: Arc<dyn Clock>,
    /// Deck handed to users with no stored collection.
    pub seed: Arc<Vec<Card>>,
    pub settings: StudySettings,
    pub sessions: Arc<SessionRegistry>,
    /// Serializes read-modify-write of each user's collection.
    pub locks: Arc<CollectionLocks>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn CardStore>,
        auth: Arc<dyn AuthProvider>,
        clock: Arc<dyn Clock>,
        seed: Vec<Card>,
        settings: StudySettings,
    ) -> Self {
        Self {
            store,
            auth,
            clock,
            seed: Arc::new(seed),
            settings,
            sessions: Arc::new(SessionRegistry::new()),
            locks: Arc::new(CollectionLocks::new()),
        }
    }
}

/// Build the router with all routes.
pub fn router(state: AppState) -> Router {
    let protected_routes = Router::new()
        // Collection routes
        .route("/api/cards", get(routes::cards::list).delete(routes::cards::reset))
        .route("/api/mistakes", get(routes::cards::mistakes))
        // Learn routes
        .route("/api/learn", get(routes::learn::batch))
        .route("/api/learn/:id", post(routes::learn::mark))
        // Study routes
        .route("/api/study/queue", get(routes::study::queue))
        .route("/api/study/grade", post(routes::study::grade_answer))
        .route("/api/study/review", post(routes::study::review))
        // Session routes
        .route("/api/sessions", post(routes::sessions::start))
        .route("/api/sessions/:id", get(routes::sessions::status))
        .route("/api/sessions/:id/answer", post(routes::sessions::answer))
        .route("/api/session-history", get(routes::sessions::history))
        // Stats routes
        .route("/api/stats", get(routes::stats::dashboard))
        .route("/api/stats/forecast/hourly", get(routes::stats::hourly))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn load_seed(config: &Config) -> anyhow::Result<Vec<Card>> {
    match &config.seed_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading seed file {}", path.display()))?;
            Ok(parse_seed(&content)?)
        }
        None => Ok(builtin_deck()),
    }
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    tracing::info!("Opening database at {}", config.database_path.display());
    let store = SqliteCardStore::open(&config.database_path)?;

    let seed = load_seed(&config)?;
    tracing::info!("Loaded seed deck with {} cards", seed.len());

    let state = AppState::new(
        Arc::new(store),
        Arc::new(StaticTokenAuth::new(config.auth_tokens.clone())),
        Arc::new(SystemClock),
        seed,
        config.study,
    );

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
