//! Learn endpoints

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use korean_learner_core::{cards_to_learn, mark_learned, Clock};

use crate::error::Result;
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::services::cards::{load_collection, save_collection};
use crate::AppState;

/// GET /api/learn
pub async fn batch(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<LearnBatchResponse>> {
    let cards = load_collection(&state.store, &auth.key, &state.seed).await?;
    let remaining = cards.iter().filter(|c| !c.learned).count();
    let batch = cards_to_learn(&cards, state.settings.learn_batch_size)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(LearnBatchResponse {
        cards: batch,
        remaining,
    }))
}

/// POST /api/learn/:id
pub async fn mark(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<Card>> {
    let _guard = state.locks.lock(&auth.key).await;
    let mut cards = load_collection(&state.store, &auth.key, &state.seed).await?;
    let card = mark_learned(&mut cards, id, state.clock.now())?.clone();
    save_collection(&state.store, &auth.key, cards).await?;
    Ok(Json(card))
}
