//! Collection endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use korean_learner_core::recent_mistakes;

use crate::error::Result;
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::services::cards::{load_collection, reset_collection};
use crate::AppState;

/// GET /api/cards
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Card>>> {
    let cards = load_collection(&state.store, &auth.key, &state.seed).await?;
    Ok(Json(cards))
}

/// DELETE /api/cards
pub async fn reset(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<StatusCode> {
    let _guard = state.locks.lock(&auth.key).await;
    reset_collection(&state.store, &auth.key).await?;
    tracing::info!(user = %auth.identity.email, "reset collection");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/mistakes
pub async fn mistakes(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<MistakesQuery>,
) -> Result<Json<Vec<Card>>> {
    let cards = load_collection(&state.store, &auth.key, &state.seed).await?;
    let limit = query.limit.unwrap_or(DEFAULT_MISTAKES_LIMIT);
    Ok(Json(recent_mistakes(&cards, limit).into_iter().cloned().collect()))
}
