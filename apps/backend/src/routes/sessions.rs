//! Review session endpoints

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use korean_learner_core::{Clock, CoreError, GradeOptions, ReviewSession};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::services::cards::{load_collection, save_collection};
use crate::AppState;

fn session_not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("session {}", id))
}

/// POST /api/sessions
pub async fn start(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<SessionResponse>> {
    let cards = load_collection(&state.store, &auth.key, &state.seed).await?;
    let options = GradeOptions {
        strict: state.settings.strict_grading,
    };
    let session = ReviewSession::start(cards, state.clock.now(), options);
    tracing::info!(
        user = %auth.identity.email,
        due = session.total_to_review(),
        "started review session"
    );

    let id = state.sessions.open(&auth.key, session.clone());
    Ok(Json(SessionResponse::new(id, &session)))
}

/// GET /api/sessions/:id
pub async fn status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>> {
    let session = state
        .sessions
        .snapshot(id, &auth.key)
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(SessionResponse::new(id, &session)))
}

/// POST /api/sessions/:id/answer
///
/// The answer is graded against the stored version of the card, and only
/// that card is written back. The session itself is replaced only once the
/// collection has been saved.
pub async fn answer(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>> {
    let _guard = state.locks.lock(&auth.key).await;
    let mut session = state
        .sessions
        .snapshot(id, &auth.key)
        .ok_or_else(|| session_not_found(id))?;
    let card_id = session.current_id().ok_or(CoreError::SessionFinished)?;

    let mut cards = load_collection(&state.store, &auth.key, &state.seed).await?;
    let index = cards
        .iter()
        .position(|c| c.id == card_id)
        .ok_or(CoreError::CardNotFound(card_id))?;
    session.refresh_card(cards[index].clone());

    let now = state.clock.now();
    let outcome = session.submit(&payload.answer, now)?;
    tracing::debug!(
        card_id = outcome.card_id,
        quality = outcome.quality.value(),
        "graded session answer"
    );
    if let Some(updated) = session.card(card_id) {
        cards[index] = updated.clone();
    }
    save_collection(&state.store, &auth.key, cards).await?;

    if !state.sessions.commit(id, &auth.key, session.clone()) {
        return Err(session_not_found(id));
    }

    let summary = session.is_finished().then(|| {
        let summary = session.summary(now);
        state.sessions.record(&auth.key, summary.clone());
        tracing::info!(
            user = %auth.identity.email,
            accuracy = summary.accuracy,
            "finished review session"
        );
        summary
    });

    Ok(Json(AnswerResponse {
        outcome,
        session: SessionResponse::new(id, &session),
        summary,
    }))
}

/// GET /api/session-history
pub async fn history(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Json<Vec<SessionSummary>> {
    Json(state.sessions.history(&auth.key))
}
