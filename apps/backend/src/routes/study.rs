//! Study endpoints

use axum::{extract::State, Extension, Json};
use korean_learner_core::{due_cards, grade, next_due, schedule, Clock, GradeOptions, Quality};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::services::cards::{load_collection, save_collection};
use crate::AppState;

/// GET /api/study/queue
pub async fn queue(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<StudyQueueResponse>> {
    let cards = load_collection(&state.store, &auth.key, &state.seed).await?;
    let due = due_cards(&cards, state.clock.now()).into_iter().cloned().collect();

    Ok(Json(StudyQueueResponse {
        cards: due,
        next_due: next_due(&cards),
    }))
}

/// POST /api/study/grade
pub async fn grade_answer(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<GradeRequest>,
) -> Result<Json<GradeResult>> {
    let cards = load_collection(&state.store, &auth.key, &state.seed).await?;
    let card = cards
        .iter()
        .find(|c| c.id == payload.card_id)
        .ok_or_else(|| ApiError::NotFound(format!("card {}", payload.card_id)))?;

    let options = GradeOptions {
        strict: payload.strict.unwrap_or(state.settings.strict_grading),
    };
    let graded = grade(&payload.answer, &card.back, options);
    tracing::debug!(card_id = card.id, quality = graded.quality.value(), "graded answer");

    Ok(Json(graded))
}

/// POST /api/study/review
pub async fn review(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<ReviewRequest>,
) -> Result<Json<ReviewResponse>> {
    let _guard = state.locks.lock(&auth.key).await;
    let mut cards = load_collection(&state.store, &auth.key, &state.seed).await?;
    let index = cards
        .iter()
        .position(|c| c.id == payload.card_id)
        .ok_or_else(|| ApiError::NotFound(format!("card {}", payload.card_id)))?;

    let card = &cards[index];
    if !card.learned {
        return Err(ApiError::BadRequest(format!("card {} has not been learned", card.id)));
    }

    let (quality, graded) = match (payload.answer, payload.quality) {
        (Some(answer), None) => {
            let options = GradeOptions {
                strict: state.settings.strict_grading,
            };
            let graded = grade(&answer, &card.back, options);
            tracing::debug!(card_id = card.id, quality = graded.quality.value(), "graded answer");
            (graded.quality, Some(graded))
        }
        (None, Some(value)) => (Quality::new(value)?, None),
        _ => {
            return Err(ApiError::BadRequest(
                "provide exactly one of answer or quality".to_string(),
            ))
        }
    };

    let now = state.clock.now();
    let result = schedule(&card.state, quality.value(), now)?;
    let updated = card.apply_review(&result, quality, now);
    cards[index] = updated.clone();

    save_collection(&state.store, &auth.key, cards).await?;

    Ok(Json(ReviewResponse {
        card: updated,
        quality: quality.value(),
        is_correct: quality.is_pass(),
        grade: graded,
    }))
}
