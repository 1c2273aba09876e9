//! Dashboard endpoints

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::FixedOffset;
use korean_learner_core::{forecast_by_day, forecast_by_hour, Clock};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::services::cards::load_collection;
use crate::AppState;

/// GET /api/stats
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<StatsResponse>> {
    let cards = load_collection(&state.store, &auth.key, &state.seed).await?;
    let now = state.clock.now();

    Ok(Json(StatsResponse {
        stats: DashboardStats::compute(&cards, now),
        forecast: forecast_by_day(&cards, now, state.settings.forecast_days),
    }))
}

/// GET /api/stats/forecast/hourly
pub async fn hourly(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<HourlyForecastQuery>,
) -> Result<Json<HourlyForecastResponse>> {
    let minutes = query.offset_minutes.unwrap_or(0);
    let tz = minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| ApiError::BadRequest(format!("invalid offset_minutes: {}", minutes)))?;

    let cards = load_collection(&state.store, &auth.key, &state.seed).await?;
    let date = query
        .date
        .unwrap_or_else(|| state.clock.now().with_timezone(&tz).date_naive());

    Ok(Json(HourlyForecastResponse {
        date,
        hours: forecast_by_hour(&cards, date, &tz),
    }))
}
