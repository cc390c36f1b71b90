//! Analytics endpoints.

use super::AppState;
use crate::error::ApiResult;
use crate::types::{ActivityDay, DashboardStats, Streaks};
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

const DEFAULT_HEATMAP_WEEKS: i64 = 26;

#[derive(Debug, Deserialize, Default)]
pub struct HeatmapParams {
    pub weeks: Option<i64>,
}

pub async fn dashboard(State(state): State<AppState>) -> ApiResult<Json<DashboardStats>> {
    Ok(Json(state.db.dashboard_stats()?))
}

pub async fn heatmap(
    State(state): State<AppState>,
    Query(params): Query<HeatmapParams>,
) -> ApiResult<Json<Vec<ActivityDay>>> {
    let weeks = params.weeks.unwrap_or(DEFAULT_HEATMAP_WEEKS);
    Ok(Json(state.db.activity_heatmap(weeks)?))
}

pub async fn streaks(State(state): State<AppState>) -> ApiResult<Json<Streaks>> {
    Ok(Json(state.db.streaks()?))
}
