//! Graph endpoint.

use super::AppState;
use crate::error::ApiResult;
use crate::types::Graph;
use axum::extract::State;
use axum::Json;

pub async fn get_graph(State(state): State<AppState>) -> ApiResult<Json<Graph>> {
    Ok(Json(state.db.graph()?))
}
