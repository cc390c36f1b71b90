//! Tag endpoints.

use super::{normalize_tag, ApiJson, AppState};
use crate::error::{ApiError, ApiResult};
use crate::types::TagCount;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct AddTagBody {
    pub name: String,
}

pub async fn list_tags(State(state): State<AppState>) -> ApiResult<Json<Vec<TagCount>>> {
    Ok(Json(state.db.list_tags()?))
}

pub async fn list_project_tags(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<String>>> {
    ensure_project(&state, id)?;
    Ok(Json(state.db.project_tags(id)?))
}

pub async fn add_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<AddTagBody>,
) -> ApiResult<Json<serde_json::Value>> {
    let name = normalize_tag(&body.name);
    if name.is_empty() {
        return Err(ApiError::missing_field("name"));
    }
    ensure_project(&state, id)?;
    let added = state.db.add_tag(id, &name)?;
    Ok(Json(json!({ "name": name, "added": added })))
}

pub async fn remove_tag(
    State(state): State<AppState>,
    Path((id, name)): Path<(i64, String)>,
) -> ApiResult<Json<serde_json::Value>> {
    ensure_project(&state, id)?;
    let name = normalize_tag(&name);
    if !state.db.remove_tag(id, &name)? {
        return Err(ApiError::tag_not_attached(id, &name));
    }
    Ok(Json(json!({ "name": name, "removed": true })))
}

fn ensure_project(state: &AppState, id: i64) -> ApiResult<()> {
    if state.db.get_project(id)?.is_none() {
        return Err(ApiError::project_not_found(id));
    }
    Ok(())
}
