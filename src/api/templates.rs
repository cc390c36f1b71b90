//! Template endpoints.

use super::{ApiJson, AppState};
use crate::error::{ApiError, ApiResult};
use crate::types::{NewTemplate, Template};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

pub async fn list_templates(State(state): State<AppState>) -> ApiResult<Json<Vec<Template>>> {
    Ok(Json(state.db.list_templates()?))
}

pub async fn create_template(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewTemplate>,
) -> ApiResult<(StatusCode, Json<Template>)> {
    if new.name.trim().is_empty() {
        return Err(ApiError::missing_field("name"));
    }
    match state.db.create_template(&new)? {
        Some(template) => Ok((StatusCode::CREATED, Json(template))),
        None => Err(ApiError::already_exists(format!(
            "template '{}' already exists",
            new.name
        ))),
    }
}

pub async fn get_template(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Template>> {
    state
        .db
        .get_template(&name)?
        .map(Json)
        .ok_or_else(|| ApiError::template_not_found(&name))
}

pub async fn delete_template(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    if !state.db.delete_template(&name)? {
        return Err(ApiError::template_not_found(&name));
    }
    Ok(Json(json!({ "deleted": name })))
}
