//! Link endpoints.

use super::{ApiJson, AppState};
use crate::error::{ApiError, ApiResult};
use crate::types::Link;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct NewLinkBody {
    pub url: String,
    pub title: Option<String>,
}

pub async fn list_links(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<Link>>> {
    ensure_project(&state, id)?;
    Ok(Json(state.db.list_links(id)?))
}

pub async fn create_link(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<NewLinkBody>,
) -> ApiResult<(StatusCode, Json<Link>)> {
    let url = body.url.trim();
    if url.is_empty() {
        return Err(ApiError::missing_field("url"));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ApiError::invalid_value("url", "url must be http or https"));
    }
    ensure_project(&state, id)?;
    let link = state.db.create_link(id, body.title.as_deref(), url)?;
    Ok((StatusCode::CREATED, Json(link)))
}

pub async fn delete_link(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    if !state.db.delete_link(id)? {
        return Err(ApiError::link_not_found(id));
    }
    Ok(Json(json!({ "deleted": id })))
}

fn ensure_project(state: &AppState, id: i64) -> ApiResult<()> {
    if state.db.get_project(id)?.is_none() {
        return Err(ApiError::project_not_found(id));
    }
    Ok(())
}
