//! Note endpoints.

use super::{ApiJson, AppState};
use crate::error::{ApiError, ApiResult};
use crate::types::{Note, NoteType};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
    pub note_type: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct NewNoteBody {
    pub content: String,
    pub note_type: Option<String>,
}

fn validate_note_type(s: &str) -> ApiResult<NoteType> {
    NoteType::parse(s).ok_or_else(|| {
        ApiError::invalid_value(
            "note_type",
            format!("unknown note type '{}' (expected log, idea, blocker, or reflection)", s),
        )
    })
}

pub async fn list_notes(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Note>>> {
    ensure_project(&state, id)?;
    let note_type = match params.note_type.as_deref().filter(|s| !s.is_empty()) {
        Some(s) => Some(validate_note_type(s)?),
        None => None,
    };
    Ok(Json(state.db.list_notes(id, note_type, params.limit)?))
}

pub async fn create_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<NewNoteBody>,
) -> ApiResult<(StatusCode, Json<Note>)> {
    if body.content.trim().is_empty() {
        return Err(ApiError::missing_field("content"));
    }
    let note_type = match body.note_type.as_deref().filter(|s| !s.is_empty()) {
        Some(s) => validate_note_type(s)?,
        None => NoteType::Log,
    };
    ensure_project(&state, id)?;
    let note = state.db.create_note(id, note_type, body.content.trim())?;
    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Note>> {
    state
        .db
        .get_note(id)?
        .map(Json)
        .ok_or_else(|| ApiError::note_not_found(id))
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    if !state.db.delete_note(id)? {
        return Err(ApiError::note_not_found(id));
    }
    Ok(Json(json!({ "deleted": id })))
}

fn ensure_project(state: &AppState, id: i64) -> ApiResult<()> {
    if state.db.get_project(id)?.is_none() {
        return Err(ApiError::project_not_found(id));
    }
    Ok(())
}
