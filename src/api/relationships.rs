//! Relationship endpoints.

use super::{ApiJson, AppState};
use crate::db::relationships::CreateRelationship;
use crate::error::{ApiError, ApiResult};
use crate::types::{Relationship, RelationshipType, RelationshipView};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct NewRelationshipBody {
    pub source_project_id: i64,
    pub target_project_id: i64,
    pub relationship_type: String,
}

pub async fn create_relationship(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewRelationshipBody>,
) -> ApiResult<(StatusCode, Json<Relationship>)> {
    let rel_type = RelationshipType::parse(&body.relationship_type).ok_or_else(|| {
        ApiError::invalid_value(
            "relationship_type",
            format!(
                "unknown relationship type '{}' (expected related_to, depends_on, or part_of)",
                body.relationship_type
            ),
        )
    })?;
    if body.source_project_id == body.target_project_id {
        return Err(ApiError::invalid_value(
            "target_project_id",
            "a project cannot relate to itself",
        ));
    }

    match state
        .db
        .create_relationship(body.source_project_id, body.target_project_id, rel_type)?
    {
        CreateRelationship::Created(rel) => Ok((StatusCode::CREATED, Json(rel))),
        CreateRelationship::Duplicate => Err(ApiError::already_exists(format!(
            "relationship {} -{}-> {} already exists",
            body.source_project_id, rel_type, body.target_project_id
        ))),
        CreateRelationship::MissingEndpoint => Err(ApiError::new(
            crate::error::ErrorCode::ProjectNotFound,
            "one or both projects do not exist",
        )),
    }
}

pub async fn get_relationship(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Relationship>> {
    state
        .db
        .get_relationship(id)?
        .map(Json)
        .ok_or_else(|| ApiError::relationship_not_found(id))
}

pub async fn list_project_relationships(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<RelationshipView>>> {
    if state.db.get_project(id)?.is_none() {
        return Err(ApiError::project_not_found(id));
    }
    Ok(Json(state.db.project_relationships(id)?))
}

pub async fn delete_relationship(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    if !state.db.delete_relationship(id)? {
        return Err(ApiError::relationship_not_found(id));
    }
    Ok(Json(json!({ "deleted": id })))
}
