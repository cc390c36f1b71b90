//! Project endpoints.

use super::{normalize_tag, ApiJson, AppState};
use crate::db::projects::ProjectFilter;
use crate::error::{ApiError, ApiResult};
use crate::types::{NewProject, ProjectDetail, ProjectStatus, ProjectUpdate};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
    pub status: Option<String>,
    pub tag: Option<String>,
    pub q: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    #[serde(default)]
    pub include_archived: bool,
}

fn validate_status(s: &str) -> ApiResult<ProjectStatus> {
    ProjectStatus::parse(s).ok_or_else(|| {
        ApiError::invalid_value(
            "status",
            format!("unknown status '{}' (expected idea, active, paused, or archived)", s),
        )
    })
}

fn validate_name(name: &str) -> ApiResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ApiError::missing_field("name"));
    }
    if trimmed.chars().count() > 200 {
        return Err(ApiError::invalid_value("name", "name must be at most 200 characters"));
    }
    Ok(())
}

fn validate_progress(progress: i32) -> ApiResult<()> {
    if !(0..=100).contains(&progress) {
        return Err(ApiError::invalid_value("progress", "progress must be between 0 and 100"));
    }
    Ok(())
}

pub async fn list_projects(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<ProjectDetail>>> {
    let status = match params.status.as_deref().filter(|s| !s.is_empty()) {
        Some(s) => Some(validate_status(s)?),
        None => None,
    };

    let filter = ProjectFilter {
        status,
        tag: params
            .tag
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(normalize_tag),
        query: params.q.filter(|s| !s.is_empty()),
        include_archived: params.include_archived,
        sort_by: params.sort_by,
        sort_order: params.sort_order,
        limit: params.limit,
        offset: params.offset,
    };

    let projects = state.db.list_projects(&filter)?;
    let mut details = Vec::with_capacity(projects.len());
    for project in projects {
        let tags = state.db.project_tags(project.id)?;
        details.push(ProjectDetail { project, tags });
    }
    Ok(Json(details))
}

pub async fn create_project(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewProject>,
) -> ApiResult<(StatusCode, Json<ProjectDetail>)> {
    validate_name(&new.name)?;
    if let Some(progress) = new.progress {
        validate_progress(progress)?;
    }

    let template = match new.template.as_deref() {
        Some(name) => Some(
            state
                .db
                .get_template(name)?
                .ok_or_else(|| ApiError::template_not_found(name))?,
        ),
        None => None,
    };

    let project = state.db.create_project(&new, template.as_ref())?;
    let tags = state.db.project_tags(project.id)?;
    Ok((StatusCode::CREATED, Json(ProjectDetail { project, tags })))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ProjectDetail>> {
    let project = state
        .db
        .get_project(id)?
        .ok_or_else(|| ApiError::project_not_found(id))?;
    let tags = state.db.project_tags(id)?;
    Ok(Json(ProjectDetail { project, tags }))
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(update): ApiJson<ProjectUpdate>,
) -> ApiResult<Json<ProjectDetail>> {
    if let Some(ref name) = update.name {
        validate_name(name)?;
    }
    if let Some(progress) = update.progress {
        validate_progress(progress)?;
    }

    let project = state
        .db
        .update_project(id, &update)?
        .ok_or_else(|| ApiError::project_not_found(id))?;
    let tags = state.db.project_tags(id)?;
    Ok(Json(ProjectDetail { project, tags }))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    if !state.db.delete_project(id)? {
        return Err(ApiError::project_not_found(id));
    }
    Ok(Json(json!({ "deleted": id })))
}

pub async fn touch_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let last_worked_at = state
        .db
        .touch_project(id)?
        .ok_or_else(|| ApiError::project_not_found(id))?;
    Ok(Json(json!({ "id": id, "last_worked_at": last_worked_at })))
}
