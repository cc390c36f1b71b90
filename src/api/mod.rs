//! JSON REST API.

pub mod analytics;
pub mod graph;
pub mod links;
pub mod notes;
pub mod projects;
pub mod relationships;
pub mod tags;
pub mod templates;

use crate::db::Database;
use crate::error::ApiError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

/// JSON body extractor that turns deserialization failures (malformed
/// JSON, wrong types, unknown enum values) into the 400 error envelope
/// instead of axum's bare 422.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::invalid_value("body", rejection.body_text()))?;
        Ok(ApiJson(value))
    }
}

/// Normalize a tag name: trimmed and lowercased.
pub fn normalize_tag(name: &str) -> String {
    name.trim().to_lowercase()
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Build the `/api` router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/projects/{id}",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route("/projects/{id}/touch", post(projects::touch_project))
        .route(
            "/projects/{id}/tags",
            get(tags::list_project_tags).post(tags::add_tag),
        )
        .route("/projects/{id}/tags/{name}", delete(tags::remove_tag))
        .route(
            "/projects/{id}/notes",
            get(notes::list_notes).post(notes::create_note),
        )
        .route(
            "/projects/{id}/relationships",
            get(relationships::list_project_relationships),
        )
        .route(
            "/projects/{id}/links",
            get(links::list_links).post(links::create_link),
        )
        .route(
            "/notes/{id}",
            get(notes::get_note).delete(notes::delete_note),
        )
        .route("/relationships", post(relationships::create_relationship))
        .route(
            "/relationships/{id}",
            get(relationships::get_relationship).delete(relationships::delete_relationship),
        )
        .route("/links/{id}", delete(links::delete_link))
        .route("/tags", get(tags::list_tags))
        .route(
            "/templates",
            get(templates::list_templates).post(templates::create_template),
        )
        .route(
            "/templates/{name}",
            get(templates::get_template).delete(templates::delete_template),
        )
        .route("/graph", get(graph::get_graph))
        .route("/analytics/dashboard", get(analytics::dashboard))
        .route("/analytics/heatmap", get(analytics::heatmap))
        .route("/analytics/streaks", get(analytics::streaks))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::types::NewProject;
    use axum::body::Body;
    use axum::http::{header, StatusCode};

    fn json_request(body: &str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn bad_enum_value_maps_to_400_envelope() {
        let req = json_request(r#"{"name": "x", "status": "bogus"}"#);
        let err = ApiJson::<NewProject>::from_request(req, &())
            .await
            .expect_err("bogus status should be rejected");
        assert_eq!(err.code, ErrorCode::InvalidFieldValue);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_json_maps_to_400_envelope() {
        let req = json_request("{not json");
        let err = ApiJson::<NewProject>::from_request(req, &())
            .await
            .expect_err("malformed body should be rejected");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn valid_body_passes_through() {
        let req = json_request(r#"{"name": "x", "status": "active"}"#);
        let ApiJson(new) = ApiJson::<NewProject>::from_request(req, &())
            .await
            .expect("valid body should parse");
        assert_eq!(new.name, "x");
    }
}
