//! Typed HTTP client for the contextgrid REST API, used by the CLI.

use crate::types::{
    ActivityDay, DashboardStats, Graph, Link, NewProject, NewTemplate, Note, ProjectDetail,
    ProjectUpdate, Relationship, RelationshipView, Streaks, TagCount, Template,
};
use anyhow::{anyhow, bail, Result};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

fn tag_path(project_id: i64, name: &str) -> String {
    format!("/projects/{}/tags/{}", project_id, urlencoding::encode(name))
}

fn template_path(name: &str) -> String {
    format!("/templates/{}", urlencoding::encode(name))
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> Result<T> {
        let url = format!("{}/api{}", self.base_url, path);
        let mut req = self.client.request(method, &url);
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| anyhow!("request to {} failed: {}", url, e))?;

        let status = resp.status();
        if status.is_success() {
            return resp
                .json::<T>()
                .await
                .map_err(|e| anyhow!("failed to parse response from {}: {}", url, e));
        }

        // API errors carry a {"error": {code, message}} envelope.
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.pointer("/error/message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or(body);
        bail!("{}: {}", status, message)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None::<&()>).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::DELETE, path, None::<&()>).await
    }

    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/api/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        Ok(resp.status() == StatusCode::OK)
    }

    // Projects

    pub async fn list_projects(&self, query: &str) -> Result<Vec<ProjectDetail>> {
        let path = if query.is_empty() {
            "/projects".to_string()
        } else {
            format!("/projects?{}", query)
        };
        self.get(&path).await
    }

    pub async fn create_project(&self, new: &NewProject) -> Result<ProjectDetail> {
        self.request(Method::POST, "/projects", Some(new)).await
    }

    pub async fn get_project(&self, id: i64) -> Result<ProjectDetail> {
        self.get(&format!("/projects/{}", id)).await
    }

    pub async fn update_project(&self, id: i64, update: &ProjectUpdate) -> Result<ProjectDetail> {
        self.request(Method::PUT, &format!("/projects/{}", id), Some(update))
            .await
    }

    pub async fn delete_project(&self, id: i64) -> Result<()> {
        let _: serde_json::Value = self.delete(&format!("/projects/{}", id)).await?;
        Ok(())
    }

    pub async fn touch_project(&self, id: i64) -> Result<i64> {
        let v: serde_json::Value = self
            .request(Method::POST, &format!("/projects/{}/touch", id), None::<&()>)
            .await?;
        v.get("last_worked_at")
            .and_then(|t| t.as_i64())
            .ok_or_else(|| anyhow!("malformed touch response"))
    }

    // Tags

    pub async fn list_tags(&self) -> Result<Vec<TagCount>> {
        self.get("/tags").await
    }

    pub async fn add_tag(&self, project_id: i64, name: &str) -> Result<bool> {
        let v: serde_json::Value = self
            .request(
                Method::POST,
                &format!("/projects/{}/tags", project_id),
                Some(&json!({ "name": name })),
            )
            .await?;
        Ok(v.get("added").and_then(|a| a.as_bool()).unwrap_or(false))
    }

    pub async fn remove_tag(&self, project_id: i64, name: &str) -> Result<()> {
        let _: serde_json::Value = self.delete(&tag_path(project_id, name)).await?;
        Ok(())
    }

    // Notes

    pub async fn list_notes(&self, project_id: i64, query: &str) -> Result<Vec<Note>> {
        let path = if query.is_empty() {
            format!("/projects/{}/notes", project_id)
        } else {
            format!("/projects/{}/notes?{}", project_id, query)
        };
        self.get(&path).await
    }

    pub async fn create_note(
        &self,
        project_id: i64,
        content: &str,
        note_type: Option<&str>,
    ) -> Result<Note> {
        self.request(
            Method::POST,
            &format!("/projects/{}/notes", project_id),
            Some(&json!({ "content": content, "note_type": note_type })),
        )
        .await
    }

    pub async fn get_note(&self, id: i64) -> Result<Note> {
        self.get(&format!("/notes/{}", id)).await
    }

    pub async fn delete_note(&self, id: i64) -> Result<()> {
        let _: serde_json::Value = self.delete(&format!("/notes/{}", id)).await?;
        Ok(())
    }

    // Relationships

    pub async fn create_relationship(
        &self,
        source: i64,
        target: i64,
        rel_type: &str,
    ) -> Result<Relationship> {
        self.request(
            Method::POST,
            "/relationships",
            Some(&json!({
                "source_project_id": source,
                "target_project_id": target,
                "relationship_type": rel_type,
            })),
        )
        .await
    }

    pub async fn list_relationships(&self, project_id: i64) -> Result<Vec<RelationshipView>> {
        self.get(&format!("/projects/{}/relationships", project_id))
            .await
    }

    pub async fn delete_relationship(&self, id: i64) -> Result<()> {
        let _: serde_json::Value = self.delete(&format!("/relationships/{}", id)).await?;
        Ok(())
    }

    // Links

    pub async fn create_link(
        &self,
        project_id: i64,
        url: &str,
        title: Option<&str>,
    ) -> Result<Link> {
        self.request(
            Method::POST,
            &format!("/projects/{}/links", project_id),
            Some(&json!({ "url": url, "title": title })),
        )
        .await
    }

    pub async fn list_links(&self, project_id: i64) -> Result<Vec<Link>> {
        self.get(&format!("/projects/{}/links", project_id)).await
    }

    pub async fn delete_link(&self, id: i64) -> Result<()> {
        let _: serde_json::Value = self.delete(&format!("/links/{}", id)).await?;
        Ok(())
    }

    // Templates

    pub async fn list_templates(&self) -> Result<Vec<Template>> {
        self.get("/templates").await
    }

    pub async fn get_template(&self, name: &str) -> Result<Template> {
        self.get(&template_path(name)).await
    }

    pub async fn create_template(&self, new: &NewTemplate) -> Result<Template> {
        self.request(Method::POST, "/templates", Some(new)).await
    }

    pub async fn delete_template(&self, name: &str) -> Result<()> {
        let _: serde_json::Value = self.delete(&template_path(name)).await?;
        Ok(())
    }

    // Graph and analytics

    pub async fn graph(&self) -> Result<Graph> {
        self.get("/graph").await
    }

    pub async fn dashboard(&self) -> Result<DashboardStats> {
        self.get("/analytics/dashboard").await
    }

    pub async fn heatmap(&self, weeks: Option<i64>) -> Result<Vec<ActivityDay>> {
        let path = match weeks {
            Some(w) => format!("/analytics/heatmap?weeks={}", w),
            None => "/analytics/heatmap".to_string(),
        };
        self.get(&path).await
    }

    pub async fn streaks(&self) -> Result<Streaks> {
        self.get("/analytics/streaks").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_names_are_encoded_in_paths() {
        assert_eq!(tag_path(1, "two words"), "/projects/1/tags/two%20words");
        assert_eq!(tag_path(7, "a&b/c"), "/projects/7/tags/a%26b%2Fc");
        assert_eq!(tag_path(2, "rust"), "/projects/2/tags/rust");
    }

    #[test]
    fn template_names_are_encoded_in_paths() {
        assert_eq!(template_path("weekend hack"), "/templates/weekend%20hack");
    }
}
