//! Server-rendered web UI: page shells plus htmx HTML fragments.

pub mod templates;

use crate::api::AppState;
use crate::db::projects::ProjectFilter;
use crate::types::{Direction, Project, ProjectStatus};
use axum::extract::{Path, Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use chrono::{TimeZone, Utc};
use serde::Deserialize;

const PAGE_SIZE: i64 = 20;

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn format_timestamp(ms: Option<i64>) -> String {
    match ms.and_then(|ms| Utc.timestamp_millis_opt(ms).single()) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => "never".to_string(),
    }
}

fn status_badge(status: ProjectStatus) -> String {
    format!(
        r#"<span class="badge badge-{status}">{status}</span>"#,
        status = status.as_str()
    )
}

async fn index_page() -> Html<String> {
    Html(templates::render_page("Dashboard", templates::INDEX_TEMPLATE))
}

async fn projects_page() -> Html<String> {
    Html(templates::render_page("Projects", templates::PROJECTS_TEMPLATE))
}

async fn tags_page() -> Html<String> {
    Html(templates::render_page("Tags", templates::TAGS_TEMPLATE))
}

async fn graph_page() -> Html<String> {
    Html(templates::render_page("Graph", templates::GRAPH_TEMPLATE))
}

async fn activity_page() -> Html<String> {
    Html(templates::render_page("Activity", templates::ACTIVITY_TEMPLATE))
}

async fn project_detail_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Html<String> {
    let Ok(Some(project)) = state.db.get_project(id) else {
        return Html(templates::render_page(
            "Not found",
            r#"<div class="empty-state">Project not found</div>"#,
        ));
    };

    let tags = state.db.project_tags(id).unwrap_or_default();
    let tags_html: String = if tags.is_empty() {
        "-".to_string()
    } else {
        tags.iter()
            .map(|t| format!(r#"<span class="tag">{}</span>"#, html_escape(t)))
            .collect()
    };

    let opt = |v: &Option<String>| match v.as_deref().filter(|s| !s.is_empty()) {
        Some(s) => html_escape(s),
        None => "-".to_string(),
    };

    let content = templates::PROJECT_DETAIL_TEMPLATE
        .replace("{{name}}", &html_escape(&project.name))
        .replace("{{status}}", project.status.as_str())
        .replace("{{description}}", &opt(&project.description))
        .replace("{{project_type}}", &opt(&project.project_type))
        .replace("{{primary_language}}", &opt(&project.primary_language))
        .replace("{{stack}}", &opt(&project.stack))
        .replace("{{repo_url}}", &opt(&project.repo_url))
        .replace("{{local_path}}", &opt(&project.local_path))
        .replace("{{scope_size}}", &opt(&project.scope_size))
        .replace("{{learning_goal}}", &opt(&project.learning_goal))
        .replace("{{progress}}", &project.progress.to_string())
        .replace("{{created_at}}", &format_timestamp(Some(project.created_at)))
        .replace("{{last_worked_at}}", &format_timestamp(project.last_worked_at))
        .replace("{{tags}}", &tags_html)
        .replace("{{notes}}", &render_notes(&state, id))
        .replace("{{links}}", &render_links(&state, id))
        .replace("{{relationships}}", &render_relationships(&state, id));

    Html(templates::render_page(&project.name, &content))
}

fn render_notes(state: &AppState, project_id: i64) -> String {
    let notes = state
        .db
        .list_notes(project_id, None, Some(50))
        .unwrap_or_default();
    if notes.is_empty() {
        return r#"<div class="empty-state">No notes</div>"#.to_string();
    }

    let mut html = String::from(
        "<table><thead><tr><th>When</th><th>Type</th><th>Note</th></tr></thead><tbody>",
    );
    for note in notes {
        html.push_str(&format!(
            r#"<tr><td>{}</td><td><span class="tag">{}</span></td><td>{}</td></tr>"#,
            format_timestamp(Some(note.created_at)),
            note.note_type,
            html_escape(&note.content),
        ));
    }
    html.push_str("</tbody></table>");
    html
}

fn render_links(state: &AppState, project_id: i64) -> String {
    let links = state.db.list_links(project_id).unwrap_or_default();
    if links.is_empty() {
        return r#"<div class="empty-state">No links</div>"#.to_string();
    }

    let mut html = String::from("<ul>");
    for link in links {
        let url = html_escape(&link.url);
        let title = link
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(html_escape)
            .unwrap_or_else(|| url.clone());
        html.push_str(&format!(r#"<li><a href="{}">{}</a></li>"#, url, title));
    }
    html.push_str("</ul>");
    html
}

fn render_relationships(state: &AppState, project_id: i64) -> String {
    let rels = state.db.project_relationships(project_id).unwrap_or_default();
    if rels.is_empty() {
        return r#"<div class="empty-state">No relationships</div>"#.to_string();
    }

    let mut html = String::from("<ul>");
    for view in rels {
        let peer_id = match view.direction {
            Direction::Outgoing => view.relationship.target_project_id,
            Direction::Incoming => view.relationship.source_project_id,
        };
        let text = match view.direction {
            Direction::Outgoing => format!(
                "{} <a href=\"/projects/{}\">{}</a>",
                view.relationship.relationship_type,
                peer_id,
                html_escape(&view.peer_project_name),
            ),
            Direction::Incoming => format!(
                "<a href=\"/projects/{}\">{}</a> {} this",
                peer_id,
                html_escape(&view.peer_project_name),
                view.relationship.relationship_type,
            ),
        };
        html.push_str(&format!("<li>{}</li>", text));
    }
    html.push_str("</ul>");
    html
}

#[derive(Debug, Deserialize, Default)]
struct ProjectListParams {
    status: Option<String>,
    tag: Option<String>,
    q: Option<String>,
    page: Option<i64>,
}

async fn fragment_projects(
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> Html<String> {
    let page = params.page.unwrap_or(0).max(0);
    let filter = ProjectFilter {
        status: params
            .status
            .as_deref()
            .filter(|s| !s.is_empty())
            .and_then(ProjectStatus::parse),
        tag: params
            .tag
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty()),
        query: params.q.clone().filter(|s| !s.is_empty()),
        include_archived: params.status.as_deref() == Some("archived"),
        // one extra row to detect a next page
        limit: Some(PAGE_SIZE + 1),
        offset: Some(page * PAGE_SIZE),
        ..Default::default()
    };

    let mut projects = state.db.list_projects(&filter).unwrap_or_default();
    let has_next = projects.len() as i64 > PAGE_SIZE;
    projects.truncate(PAGE_SIZE as usize);

    if projects.is_empty() && page == 0 {
        return Html(r#"<div class="empty-state">No projects</div>"#.to_string());
    }

    let mut html = String::from(
        "<table><thead><tr><th>Name</th><th>Status</th><th>Language</th>\
         <th>Progress</th><th>Last worked</th></tr></thead><tbody>",
    );
    for project in &projects {
        html.push_str(&render_project_row(project));
    }
    html.push_str("</tbody></table>");

    html.push_str(&render_pagination(page, has_next, &params));
    Html(html)
}

fn render_project_row(project: &Project) -> String {
    format!(
        r#"<tr><td><a href="/projects/{id}">{name}</a></td><td>{badge}</td><td>{lang}</td><td>{progress}%</td><td>{worked}</td></tr>"#,
        id = project.id,
        name = html_escape(&project.name),
        badge = status_badge(project.status),
        lang = project
            .primary_language
            .as_deref()
            .map(html_escape)
            .unwrap_or_else(|| "-".to_string()),
        progress = project.progress,
        worked = format_timestamp(project.last_worked_at),
    )
}

fn render_pagination(page: i64, has_next: bool, params: &ProjectListParams) -> String {
    if page == 0 && !has_next {
        return String::new();
    }

    let mut qs = String::new();
    if let Some(ref s) = params.status {
        if !s.is_empty() {
            qs.push_str(&format!("&status={}", s));
        }
    }
    if let Some(ref t) = params.tag {
        if !t.is_empty() {
            qs.push_str(&format!("&tag={}", t));
        }
    }

    let mut html = String::from(r#"<div class="pagination">"#);
    if page > 0 {
        html.push_str(&format!(
            r##"<a hx-get="/fragments/projects?page={}{}" hx-target="#project-list">&laquo; prev</a>"##,
            page - 1,
            qs
        ));
    }
    html.push_str(&format!("<span>page {}</span>", page + 1));
    if has_next {
        html.push_str(&format!(
            r##"<a hx-get="/fragments/projects?page={}{}" hx-target="#project-list">next &raquo;</a>"##,
            page + 1,
            qs
        ));
    }
    html.push_str("</div>");
    html
}

async fn fragment_stats(State(state): State<AppState>) -> Html<String> {
    let stats = state.db.dashboard_stats().unwrap_or_default();
    Html(format!(
        r#"<div class="cards">
            <div class="card"><div class="num">{}</div><div class="label">Projects</div></div>
            <div class="card"><div class="num">{}</div><div class="label">Active</div></div>
            <div class="card"><div class="num">{}</div><div class="label">Ideas</div></div>
            <div class="card"><div class="num">{}</div><div class="label">Paused</div></div>
            <div class="card"><div class="num">{}</div><div class="label">Notes</div></div>
            <div class="card"><div class="num">{}</div><div class="label">Tags</div></div>
        </div>"#,
        stats.total_projects, stats.active, stats.idea, stats.paused, stats.total_notes, stats.total_tags,
    ))
}

async fn fragment_recent(State(state): State<AppState>) -> Html<String> {
    let stats = state.db.dashboard_stats().unwrap_or_default();
    if stats.recently_worked.is_empty() {
        return Html(r#"<div class="empty-state">Nothing worked on yet</div>"#.to_string());
    }

    let mut html = String::from(
        "<table><thead><tr><th>Name</th><th>Status</th><th>Language</th>\
         <th>Progress</th><th>Last worked</th></tr></thead><tbody>",
    );
    for project in &stats.recently_worked {
        html.push_str(&render_project_row(project));
    }
    html.push_str("</tbody></table>");
    Html(html)
}

async fn fragment_streaks(State(state): State<AppState>) -> Html<String> {
    let streaks = state.db.streaks().unwrap_or_default();
    Html(format!(
        r#"<div class="cards">
            <div class="card"><div class="num">{}</div><div class="label">Current streak</div></div>
            <div class="card"><div class="num">{}</div><div class="label">Longest streak</div></div>
            <div class="card"><div class="num">{}</div><div class="label">Active days</div></div>
        </div>"#,
        streaks.current, streaks.longest, streaks.active_days,
    ))
}

async fn fragment_tags(State(state): State<AppState>) -> Html<String> {
    let tags = state.db.list_tags().unwrap_or_default();
    if tags.is_empty() {
        return Html(r#"<div class="empty-state">No tags</div>"#.to_string());
    }

    let mut html = String::from(
        "<table><thead><tr><th>Tag</th><th>Projects</th></tr></thead><tbody>",
    );
    for tag in tags {
        html.push_str(&format!(
            r#"<tr><td><span class="tag">{}</span></td><td>{}</td></tr>"#,
            html_escape(&tag.name),
            tag.project_count,
        ));
    }
    html.push_str("</tbody></table>");
    Html(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_links_target_the_project_list() {
        let params = ProjectListParams {
            status: Some("active".to_string()),
            ..Default::default()
        };
        let html = render_pagination(1, true, &params);
        assert!(html.contains(r##"hx-target="#project-list""##));
        assert!(html.contains("page=0&status=active"));
        assert!(html.contains("page=2&status=active"));
        assert!(html.contains("page 2"));
    }

    #[test]
    fn single_page_renders_no_pagination() {
        let params = ProjectListParams::default();
        assert!(render_pagination(0, false, &params).is_empty());
    }
}

/// Build the web UI router (pages plus htmx fragments).
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/projects", get(projects_page))
        .route("/projects/{id}", get(project_detail_page))
        .route("/tags", get(tags_page))
        .route("/graph", get(graph_page))
        .route("/activity", get(activity_page))
        .route("/fragments/projects", get(fragment_projects))
        .route("/fragments/stats", get(fragment_stats))
        .route("/fragments/recent", get(fragment_recent))
        .route("/fragments/streaks", get(fragment_streaks))
        .route("/fragments/tags", get(fragment_tags))
        .with_state(state)
}
