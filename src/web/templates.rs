//! HTML templates for the web UI.
//!
//! Templates are embedded at compile time so the binary is self-contained.

/// Shared page shell with nav and styles. `{{title}}` and `{{content}}` are
/// replaced at render time.
pub const BASE_TEMPLATE: &str = include_str!("templates/base.html");

/// Home dashboard page.
pub const INDEX_TEMPLATE: &str = include_str!("templates/index.html");

/// Projects list page.
pub const PROJECTS_TEMPLATE: &str = include_str!("templates/projects.html");

/// Project detail page (placeholder-driven).
pub const PROJECT_DETAIL_TEMPLATE: &str = include_str!("templates/project_detail.html");

/// Tags index page.
pub const TAGS_TEMPLATE: &str = include_str!("templates/tags.html");

/// Graph view page (renders /api/graph client-side).
pub const GRAPH_TEMPLATE: &str = include_str!("templates/graph.html");

/// Activity heatmap page.
pub const ACTIVITY_TEMPLATE: &str = include_str!("templates/activity.html");

/// Render a page into the shared shell.
pub fn render_page(title: &str, content: &str) -> String {
    BASE_TEMPLATE
        .replace("{{title}}", title)
        .replace("{{content}}", content)
}
