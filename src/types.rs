//! Core types for contextgrid.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Idea,
    Active,
    Paused,
    Archived,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Idea,
        ProjectStatus::Active,
        ProjectStatus::Paused,
        ProjectStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Idea => "idea",
            ProjectStatus::Active => "active",
            ProjectStatus::Paused => "paused",
            ProjectStatus::Archived => "archived",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "idea" => Some(ProjectStatus::Idea),
            "active" => Some(ProjectStatus::Active),
            "paused" => Some(ProjectStatus::Paused),
            "archived" => Some(ProjectStatus::Archived),
            _ => None,
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Note category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteType {
    #[default]
    Log,
    Idea,
    Blocker,
    Reflection,
}

impl NoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteType::Log => "log",
            NoteType::Idea => "idea",
            NoteType::Blocker => "blocker",
            NoteType::Reflection => "reflection",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "log" => Some(NoteType::Log),
            "idea" => Some(NoteType::Idea),
            "blocker" => Some(NoteType::Blocker),
            "reflection" => Some(NoteType::Reflection),
            _ => None,
        }
    }
}

impl fmt::Display for NoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directed relationship between two projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    RelatedTo,
    DependsOn,
    PartOf,
}

impl RelationshipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::RelatedTo => "related_to",
            RelationshipType::DependsOn => "depends_on",
            RelationshipType::PartOf => "part_of",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "related_to" => Some(RelationshipType::RelatedTo),
            "depends_on" => Some(RelationshipType::DependsOn),
            "part_of" => Some(RelationshipType::PartOf),
            _ => None,
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked project. Timestamps are epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub project_type: Option<String>,
    pub primary_language: Option<String>,
    pub stack: Option<String>,
    pub repo_url: Option<String>,
    pub local_path: Option<String>,
    pub scope_size: Option<String>,
    pub learning_goal: Option<String>,
    pub progress: i32,
    pub is_archived: bool,
    pub created_at: i64,
    pub last_worked_at: Option<i64>,
}

/// Project together with its tag names, as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub tags: Vec<String>,
}

/// Field values for creating a project. Unset fields fall back to template
/// defaults (when a template is named) and then to schema defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<i32>,
    /// Name of a template whose defaults fill any unset field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

/// Partial update for a project. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

impl ProjectUpdate {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.project_type.is_none()
            && self.primary_language.is_none()
            && self.stack.is_none()
            && self.repo_url.is_none()
            && self.local_path.is_none()
            && self.scope_size.is_none()
            && self.learning_goal.is_none()
            && self.progress.is_none()
            && self.is_archived.is_none()
    }
}

/// A note attached to a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub project_id: i64,
    pub note_type: NoteType,
    pub content: String,
    pub created_at: i64,
}

/// Tag with the number of projects carrying it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagCount {
    pub name: String,
    pub project_count: i64,
}

/// Edge direction relative to the project a listing was requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Outgoing,
    Incoming,
}

/// A stored relationship edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    pub id: i64,
    pub source_project_id: i64,
    pub target_project_id: i64,
    pub relationship_type: RelationshipType,
    pub created_at: i64,
}

/// Relationship as seen from one project, with the peer project's name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipView {
    #[serde(flatten)]
    pub relationship: Relationship,
    pub peer_project_name: String,
    pub direction: Direction,
}

/// A URL resource attached to a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub id: i64,
    pub project_id: i64,
    pub title: Option<String>,
    pub url: String,
    pub created_at: i64,
}

/// Default field values for creating new projects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub project_type: Option<String>,
    pub primary_language: Option<String>,
    pub stack: Option<String>,
    pub scope_size: Option<String>,
    pub learning_goal: Option<String>,
    pub created_at: i64,
}

/// Fields for creating a template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTemplate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_goal: Option<String>,
}

/// Node in the project graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: i64,
    pub name: String,
    pub status: ProjectStatus,
    pub project_type: Option<String>,
    pub primary_language: Option<String>,
}

/// Explicit (stored) edge in the project graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: i64,
    pub target: i64,
    pub relationship_type: RelationshipType,
}

/// Why two projects were grouped into an inferred edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InferredEdgeKind {
    SharedTag,
    SameLanguage,
}

/// Undirected inferred edge. `source < target` always holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferredEdge {
    pub source: i64,
    pub target: i64,
    pub kind: InferredEdgeKind,
    /// Number of shared tags for `shared_tag` edges, 1 for `same_language`.
    pub weight: i64,
}

/// Full graph payload for the graph view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub explicit_edges: Vec<GraphEdge>,
    pub inferred_edges: Vec<InferredEdge>,
}

/// Aggregate dashboard numbers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_projects: i64,
    pub idea: i64,
    pub active: i64,
    pub paused: i64,
    pub archived: i64,
    pub total_notes: i64,
    pub notes_by_type: std::collections::HashMap<String, i64>,
    pub total_tags: i64,
    pub recently_worked: Vec<Project>,
}

/// One day of activity for the heatmap. `day` is an ISO date (YYYY-MM-DD).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityDay {
    pub day: String,
    pub count: i64,
}

/// Activity streak summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streaks {
    pub current: i64,
    pub longest: i64,
    pub active_days: i64,
}
