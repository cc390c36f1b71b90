//! Project CRUD, filtering, search, and touch operations.

use super::{now_ms, Database};
use crate::types::{NewProject, Project, ProjectStatus, ProjectUpdate, Template};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Filter/sort/pagination options for project listings.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    pub tag: Option<String>,
    pub query: Option<String>,
    pub include_archived: bool,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Build an ORDER BY clause from sort_by and sort_order parameters.
/// Unknown fields fall back to last_worked_at; returns a safe SQL expression.
fn build_order_clause(sort_by: Option<&str>, sort_order: Option<&str>) -> String {
    let order = match sort_order {
        Some("asc") => "ASC",
        _ => "DESC",
    };

    let field = match sort_by {
        Some("name") => "p.name COLLATE NOCASE",
        Some("created_at") => return format!("p.created_at {}", order),
        Some("status") => "p.status",
        Some("progress") => "p.progress",
        // default: most recently worked first, never-worked projects last
        _ => {
            return format!(
                "CASE WHEN p.last_worked_at IS NULL THEN 0 ELSE 1 END {order}, \
                 p.last_worked_at {order}, p.created_at DESC",
                order = order
            );
        }
    };

    format!("{} {}, p.created_at DESC", field, order)
}

pub fn parse_project_row(row: &Row) -> rusqlite::Result<Project> {
    let status: String = row.get("status")?;
    let is_archived: i64 = row.get("is_archived")?;

    Ok(Project {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        status: ProjectStatus::parse(&status).unwrap_or_default(),
        project_type: row.get("project_type")?,
        primary_language: row.get("primary_language")?,
        stack: row.get("stack")?,
        repo_url: row.get("repo_url")?,
        local_path: row.get("local_path")?,
        scope_size: row.get("scope_size")?,
        learning_goal: row.get("learning_goal")?,
        progress: row.get("progress")?,
        is_archived: is_archived != 0,
        created_at: row.get("created_at")?,
        last_worked_at: row.get("last_worked_at")?,
    })
}

/// Internal helper to get a project using an existing connection.
pub(crate) fn get_project_internal(conn: &Connection, id: i64) -> Result<Option<Project>> {
    let mut stmt = conn.prepare("SELECT * FROM projects WHERE id = ?1")?;
    let result = stmt
        .query_row(params![id], parse_project_row)
        .optional()?;
    Ok(result)
}

impl Database {
    /// Create a project, applying template defaults to unset fields.
    pub fn create_project(&self, new: &NewProject, template: Option<&Template>) -> Result<Project> {
        let now = now_ms();

        let status = new
            .status
            .or(template.and_then(|t| t.status))
            .unwrap_or_default();
        let description = new
            .description
            .clone()
            .or_else(|| template.and_then(|t| t.description.clone()));
        let project_type = new
            .project_type
            .clone()
            .or_else(|| template.and_then(|t| t.project_type.clone()));
        let primary_language = new
            .primary_language
            .clone()
            .or_else(|| template.and_then(|t| t.primary_language.clone()));
        let stack = new
            .stack
            .clone()
            .or_else(|| template.and_then(|t| t.stack.clone()));
        let scope_size = new
            .scope_size
            .clone()
            .or_else(|| template.and_then(|t| t.scope_size.clone()));
        let learning_goal = new
            .learning_goal
            .clone()
            .or_else(|| template.and_then(|t| t.learning_goal.clone()));
        let progress = new.progress.unwrap_or(0);

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO projects (name, description, status, project_type, primary_language,
                                       stack, repo_url, local_path, scope_size, learning_goal,
                                       progress, is_archived, created_at, last_worked_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, 0, ?12, NULL)",
                params![
                    new.name,
                    description,
                    status.as_str(),
                    project_type,
                    primary_language,
                    stack,
                    new.repo_url,
                    new.local_path,
                    scope_size,
                    learning_goal,
                    progress,
                    now,
                ],
            )?;
            let id = conn.last_insert_rowid();
            get_project_internal(conn, id)?
                .ok_or_else(|| anyhow::anyhow!("project {} vanished after insert", id))
        })
    }

    pub fn get_project(&self, id: i64) -> Result<Option<Project>> {
        self.with_conn(|conn| get_project_internal(conn, id))
    }

    /// List projects with optional filters, sorting, and pagination.
    pub fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>> {
        self.with_conn(|conn| {
            let mut sql = String::from("SELECT DISTINCT p.* FROM projects p");
            let mut where_clauses: Vec<String> = Vec::new();
            let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

            if filter.tag.is_some() {
                sql.push_str(
                    " JOIN project_tags pt ON pt.project_id = p.id
                      JOIN tags tg ON tg.id = pt.tag_id",
                );
            }
            if filter.query.is_some() {
                sql.push_str(
                    " LEFT JOIN project_tags qt ON qt.project_id = p.id
                      LEFT JOIN tags qtag ON qtag.id = qt.tag_id
                      LEFT JOIN project_notes qn ON qn.project_id = p.id",
                );
            }

            if let Some(status) = filter.status {
                where_clauses.push(format!("p.status = ?{}", params_vec.len() + 1));
                params_vec.push(Box::new(status.as_str().to_string()));
            }
            if !filter.include_archived {
                where_clauses.push("p.is_archived = 0".to_string());
            }

            if let Some(ref tag) = filter.tag {
                where_clauses.push(format!("tg.name = ?{}", params_vec.len() + 1));
                params_vec.push(Box::new(tag.clone()));
            }

            if let Some(ref q) = filter.query {
                let like = format!("%{}%", q);
                let base = params_vec.len();
                where_clauses.push(format!(
                    "(p.name LIKE ?{n1} OR p.description LIKE ?{n1}
                      OR p.primary_language LIKE ?{n1} OR p.stack LIKE ?{n1}
                      OR p.learning_goal LIKE ?{n1} OR p.project_type LIKE ?{n1}
                      OR qtag.name LIKE ?{n1} OR qn.content LIKE ?{n1})",
                    n1 = base + 1
                ));
                params_vec.push(Box::new(like));
            }

            if !where_clauses.is_empty() {
                sql.push_str(" WHERE ");
                sql.push_str(&where_clauses.join(" AND "));
            }

            sql.push_str(" ORDER BY ");
            sql.push_str(&build_order_clause(
                filter.sort_by.as_deref(),
                filter.sort_order.as_deref(),
            ));

            let limit = filter.limit.unwrap_or(100).clamp(1, 100);
            let offset = filter.offset.unwrap_or(0).max(0);
            sql.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));

            let params_refs: Vec<&dyn rusqlite::ToSql> =
                params_vec.iter().map(|b| b.as_ref()).collect();

            let mut stmt = conn.prepare(&sql)?;
            let projects = stmt
                .query_map(params_refs.as_slice(), parse_project_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(projects)
        })
    }

    /// Apply a partial update. Returns the updated project, or None if it
    /// does not exist.
    pub fn update_project(&self, id: i64, update: &ProjectUpdate) -> Result<Option<Project>> {
        self.with_conn(|conn| {
            if get_project_internal(conn, id)?.is_none() {
                return Ok(None);
            }

            let mut sets: Vec<String> = Vec::new();
            let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

            let push = |col: &str, val: Box<dyn rusqlite::ToSql>, sets: &mut Vec<String>, params_vec: &mut Vec<Box<dyn rusqlite::ToSql>>| {
                params_vec.push(val);
                sets.push(format!("{} = ?{}", col, params_vec.len()));
            };

            if let Some(ref v) = update.name {
                push("name", Box::new(v.clone()), &mut sets, &mut params_vec);
            }
            if let Some(ref v) = update.description {
                push("description", Box::new(v.clone()), &mut sets, &mut params_vec);
            }
            if let Some(v) = update.status {
                push("status", Box::new(v.as_str().to_string()), &mut sets, &mut params_vec);
            }
            if let Some(ref v) = update.project_type {
                push("project_type", Box::new(v.clone()), &mut sets, &mut params_vec);
            }
            if let Some(ref v) = update.primary_language {
                push("primary_language", Box::new(v.clone()), &mut sets, &mut params_vec);
            }
            if let Some(ref v) = update.stack {
                push("stack", Box::new(v.clone()), &mut sets, &mut params_vec);
            }
            if let Some(ref v) = update.repo_url {
                push("repo_url", Box::new(v.clone()), &mut sets, &mut params_vec);
            }
            if let Some(ref v) = update.local_path {
                push("local_path", Box::new(v.clone()), &mut sets, &mut params_vec);
            }
            if let Some(ref v) = update.scope_size {
                push("scope_size", Box::new(v.clone()), &mut sets, &mut params_vec);
            }
            if let Some(ref v) = update.learning_goal {
                push("learning_goal", Box::new(v.clone()), &mut sets, &mut params_vec);
            }
            if let Some(v) = update.progress {
                push("progress", Box::new(v), &mut sets, &mut params_vec);
            }
            if let Some(v) = update.is_archived {
                push("is_archived", Box::new(v as i64), &mut sets, &mut params_vec);
            }

            if !sets.is_empty() {
                params_vec.push(Box::new(id));
                let sql = format!(
                    "UPDATE projects SET {} WHERE id = ?{}",
                    sets.join(", "),
                    params_vec.len()
                );
                let params_refs: Vec<&dyn rusqlite::ToSql> =
                    params_vec.iter().map(|b| b.as_ref()).collect();
                conn.execute(&sql, params_refs.as_slice())?;
            }

            get_project_internal(conn, id)
        })
    }

    /// Delete a project. Notes, tags, links, and relationships cascade.
    /// Returns false if the project did not exist.
    pub fn delete_project(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let n = conn.execute("DELETE FROM projects WHERE id = ?1", params![id])?;
            Ok(n > 0)
        })
    }

    /// Set last_worked_at to now. Returns the new timestamp, or None if the
    /// project does not exist.
    pub fn touch_project(&self, id: i64) -> Result<Option<i64>> {
        let now = now_ms();
        self.with_conn(|conn| {
            let n = conn.execute(
                "UPDATE projects SET last_worked_at = ?1 WHERE id = ?2",
                params![now, id],
            )?;
            Ok(if n > 0 { Some(now) } else { None })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_sort_keeps_created_at_tiebreak() {
        let clause = build_order_clause(Some("name"), Some("asc"));
        assert_eq!(clause, "p.name COLLATE NOCASE ASC, p.created_at DESC");
    }

    #[test]
    fn created_at_sort_has_no_redundant_tiebreak() {
        let clause = build_order_clause(Some("created_at"), Some("asc"));
        assert_eq!(clause, "p.created_at ASC");
    }

    #[test]
    fn default_sort_puts_never_worked_last() {
        let clause = build_order_clause(None, None);
        assert!(clause.starts_with("CASE WHEN p.last_worked_at IS NULL"));
        assert!(clause.ends_with("p.created_at DESC"));
    }
}
