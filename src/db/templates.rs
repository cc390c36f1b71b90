//! Project templates: named default field sets.

use super::{now_ms, Database};
use crate::types::{NewTemplate, ProjectStatus, Template};
use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};

fn parse_template_row(row: &Row) -> rusqlite::Result<Template> {
    let status: Option<String> = row.get("status")?;
    Ok(Template {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        status: status.as_deref().and_then(ProjectStatus::parse),
        project_type: row.get("project_type")?,
        primary_language: row.get("primary_language")?,
        stack: row.get("stack")?,
        scope_size: row.get("scope_size")?,
        learning_goal: row.get("learning_goal")?,
        created_at: row.get("created_at")?,
    })
}

impl Database {
    /// Create a template. Returns None when the name is already taken.
    pub fn create_template(&self, new: &NewTemplate) -> Result<Option<Template>> {
        let now = now_ms();
        self.with_conn(|conn| {
            let exists: i64 = conn.query_row(
                "SELECT COUNT(*) FROM templates WHERE name = ?1",
                params![new.name],
                |row| row.get(0),
            )?;
            if exists > 0 {
                return Ok(None);
            }

            conn.execute(
                "INSERT INTO templates (name, description, status, project_type,
                                        primary_language, stack, scope_size, learning_goal,
                                        created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    new.name,
                    new.description,
                    new.status.map(|s| s.as_str()),
                    new.project_type,
                    new.primary_language,
                    new.stack,
                    new.scope_size,
                    new.learning_goal,
                    now,
                ],
            )?;
            let id = conn.last_insert_rowid();
            let mut stmt = conn.prepare("SELECT * FROM templates WHERE id = ?1")?;
            let template = stmt.query_row(params![id], parse_template_row)?;
            Ok(Some(template))
        })
    }

    pub fn get_template(&self, name: &str) -> Result<Option<Template>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM templates WHERE name = ?1")?;
            let result = stmt
                .query_row(params![name], parse_template_row)
                .optional()?;
            Ok(result)
        })
    }

    pub fn list_templates(&self) -> Result<Vec<Template>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM templates ORDER BY name")?;
            let templates = stmt
                .query_map([], parse_template_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(templates)
        })
    }

    /// Returns false if no template had the name.
    pub fn delete_template(&self, name: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let n = conn.execute("DELETE FROM templates WHERE name = ?1", params![name])?;
            Ok(n > 0)
        })
    }
}
