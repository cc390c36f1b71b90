//! Tag storage: get-or-create, attach/detach, and counts.

use super::Database;
use crate::types::TagCount;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

fn get_or_create_tag(conn: &Connection, name: &str) -> Result<i64> {
    conn.execute(
        "INSERT OR IGNORE INTO tags (name) VALUES (?1)",
        params![name],
    )?;
    let id: i64 = conn.query_row(
        "SELECT id FROM tags WHERE name = ?1",
        params![name],
        |row| row.get(0),
    )?;
    Ok(id)
}

impl Database {
    /// All tags with the number of projects carrying each.
    pub fn list_tags(&self) -> Result<Vec<TagCount>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT t.name, COUNT(pt.project_id) AS project_count
                 FROM tags t
                 LEFT JOIN project_tags pt ON pt.tag_id = t.id
                 GROUP BY t.id
                 ORDER BY project_count DESC, t.name",
            )?;
            let tags = stmt
                .query_map([], |row| {
                    Ok(TagCount {
                        name: row.get(0)?,
                        project_count: row.get(1)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(tags)
        })
    }

    /// Tag names attached to a project, alphabetical.
    pub fn project_tags(&self, project_id: i64) -> Result<Vec<String>> {
        self.with_conn(|conn| project_tags_internal(conn, project_id))
    }

    /// Attach a tag (created if needed) to a project. Returns true when the
    /// attachment is new, false when the project already had the tag.
    pub fn add_tag(&self, project_id: i64, name: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let tag_id = get_or_create_tag(conn, name)?;
            let n = conn.execute(
                "INSERT OR IGNORE INTO project_tags (project_id, tag_id) VALUES (?1, ?2)",
                params![project_id, tag_id],
            )?;
            Ok(n > 0)
        })
    }

    /// Detach a tag from a project. Returns false if it was not attached.
    pub fn remove_tag(&self, project_id: i64, name: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let tag_id: Option<i64> = conn
                .query_row(
                    "SELECT id FROM tags WHERE name = ?1",
                    params![name],
                    |row| row.get(0),
                )
                .optional()?;
            let Some(tag_id) = tag_id else {
                return Ok(false);
            };
            let n = conn.execute(
                "DELETE FROM project_tags WHERE project_id = ?1 AND tag_id = ?2",
                params![project_id, tag_id],
            )?;
            Ok(n > 0)
        })
    }
}

pub(crate) fn project_tags_internal(conn: &Connection, project_id: i64) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT t.name FROM tags t
         JOIN project_tags pt ON pt.tag_id = t.id
         WHERE pt.project_id = ?1
         ORDER BY t.name",
    )?;
    let tags = stmt
        .query_map(params![project_id], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(tags)
}
