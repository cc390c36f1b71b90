//! Project links (URL attachments).

use super::{now_ms, Database};
use crate::types::Link;
use anyhow::Result;
use rusqlite::{params, Row};

fn parse_link_row(row: &Row) -> rusqlite::Result<Link> {
    Ok(Link {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        title: row.get("title")?,
        url: row.get("url")?,
        created_at: row.get("created_at")?,
    })
}

impl Database {
    pub fn create_link(
        &self,
        project_id: i64,
        title: Option<&str>,
        url: &str,
    ) -> Result<Link> {
        let now = now_ms();
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO project_links (project_id, title, url, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![project_id, title, url, now],
            )?;
            Ok(Link {
                id: conn.last_insert_rowid(),
                project_id,
                title: title.map(str::to_string),
                url: url.to_string(),
                created_at: now,
            })
        })
    }

    pub fn list_links(&self, project_id: i64) -> Result<Vec<Link>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM project_links WHERE project_id = ?1 ORDER BY created_at, id",
            )?;
            let links = stmt
                .query_map(params![project_id], parse_link_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(links)
        })
    }

    /// Returns false if the link did not exist.
    pub fn delete_link(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let n = conn.execute("DELETE FROM project_links WHERE id = ?1", params![id])?;
            Ok(n > 0)
        })
    }
}
