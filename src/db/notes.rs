//! Project notes.

use super::{now_ms, Database};
use crate::types::{Note, NoteType};
use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};

fn parse_note_row(row: &Row) -> rusqlite::Result<Note> {
    let note_type: String = row.get("note_type")?;
    Ok(Note {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        note_type: NoteType::parse(&note_type).unwrap_or_default(),
        content: row.get("content")?,
        created_at: row.get("created_at")?,
    })
}

impl Database {
    pub fn create_note(
        &self,
        project_id: i64,
        note_type: NoteType,
        content: &str,
    ) -> Result<Note> {
        let now = now_ms();
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO project_notes (project_id, note_type, content, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![project_id, note_type.as_str(), content, now],
            )?;
            let id = conn.last_insert_rowid();
            Ok(Note {
                id,
                project_id,
                note_type,
                content: content.to_string(),
                created_at: now,
            })
        })
    }

    pub fn get_note(&self, id: i64) -> Result<Option<Note>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM project_notes WHERE id = ?1")?;
            let result = stmt.query_row(params![id], parse_note_row).optional()?;
            Ok(result)
        })
    }

    /// Notes for a project, newest first, optionally filtered by type and
    /// capped for the recent-notes view.
    pub fn list_notes(
        &self,
        project_id: i64,
        note_type: Option<NoteType>,
        limit: Option<i64>,
    ) -> Result<Vec<Note>> {
        self.with_conn(|conn| {
            let mut sql = String::from("SELECT * FROM project_notes WHERE project_id = ?1");
            let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(project_id)];

            if let Some(t) = note_type {
                params_vec.push(Box::new(t.as_str().to_string()));
                sql.push_str(&format!(" AND note_type = ?{}", params_vec.len()));
            }

            sql.push_str(" ORDER BY created_at DESC, id DESC");
            if let Some(limit) = limit {
                sql.push_str(&format!(" LIMIT {}", limit.clamp(1, 500)));
            }

            let params_refs: Vec<&dyn rusqlite::ToSql> =
                params_vec.iter().map(|b| b.as_ref()).collect();
            let mut stmt = conn.prepare(&sql)?;
            let notes = stmt
                .query_map(params_refs.as_slice(), parse_note_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(notes)
        })
    }

    /// Returns false if the note did not exist.
    pub fn delete_note(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let n = conn.execute("DELETE FROM project_notes WHERE id = ?1", params![id])?;
            Ok(n > 0)
        })
    }
}
