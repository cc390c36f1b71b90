//! Directed relationships between projects.

use super::{now_ms, Database};
use crate::types::{Direction, Relationship, RelationshipType, RelationshipView};
use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};

/// Outcome of attempting to create a relationship.
#[derive(Debug)]
pub enum CreateRelationship {
    Created(Relationship),
    Duplicate,
    MissingEndpoint,
}

fn parse_relationship_row(row: &Row) -> rusqlite::Result<Relationship> {
    let rel_type: String = row.get("relationship_type")?;
    Ok(Relationship {
        id: row.get("id")?,
        source_project_id: row.get("source_project_id")?,
        target_project_id: row.get("target_project_id")?,
        relationship_type: RelationshipType::parse(&rel_type)
            .unwrap_or(RelationshipType::RelatedTo),
        created_at: row.get("created_at")?,
    })
}

impl Database {
    /// Create an edge. Reports duplicates and missing endpoints separately so
    /// the API layer can map them to 409 and 404.
    pub fn create_relationship(
        &self,
        source: i64,
        target: i64,
        rel_type: RelationshipType,
    ) -> Result<CreateRelationship> {
        let now = now_ms();
        self.with_conn(|conn| {
            let endpoints: i64 = conn.query_row(
                "SELECT COUNT(*) FROM projects WHERE id IN (?1, ?2)",
                params![source, target],
                |row| row.get(0),
            )?;
            let expected = if source == target { 1 } else { 2 };
            if endpoints < expected {
                return Ok(CreateRelationship::MissingEndpoint);
            }

            let exists: i64 = conn.query_row(
                "SELECT COUNT(*) FROM project_relationships
                 WHERE source_project_id = ?1 AND target_project_id = ?2
                   AND relationship_type = ?3",
                params![source, target, rel_type.as_str()],
                |row| row.get(0),
            )?;
            if exists > 0 {
                return Ok(CreateRelationship::Duplicate);
            }

            conn.execute(
                "INSERT INTO project_relationships
                     (source_project_id, target_project_id, relationship_type, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![source, target, rel_type.as_str(), now],
            )?;
            Ok(CreateRelationship::Created(Relationship {
                id: conn.last_insert_rowid(),
                source_project_id: source,
                target_project_id: target,
                relationship_type: rel_type,
                created_at: now,
            }))
        })
    }

    pub fn get_relationship(&self, id: i64) -> Result<Option<Relationship>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM project_relationships WHERE id = ?1")?;
            let result = stmt
                .query_row(params![id], parse_relationship_row)
                .optional()?;
            Ok(result)
        })
    }

    /// Outgoing then incoming edges for a project, each with the peer
    /// project's name.
    pub fn project_relationships(&self, project_id: i64) -> Result<Vec<RelationshipView>> {
        self.with_conn(|conn| {
            let mut views = Vec::new();

            let mut stmt = conn.prepare(
                "SELECT r.*, p.name AS peer_name
                 FROM project_relationships r
                 JOIN projects p ON p.id = r.target_project_id
                 WHERE r.source_project_id = ?1
                 ORDER BY r.created_at",
            )?;
            let outgoing = stmt
                .query_map(params![project_id], |row| {
                    let relationship = parse_relationship_row(row)?;
                    let peer_project_name: String = row.get("peer_name")?;
                    Ok(RelationshipView {
                        relationship,
                        peer_project_name,
                        direction: Direction::Outgoing,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            views.extend(outgoing);

            let mut stmt = conn.prepare(
                "SELECT r.*, p.name AS peer_name
                 FROM project_relationships r
                 JOIN projects p ON p.id = r.source_project_id
                 WHERE r.target_project_id = ?1
                 ORDER BY r.created_at",
            )?;
            let incoming = stmt
                .query_map(params![project_id], |row| {
                    let relationship = parse_relationship_row(row)?;
                    let peer_project_name: String = row.get("peer_name")?;
                    Ok(RelationshipView {
                        relationship,
                        peer_project_name,
                        direction: Direction::Incoming,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            views.extend(incoming);

            Ok(views)
        })
    }

    /// Returns false if the relationship did not exist.
    pub fn delete_relationship(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let n = conn.execute(
                "DELETE FROM project_relationships WHERE id = ?1",
                params![id],
            )?;
            Ok(n > 0)
        })
    }
}
