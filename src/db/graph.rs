//! Graph view: explicit relationship edges plus inferred connections.

use super::Database;
use crate::types::{
    Graph, GraphEdge, GraphNode, InferredEdge, InferredEdgeKind, ProjectStatus, RelationshipType,
};
use anyhow::Result;
use rusqlite::params;
use std::collections::{HashMap, HashSet};

impl Database {
    /// Full graph payload: non-archived projects as nodes, their stored
    /// relationships as explicit edges, and inferred edges from shared tags
    /// and matching primary language. Inferred edges are undirected
    /// (source < target), deduplicated, and suppressed when an explicit edge
    /// already joins the pair. Pairwise grouping is quadratic in the number
    /// of projects, which is fine at personal-tracker scale.
    pub fn graph(&self) -> Result<Graph> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, status, project_type, primary_language
                 FROM projects WHERE is_archived = 0 ORDER BY id",
            )?;
            let nodes = stmt
                .query_map([], |row| {
                    let status: String = row.get("status")?;
                    Ok(GraphNode {
                        id: row.get("id")?,
                        name: row.get("name")?,
                        status: ProjectStatus::parse(&status).unwrap_or_default(),
                        project_type: row.get("project_type")?,
                        primary_language: row.get("primary_language")?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            let mut stmt = conn.prepare(
                "SELECT r.source_project_id, r.target_project_id, r.relationship_type
                 FROM project_relationships r
                 JOIN projects s ON s.id = r.source_project_id AND s.is_archived = 0
                 JOIN projects t ON t.id = r.target_project_id AND t.is_archived = 0
                 ORDER BY r.id",
            )?;
            let explicit_edges = stmt
                .query_map([], |row| {
                    let rel_type: String = row.get(2)?;
                    Ok(GraphEdge {
                        source: row.get(0)?,
                        target: row.get(1)?,
                        relationship_type: RelationshipType::parse(&rel_type)
                            .unwrap_or(RelationshipType::RelatedTo),
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            // Pairs already joined explicitly, in canonical (low, high) form.
            let explicit_pairs: HashSet<(i64, i64)> = explicit_edges
                .iter()
                .map(|e| canonical(e.source, e.target))
                .collect();

            let mut tags_by_project: HashMap<i64, HashSet<String>> = HashMap::new();
            for node in &nodes {
                let mut stmt = conn.prepare(
                    "SELECT t.name FROM tags t
                     JOIN project_tags pt ON pt.tag_id = t.id
                     WHERE pt.project_id = ?1",
                )?;
                let tags: HashSet<String> = stmt
                    .query_map(params![node.id], |row| row.get(0))?
                    .collect::<rusqlite::Result<_>>()?;
                tags_by_project.insert(node.id, tags);
            }

            let mut inferred_edges = Vec::new();
            for (i, a) in nodes.iter().enumerate() {
                for b in nodes.iter().skip(i + 1) {
                    let pair = canonical(a.id, b.id);
                    if explicit_pairs.contains(&pair) {
                        continue;
                    }

                    let shared = tags_by_project
                        .get(&a.id)
                        .and_then(|at| {
                            tags_by_project.get(&b.id).map(|bt| at.intersection(bt).count())
                        })
                        .unwrap_or(0);
                    if shared > 0 {
                        inferred_edges.push(InferredEdge {
                            source: pair.0,
                            target: pair.1,
                            kind: InferredEdgeKind::SharedTag,
                            weight: shared as i64,
                        });
                    }

                    let same_language = match (&a.primary_language, &b.primary_language) {
                        (Some(la), Some(lb)) => la.eq_ignore_ascii_case(lb),
                        _ => false,
                    };
                    if same_language {
                        inferred_edges.push(InferredEdge {
                            source: pair.0,
                            target: pair.1,
                            kind: InferredEdgeKind::SameLanguage,
                            weight: 1,
                        });
                    }
                }
            }

            Ok(Graph {
                nodes,
                explicit_edges,
                inferred_edges,
            })
        })
    }
}

fn canonical(a: i64, b: i64) -> (i64, i64) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
