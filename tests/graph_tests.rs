//! Tests for the graph view: explicit edges, inferred edges, suppression.

use contextgrid::db::Database;
use contextgrid::types::{
    InferredEdgeKind, NewProject, ProjectUpdate, RelationshipType,
};

fn setup_db() -> Database {
    Database::open_in_memory().expect("Failed to create in-memory database")
}

fn add_project(db: &Database, name: &str, language: Option<&str>) -> i64 {
    let new = NewProject {
        name: name.to_string(),
        primary_language: language.map(str::to_string),
        ..Default::default()
    };
    db.create_project(&new, None)
        .expect("Failed to create project")
        .id
}

#[test]
fn shared_tags_produce_weighted_inferred_edges() {
    let db = setup_db();
    let a = add_project(&db, "alpha", None);
    let b = add_project(&db, "beta", None);
    add_project(&db, "loner", None);

    db.add_tag(a, "rust").expect("tag failed");
    db.add_tag(a, "web").expect("tag failed");
    db.add_tag(b, "rust").expect("tag failed");
    db.add_tag(b, "web").expect("tag failed");

    let graph = db.graph().expect("graph failed");
    assert_eq!(graph.nodes.len(), 3);
    assert!(graph.explicit_edges.is_empty());
    assert_eq!(graph.inferred_edges.len(), 1);

    let edge = &graph.inferred_edges[0];
    assert_eq!(edge.kind, InferredEdgeKind::SharedTag);
    assert_eq!(edge.weight, 2);
    assert_eq!((edge.source, edge.target), (a, b));
}

#[test]
fn same_language_produces_inferred_edge() {
    let db = setup_db();
    let a = add_project(&db, "alpha", Some("Rust"));
    let b = add_project(&db, "beta", Some("rust"));
    add_project(&db, "gamma", Some("Python"));
    add_project(&db, "delta", None);

    let graph = db.graph().expect("graph failed");
    let langs: Vec<_> = graph
        .inferred_edges
        .iter()
        .filter(|e| e.kind == InferredEdgeKind::SameLanguage)
        .collect();

    // case-insensitive match, NULL languages never pair
    assert_eq!(langs.len(), 1);
    assert_eq!((langs[0].source, langs[0].target), (a, b));
}

#[test]
fn explicit_edge_suppresses_inferred_pair() {
    let db = setup_db();
    let a = add_project(&db, "alpha", Some("Rust"));
    let b = add_project(&db, "beta", Some("Rust"));

    db.add_tag(a, "cli").expect("tag failed");
    db.add_tag(b, "cli").expect("tag failed");
    db.create_relationship(a, b, RelationshipType::DependsOn)
        .expect("rel failed");

    let graph = db.graph().expect("graph failed");
    assert_eq!(graph.explicit_edges.len(), 1);
    assert!(graph.inferred_edges.is_empty());
}

#[test]
fn archived_projects_are_excluded_from_graph() {
    let db = setup_db();
    let a = add_project(&db, "alpha", Some("Rust"));
    let b = add_project(&db, "beta", Some("Rust"));
    db.create_relationship(a, b, RelationshipType::RelatedTo)
        .expect("rel failed");

    db.update_project(
        b,
        &ProjectUpdate {
            is_archived: Some(true),
            ..Default::default()
        },
    )
    .expect("update failed");

    let graph = db.graph().expect("graph failed");
    assert_eq!(graph.nodes.len(), 1);
    assert!(graph.explicit_edges.is_empty());
    assert!(graph.inferred_edges.is_empty());
}
