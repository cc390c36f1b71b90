//! Integration tests for the database layer.
//!
//! These tests verify the core database operations using an in-memory
//! SQLite database, organized by entity.

use contextgrid::db::projects::ProjectFilter;
use contextgrid::db::relationships::CreateRelationship;
use contextgrid::db::Database;
use contextgrid::types::{
    NewProject, NewTemplate, NoteType, ProjectStatus, ProjectUpdate, RelationshipType,
};

/// Helper to create a fresh in-memory database for testing.
fn setup_db() -> Database {
    Database::open_in_memory().expect("Failed to create in-memory database")
}

/// Helper to create a project with just a name.
fn add_project(db: &Database, name: &str) -> i64 {
    let new = NewProject {
        name: name.to_string(),
        ..Default::default()
    };
    db.create_project(&new, None)
        .expect("Failed to create project")
        .id
}

mod project_tests {
    use super::*;

    #[test]
    fn create_project_applies_defaults() {
        let db = setup_db();

        let new = NewProject {
            name: "loom".to_string(),
            ..Default::default()
        };
        let project = db.create_project(&new, None).expect("create failed");

        assert_eq!(project.name, "loom");
        assert_eq!(project.status, ProjectStatus::Idea);
        assert_eq!(project.progress, 0);
        assert!(!project.is_archived);
        assert!(project.created_at > 0);
        assert!(project.last_worked_at.is_none());
    }

    #[test]
    fn create_project_from_template_fills_unset_fields() {
        let db = setup_db();

        let template = db
            .create_template(&NewTemplate {
                name: "rust-cli".to_string(),
                status: Some(ProjectStatus::Active),
                project_type: Some("cli".to_string()),
                primary_language: Some("Rust".to_string()),
                ..Default::default()
            })
            .expect("create template failed")
            .expect("duplicate template name");

        let new = NewProject {
            name: "grepper".to_string(),
            // explicit field wins over the template default
            project_type: Some("library".to_string()),
            ..Default::default()
        };
        let project = db
            .create_project(&new, Some(&template))
            .expect("create failed");

        assert_eq!(project.status, ProjectStatus::Active);
        assert_eq!(project.project_type.as_deref(), Some("library"));
        assert_eq!(project.primary_language.as_deref(), Some("Rust"));
    }

    #[test]
    fn get_missing_project_returns_none() {
        let db = setup_db();
        assert!(db.get_project(999).expect("get failed").is_none());
    }

    #[test]
    fn update_project_changes_only_set_fields() {
        let db = setup_db();
        let id = add_project(&db, "loom");

        let update = ProjectUpdate {
            status: Some(ProjectStatus::Paused),
            progress: Some(40),
            ..Default::default()
        };
        let project = db
            .update_project(id, &update)
            .expect("update failed")
            .expect("project missing");

        assert_eq!(project.name, "loom");
        assert_eq!(project.status, ProjectStatus::Paused);
        assert_eq!(project.progress, 40);
    }

    #[test]
    fn update_missing_project_returns_none() {
        let db = setup_db();
        let update = ProjectUpdate {
            name: Some("ghost".to_string()),
            ..Default::default()
        };
        assert!(db.update_project(42, &update).expect("update failed").is_none());
    }

    #[test]
    fn delete_project_cascades_to_attachments() {
        let db = setup_db();
        let id = add_project(&db, "loom");
        let other = add_project(&db, "warp");

        db.create_note(id, NoteType::Log, "shipped v0.1").expect("note failed");
        db.add_tag(id, "rust").expect("tag failed");
        db.create_link(id, Some("docs"), "https://example.com").expect("link failed");
        db.create_relationship(id, other, RelationshipType::RelatedTo)
            .expect("rel failed");

        assert!(db.delete_project(id).expect("delete failed"));
        assert!(db.get_project(id).expect("get failed").is_none());
        assert!(db.list_notes(id, None, None).expect("notes failed").is_empty());
        assert!(db.project_tags(id).expect("tags failed").is_empty());
        assert!(db.list_links(id).expect("links failed").is_empty());
        assert!(db.project_relationships(other).expect("rels failed").is_empty());
    }

    #[test]
    fn delete_missing_project_returns_false() {
        let db = setup_db();
        assert!(!db.delete_project(7).expect("delete failed"));
    }

    #[test]
    fn touch_sets_last_worked_at() {
        let db = setup_db();
        let id = add_project(&db, "loom");

        let ts = db.touch_project(id).expect("touch failed").expect("missing");
        let project = db.get_project(id).expect("get failed").expect("missing");

        assert_eq!(project.last_worked_at, Some(ts));
        assert!(db.touch_project(999).expect("touch failed").is_none());
    }
}

mod listing_tests {
    use super::*;

    #[test]
    fn list_excludes_archived_by_default() {
        let db = setup_db();
        let a = add_project(&db, "alpha");
        let b = add_project(&db, "beta");

        db.update_project(
            b,
            &ProjectUpdate {
                is_archived: Some(true),
                ..Default::default()
            },
        )
        .expect("update failed");

        let visible = db.list_projects(&ProjectFilter::default()).expect("list failed");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, a);

        let all = db
            .list_projects(&ProjectFilter {
                include_archived: true,
                ..Default::default()
            })
            .expect("list failed");
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn status_filter_still_excludes_archived() {
        let db = setup_db();
        let a = add_project(&db, "alpha");
        let b = add_project(&db, "beta");

        for id in [a, b] {
            db.update_project(
                id,
                &ProjectUpdate {
                    status: Some(ProjectStatus::Active),
                    ..Default::default()
                },
            )
            .expect("update failed");
        }
        db.update_project(
            b,
            &ProjectUpdate {
                is_archived: Some(true),
                ..Default::default()
            },
        )
        .expect("update failed");

        let active = db
            .list_projects(&ProjectFilter {
                status: Some(ProjectStatus::Active),
                ..Default::default()
            })
            .expect("list failed");
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, a);

        let with_archived = db
            .list_projects(&ProjectFilter {
                status: Some(ProjectStatus::Active),
                include_archived: true,
                ..Default::default()
            })
            .expect("list failed");
        assert_eq!(with_archived.len(), 2);
    }

    #[test]
    fn list_filters_by_status_and_tag() {
        let db = setup_db();
        let a = add_project(&db, "alpha");
        let b = add_project(&db, "beta");

        db.update_project(
            a,
            &ProjectUpdate {
                status: Some(ProjectStatus::Active),
                ..Default::default()
            },
        )
        .expect("update failed");
        db.add_tag(b, "homelab").expect("tag failed");

        let active = db
            .list_projects(&ProjectFilter {
                status: Some(ProjectStatus::Active),
                ..Default::default()
            })
            .expect("list failed");
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, a);

        let tagged = db
            .list_projects(&ProjectFilter {
                tag: Some("homelab".to_string()),
                ..Default::default()
            })
            .expect("list failed");
        assert_eq!(tagged.len(), 1);
        assert_eq!(tagged[0].id, b);
    }

    #[test]
    fn default_sort_places_never_worked_last() {
        let db = setup_db();
        let worked = add_project(&db, "worked");
        let fresh = add_project(&db, "fresh");
        db.touch_project(worked).expect("touch failed");

        let projects = db.list_projects(&ProjectFilter::default()).expect("list failed");
        assert_eq!(projects[0].id, worked);
        assert_eq!(projects[1].id, fresh);
    }

    #[test]
    fn unknown_sort_field_falls_back_to_default() {
        let db = setup_db();
        add_project(&db, "alpha");

        let projects = db
            .list_projects(&ProjectFilter {
                sort_by: Some("evil; DROP TABLE projects".to_string()),
                sort_order: Some("sideways".to_string()),
                ..Default::default()
            })
            .expect("list failed");
        assert_eq!(projects.len(), 1);
    }

    #[test]
    fn limit_is_clamped_and_offset_pages() {
        let db = setup_db();
        for i in 0..5 {
            add_project(&db, &format!("p{}", i));
        }

        let page = db
            .list_projects(&ProjectFilter {
                sort_by: Some("name".to_string()),
                sort_order: Some("asc".to_string()),
                limit: Some(2),
                offset: Some(2),
                ..Default::default()
            })
            .expect("list failed");
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name, "p2");

        // out-of-range limit clamps instead of erroring
        let clamped = db
            .list_projects(&ProjectFilter {
                limit: Some(10_000),
                ..Default::default()
            })
            .expect("list failed");
        assert_eq!(clamped.len(), 5);
    }

    #[test]
    fn search_matches_fields_tags_and_notes() {
        let db = setup_db();
        let by_name = add_project(&db, "quartz scheduler");
        let by_tag = add_project(&db, "beta");
        let by_note = add_project(&db, "gamma");
        add_project(&db, "unrelated");

        db.add_tag(by_tag, "quartz").expect("tag failed");
        db.create_note(by_note, NoteType::Idea, "try quartz crystals")
            .expect("note failed");

        let mut found: Vec<i64> = db
            .list_projects(&ProjectFilter {
                query: Some("quartz".to_string()),
                ..Default::default()
            })
            .expect("search failed")
            .into_iter()
            .map(|p| p.id)
            .collect();
        found.sort();

        assert_eq!(found, vec![by_name, by_tag, by_note]);
    }
}

mod tag_tests {
    use super::*;

    #[test]
    fn add_tag_is_idempotent() {
        let db = setup_db();
        let id = add_project(&db, "loom");

        assert!(db.add_tag(id, "rust").expect("tag failed"));
        assert!(!db.add_tag(id, "rust").expect("tag failed"));
        assert_eq!(db.project_tags(id).expect("tags failed"), vec!["rust"]);
    }

    #[test]
    fn remove_tag_reports_missing_attachment() {
        let db = setup_db();
        let id = add_project(&db, "loom");

        db.add_tag(id, "rust").expect("tag failed");
        assert!(db.remove_tag(id, "rust").expect("remove failed"));
        assert!(!db.remove_tag(id, "rust").expect("remove failed"));
        assert!(!db.remove_tag(id, "never-existed").expect("remove failed"));
    }

    #[test]
    fn tag_counts_span_projects() {
        let db = setup_db();
        let a = add_project(&db, "alpha");
        let b = add_project(&db, "beta");

        db.add_tag(a, "rust").expect("tag failed");
        db.add_tag(b, "rust").expect("tag failed");
        db.add_tag(b, "web").expect("tag failed");

        let tags = db.list_tags().expect("list failed");
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "rust");
        assert_eq!(tags[0].project_count, 2);
        assert_eq!(tags[1].name, "web");
        assert_eq!(tags[1].project_count, 1);
    }
}

mod note_tests {
    use super::*;

    #[test]
    fn notes_list_newest_first_with_type_filter() {
        let db = setup_db();
        let id = add_project(&db, "loom");

        db.create_note(id, NoteType::Log, "first").expect("note failed");
        db.create_note(id, NoteType::Blocker, "stuck on tokio").expect("note failed");
        db.create_note(id, NoteType::Log, "second").expect("note failed");

        let all = db.list_notes(id, None, None).expect("list failed");
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].content, "second");

        let blockers = db
            .list_notes(id, Some(NoteType::Blocker), None)
            .expect("list failed");
        assert_eq!(blockers.len(), 1);
        assert_eq!(blockers[0].content, "stuck on tokio");

        let recent = db.list_notes(id, None, Some(2)).expect("list failed");
        assert_eq!(recent.len(), 2);
    }

    #[test]
    fn delete_note_roundtrip() {
        let db = setup_db();
        let id = add_project(&db, "loom");
        let note = db.create_note(id, NoteType::Log, "bye").expect("note failed");

        assert!(db.get_note(note.id).expect("get failed").is_some());
        assert!(db.delete_note(note.id).expect("delete failed"));
        assert!(db.get_note(note.id).expect("get failed").is_none());
        assert!(!db.delete_note(note.id).expect("delete failed"));
    }
}

mod relationship_tests {
    use super::*;

    #[test]
    fn duplicate_edge_is_rejected() {
        let db = setup_db();
        let a = add_project(&db, "alpha");
        let b = add_project(&db, "beta");

        let first = db
            .create_relationship(a, b, RelationshipType::DependsOn)
            .expect("rel failed");
        assert!(matches!(first, CreateRelationship::Created(_)));

        let second = db
            .create_relationship(a, b, RelationshipType::DependsOn)
            .expect("rel failed");
        assert!(matches!(second, CreateRelationship::Duplicate));

        // same pair, different type is a distinct edge
        let third = db
            .create_relationship(a, b, RelationshipType::RelatedTo)
            .expect("rel failed");
        assert!(matches!(third, CreateRelationship::Created(_)));
    }

    #[test]
    fn missing_endpoint_is_reported() {
        let db = setup_db();
        let a = add_project(&db, "alpha");

        let result = db
            .create_relationship(a, 999, RelationshipType::PartOf)
            .expect("rel failed");
        assert!(matches!(result, CreateRelationship::MissingEndpoint));
    }

    #[test]
    fn project_relationships_include_both_directions() {
        let db = setup_db();
        let a = add_project(&db, "alpha");
        let b = add_project(&db, "beta");
        let c = add_project(&db, "gamma");

        db.create_relationship(a, b, RelationshipType::DependsOn).expect("rel failed");
        db.create_relationship(c, a, RelationshipType::PartOf).expect("rel failed");

        let views = db.project_relationships(a).expect("list failed");
        assert_eq!(views.len(), 2);

        let names: Vec<&str> = views.iter().map(|v| v.peer_project_name.as_str()).collect();
        assert!(names.contains(&"beta"));
        assert!(names.contains(&"gamma"));
    }
}

mod template_tests {
    use super::*;

    #[test]
    fn duplicate_template_name_is_rejected() {
        let db = setup_db();

        let new = NewTemplate {
            name: "rust-cli".to_string(),
            ..Default::default()
        };
        assert!(db.create_template(&new).expect("create failed").is_some());
        assert!(db.create_template(&new).expect("create failed").is_none());
    }

    #[test]
    fn template_lookup_and_delete_by_name() {
        let db = setup_db();

        db.create_template(&NewTemplate {
            name: "homelab".to_string(),
            scope_size: Some("long-haul".to_string()),
            ..Default::default()
        })
        .expect("create failed");

        let template = db
            .get_template("homelab")
            .expect("get failed")
            .expect("missing");
        assert_eq!(template.scope_size.as_deref(), Some("long-haul"));

        assert!(db.delete_template("homelab").expect("delete failed"));
        assert!(db.get_template("homelab").expect("get failed").is_none());
        assert!(!db.delete_template("homelab").expect("delete failed"));
    }
}
