//! Tests for dashboard stats, the activity heatmap, and streaks.

use contextgrid::db::Database;
use contextgrid::types::{NewProject, NoteType, ProjectStatus, ProjectUpdate};

fn setup_db() -> Database {
    Database::open_in_memory().expect("Failed to create in-memory database")
}

fn add_project(db: &Database, name: &str) -> i64 {
    let new = NewProject {
        name: name.to_string(),
        ..Default::default()
    };
    db.create_project(&new, None)
        .expect("Failed to create project")
        .id
}

#[test]
fn dashboard_counts_statuses_notes_and_tags() {
    let db = setup_db();
    let a = add_project(&db, "alpha");
    let b = add_project(&db, "beta");
    add_project(&db, "gamma");

    db.update_project(
        a,
        &ProjectUpdate {
            status: Some(ProjectStatus::Active),
            ..Default::default()
        },
    )
    .expect("update failed");

    db.create_note(a, NoteType::Log, "one").expect("note failed");
    db.create_note(a, NoteType::Blocker, "two").expect("note failed");
    db.create_note(b, NoteType::Log, "three").expect("note failed");
    db.add_tag(a, "rust").expect("tag failed");

    let stats = db.dashboard_stats().expect("stats failed");
    assert_eq!(stats.total_projects, 3);
    assert_eq!(stats.active, 1);
    assert_eq!(stats.idea, 2);
    assert_eq!(stats.total_notes, 3);
    assert_eq!(stats.notes_by_type.get("log"), Some(&2));
    assert_eq!(stats.notes_by_type.get("blocker"), Some(&1));
    assert_eq!(stats.total_tags, 1);
}

#[test]
fn dashboard_lists_recently_worked() {
    let db = setup_db();
    let a = add_project(&db, "alpha");
    add_project(&db, "untouched");
    db.touch_project(a).expect("touch failed");

    let stats = db.dashboard_stats().expect("stats failed");
    assert_eq!(stats.recently_worked.len(), 1);
    assert_eq!(stats.recently_worked[0].id, a);
}

#[test]
fn heatmap_window_is_zero_filled() {
    let db = setup_db();

    let days = db.activity_heatmap(4).expect("heatmap failed");
    assert_eq!(days.len(), 28);
    assert!(days.iter().all(|d| d.count == 0));

    // creating a project counts as activity today
    add_project(&db, "alpha");
    let days = db.activity_heatmap(4).expect("heatmap failed");
    assert_eq!(days.last().expect("empty window").count, 1);
    assert_eq!(days.iter().map(|d| d.count).sum::<i64>(), 1);
}

#[test]
fn heatmap_weeks_are_clamped() {
    let db = setup_db();
    assert_eq!(db.activity_heatmap(100).expect("heatmap failed").len(), 52 * 7);
    assert_eq!(db.activity_heatmap(0).expect("heatmap failed").len(), 7);
}

#[test]
fn notes_and_projects_both_count_as_activity() {
    let db = setup_db();
    let a = add_project(&db, "alpha");
    db.create_note(a, NoteType::Log, "worked").expect("note failed");

    let days = db.activity_heatmap(1).expect("heatmap failed");
    assert_eq!(days.last().expect("empty window").count, 2);
}

#[test]
fn streaks_count_todays_activity() {
    let db = setup_db();

    let empty = db.streaks().expect("streaks failed");
    assert_eq!(empty.current, 0);
    assert_eq!(empty.longest, 0);
    assert_eq!(empty.active_days, 0);

    add_project(&db, "alpha");
    let streaks = db.streaks().expect("streaks failed");
    assert_eq!(streaks.current, 1);
    assert_eq!(streaks.longest, 1);
    assert_eq!(streaks.active_days, 1);
}
