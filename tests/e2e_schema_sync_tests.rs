//! End-to-end tests for a full catalog run against a database file

mod common;

use common::*;
use pezzottify_schema::bootstrap::sync_schema;
use pezzottify_schema::evolution::{MigrationRunner, SchemaIntrospector, StepOutcome};
use pezzottify_schema::schema_catalog::{AVATARS, AVATAR_MIME_TYPE};
use pezzottify_schema::RunState;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_fresh_database_gets_every_table() {
    let db = TestDb::new();
    let catalog = full_catalog();

    let report = run_catalog(&catalog, &db.conn);

    assert_eq!(report.state, RunState::Completed);
    assert_eq!(report.applied(), catalog.len());
    let introspector = SchemaIntrospector::new(&db.conn);
    for table in CORE_TABLES {
        assert!(introspector.table_exists(table).unwrap(), "missing {}", table);
    }
    for step in catalog.iter() {
        if let Some(table) = step.id().strip_prefix("table:") {
            assert!(introspector.table_exists(table).unwrap(), "missing {}", table);
        }
    }
    assert!(introspector
        .column_exists("user_settings", "show_side_bar")
        .unwrap());
    assert!(introspector.column_exists("artist", "folder_id").unwrap());
    assert!(introspector
        .index_exists("podcast_episode", "idx_podcast_episode_url")
        .unwrap());
}

#[test]
fn test_fresh_database_seeds_admin_and_folder() {
    let db = TestDb::new();
    run_catalog(&full_catalog(), &db.conn);

    let password: String = db
        .conn
        .query_row(
            "SELECT password FROM user WHERE username = ?1",
            [ADMIN_USER],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(password, ADMIN_PASS);

    assert_eq!(db.count("SELECT COUNT(*) FROM role"), ROLE_COUNT);
    assert_eq!(
        db.count("SELECT COUNT(*) FROM user_role WHERE username = 'admin'"),
        ROLE_COUNT
    );

    let path: String = db
        .conn
        .query_row("SELECT path FROM music_folder", [], |r| r.get(0))
        .unwrap();
    assert_eq!(path, MUSIC_FOLDER);
    assert_eq!(db.count("SELECT COUNT(*) FROM music_folder_user"), 1);
    assert_eq!(db.count("SELECT COUNT(*) FROM version"), 1);
}

#[test]
fn test_fresh_database_seeds_every_avatar() {
    let db = TestDb::new();
    run_catalog(&full_catalog(), &db.conn);

    assert_eq!(
        db.count("SELECT COUNT(*) FROM system_avatar"),
        AVATARS.len() as i64
    );
    assert_eq!(
        db.count("SELECT COUNT(DISTINCT name) FROM system_avatar"),
        AVATARS.len() as i64
    );
    let mime_type: String = db
        .conn
        .query_row(
            "SELECT mime_type FROM system_avatar WHERE name = 'Formal'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(mime_type, AVATAR_MIME_TYPE);
}

#[test]
fn test_fresh_database_seeds_transcodings() {
    let db = TestDb::new();
    run_catalog(&full_catalog(), &db.conn);

    assert_eq!(db.count("SELECT COUNT(*) FROM transcoding"), 9);
    assert_eq!(
        db.count("SELECT COUNT(*) FROM transcoding WHERE name = 'mkv > flv'"),
        1
    );
    assert_eq!(db.count("SELECT COUNT(*) FROM transcoding2"), 3);
    let step1: String = db
        .conn
        .query_row(
            "SELECT step1 FROM transcoding2 WHERE name = 'mp3 audio'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert!(step1.contains("-map 0:0"));
}

#[test]
fn test_second_run_changes_nothing() {
    let db = TestDb::new();
    let catalog = full_catalog();
    run_catalog(&catalog, &db.conn);
    let before = SchemaIntrospector::new(&db.conn).snapshot().unwrap();

    let report = run_catalog(&catalog, &db.conn);

    assert_eq!(report.state, RunState::Completed);
    assert_eq!(report.applied(), 0);
    assert_eq!(report.skipped(), catalog.len());
    let after = SchemaIntrospector::new(&db.conn).snapshot().unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_roles_are_not_granted_twice() {
    let db = TestDb::new();
    let catalog = full_catalog();
    run_catalog(&catalog, &db.conn);
    run_catalog(&catalog, &db.conn);
    run_catalog(&catalog, &db.conn);

    assert_eq!(db.count("SELECT COUNT(*) FROM role"), ROLE_COUNT);
    assert_eq!(db.count("SELECT COUNT(*) FROM user_role"), ROLE_COUNT);
}

#[test]
fn test_dry_run_leaves_database_untouched() {
    let db = TestDb::new();
    let catalog = full_catalog();

    let report = MigrationRunner::new(Arc::new(avatar_assets())).plan(&catalog, &db.conn);

    assert_eq!(report.outcome_of("table:version"), Some(&StepOutcome::Pending));
    assert_eq!(report.outcome_of("table:artist"), Some(&StepOutcome::Pending));
    assert_eq!(report.applied(), 0);
    let snapshot = SchemaIntrospector::new(&db.conn).snapshot().unwrap();
    assert!(snapshot.objects.is_empty());
}

#[test]
fn test_dry_run_after_sync_reports_everything_up_to_date() {
    let db = TestDb::new();
    let catalog = full_catalog();
    run_catalog(&catalog, &db.conn);

    let report = MigrationRunner::new(Arc::new(avatar_assets())).plan(&catalog, &db.conn);

    assert_eq!(report.state, RunState::Completed);
    assert_eq!(report.skipped(), catalog.len());
}

#[test]
fn test_sync_without_assets_dir_seeds_compiled_in_avatars() {
    let db = TestDb::new();
    let catalog = full_catalog();

    let report = sync_schema(&db.conn, &catalog, None);

    assert_eq!(report.state, RunState::Completed, "{:?}", report.failures().collect::<Vec<_>>());
    assert_eq!(
        db.count("SELECT COUNT(*) FROM system_avatar"),
        AVATARS.len() as i64
    );
}

#[test]
fn test_sync_with_assets_dir_reads_images_from_it() {
    let db = TestDb::new();
    let assets = TempDir::new().unwrap();
    for name in &AVATARS[..2] {
        std::fs::write(
            assets.path().join(format!("{}.png", name)),
            std::fs::read(Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/avatars/Formal.png"))
                .unwrap(),
        )
        .unwrap();
    }

    let report = sync_schema(&db.conn, &full_catalog(), Some(assets.path()));

    assert_eq!(report.state, RunState::PartiallyFailed);
    assert_eq!(report.failed(), AVATARS.len() - 2);
    assert_eq!(db.count("SELECT COUNT(*) FROM system_avatar"), 2);
}

#[test]
fn test_report_serializes_to_json() {
    let db = TestDb::new();
    let catalog = full_catalog().up_to("table:user").unwrap();

    let report = run_catalog(&catalog, &db.conn);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["state"], "completed");
    assert_eq!(json["steps"].as_array().unwrap().len(), 3);
    assert_eq!(json["steps"][2]["id"], "table:user");
    assert_eq!(json["steps"][2]["outcome"], "applied");
}
