use super::constants::*;
use pezzottify_schema::bootstrap::open_connection;
use pezzottify_schema::evolution::{Catalog, MemoryAssetSource, MigrationRunner, RunReport};
use pezzottify_schema::schema_catalog::{schema_catalog, CatalogSettings, AVATARS};
use rusqlite::Connection;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Real 48x48 PNG shipped with the crate, used for every avatar in memory.
const AVATAR_PNG: &[u8] = include_bytes!("../../assets/avatars/Formal.png");

/// A database file in its own temporary directory, opened the way the binary
/// opens it.
pub struct TestDb {
    _dir: TempDir,
    pub path: PathBuf,
    pub conn: Connection,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("libresonic.db");
        let conn = open_connection(&path, Duration::from_secs(5))
            .expect("Failed to open test database");
        Self {
            _dir: dir,
            path,
            conn,
        }
    }

    pub fn count(&self, sql: &str) -> i64 {
        self.conn
            .query_row(sql, [], |row| row.get(0))
            .unwrap_or_else(|e| panic!("Query failed: {}: {}", sql, e))
    }
}

pub fn test_settings() -> CatalogSettings {
    CatalogSettings {
        default_music_folder: MUSIC_FOLDER.to_string(),
        admin_username: ADMIN_USER.to_string(),
        admin_password: ADMIN_PASS.to_string(),
    }
}

pub fn full_catalog() -> Catalog {
    schema_catalog(&test_settings()).expect("Catalog ids must be unique")
}

pub fn avatar_assets() -> MemoryAssetSource {
    let mut assets = MemoryAssetSource::default();
    for name in AVATARS {
        assets.insert(*name, AVATAR_PNG);
    }
    assets
}

pub fn run_catalog(catalog: &Catalog, conn: &Connection) -> RunReport {
    run_catalog_with(avatar_assets(), catalog, conn)
}

pub fn run_catalog_with(
    assets: MemoryAssetSource,
    catalog: &Catalog,
    conn: &Connection,
) -> RunReport {
    MigrationRunner::new(Arc::new(assets)).apply(catalog, conn)
}

/// Column names of every table plus index names, in declaration order.
/// Unlike a snapshot it ignores how a table's DDL text was built up.
pub fn schema_shape(conn: &Connection) -> BTreeMap<String, Vec<String>> {
    let mut stmt = conn
        .prepare(
            "SELECT m.name, p.name FROM sqlite_master m, pragma_table_info(m.name) p
             WHERE m.type = 'table' AND m.name NOT LIKE 'sqlite_%' ORDER BY m.name, p.cid",
        )
        .unwrap();
    let mut shape: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
        .unwrap();
    for row in rows {
        let (table, column) = row.unwrap();
        shape.entry(table).or_default().push(column);
    }

    let mut stmt = conn
        .prepare(
            "SELECT name FROM sqlite_master WHERE type = 'index' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .unwrap();
    let indices = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    shape.insert("<indices>".to_string(), indices);
    shape
}
