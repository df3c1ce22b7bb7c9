//! Process startup around the schema runner: open the database, bring the
//! schema up to date once, and checkpoint the WAL on Ctrl-C.

use crate::evolution::{AssetSource, Catalog, DirectoryAssetSource, MigrationRunner, RunReport};
use crate::schema_catalog::bundled_avatars;
use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{error, info, warn};

/// Opens (creating if needed) the database with the pragmas every consumer
/// of it expects. This is the only fatal failure of a startup.
pub fn open_connection(db_path: &Path, busy_timeout: Duration) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {:?}", db_path))?;
    conn.busy_timeout(busy_timeout)
        .context("Failed to set busy timeout")?;
    conn.pragma_update(None, "journal_mode", "WAL")
        .context("Failed to enable WAL journal")?;
    conn.execute("PRAGMA foreign_keys = ON;", [])
        .context("Failed to enable foreign keys")?;
    Ok(conn)
}

/// Opens the database for a dry run without changing it. A database that does
/// not exist yet is planned against an empty in-memory one.
pub fn open_for_plan(db_path: &Path, busy_timeout: Duration) -> Result<Connection> {
    if !db_path.exists() {
        info!("{:?} does not exist yet, planning against an empty schema", db_path);
        return Connection::open_in_memory().context("Failed to open in-memory database");
    }
    let conn = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .with_context(|| format!("Failed to open database at {:?}", db_path))?;
    conn.busy_timeout(busy_timeout)
        .context("Failed to set busy timeout")?;
    Ok(conn)
}

/// Avatar images from `assets_dir` (`<name>.png`), or the compiled-in ones.
pub fn asset_source(assets_dir: Option<&Path>) -> Arc<dyn AssetSource> {
    match assets_dir {
        Some(dir) => {
            if !dir.is_dir() {
                warn!("Asset directory {:?} not found, avatar seeding will fail", dir);
            }
            Arc::new(DirectoryAssetSource::new(dir, "png"))
        }
        None => Arc::new(bundled_avatars()),
    }
}

/// Runs the whole catalog once. Never fails: step failures end up in the
/// report and the logs.
pub fn sync_schema(conn: &Connection, catalog: &Catalog, assets_dir: Option<&Path>) -> RunReport {
    info!("Checking database schema.");
    let report = MigrationRunner::new(asset_source(assets_dir)).apply(catalog, conn);
    info!("Done checking database schema.");
    report
}

static SHUTDOWN_HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

/// Checkpoints and truncates the WAL, then exits, on Ctrl-C. Only the first
/// call installs the handler.
pub fn install_shutdown_hook(conn: Arc<Mutex<Connection>>) -> Result<()> {
    if SHUTDOWN_HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    ctrlc::set_handler(move || {
        info!("Shutting down, checkpointing database...");
        match conn.lock() {
            Ok(conn) => {
                if let Err(err) = checkpoint(&conn) {
                    error!("Failed to checkpoint database: {}", err);
                }
            }
            Err(_) => error!("Database connection lock poisoned, skipping checkpoint"),
        }
        std::process::exit(130);
    })
    .context("Failed to install Ctrl-C handler")
}

pub fn checkpoint(conn: &Connection) -> rusqlite::Result<()> {
    conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_connection_sets_pragmas() {
        let dir = TempDir::new().unwrap();
        let conn = open_connection(&dir.path().join("test.db"), Duration::from_millis(750)).unwrap();

        let journal_mode: String = conn
            .query_row("PRAGMA journal_mode", [], |r| r.get(0))
            .unwrap();
        assert_eq!(journal_mode.to_lowercase(), "wal");
        let foreign_keys: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |r| r.get(0))
            .unwrap();
        assert_eq!(foreign_keys, 1);
        let busy_timeout: i64 = conn
            .query_row("PRAGMA busy_timeout", [], |r| r.get(0))
            .unwrap();
        assert_eq!(busy_timeout, 750);
    }

    #[test]
    fn test_open_connection_in_missing_directory_fails() {
        let result = open_connection(
            Path::new("/nonexistent/path/that/should/not/exist/test.db"),
            Duration::from_secs(1),
        );
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to open database"));
    }

    #[test]
    fn test_open_for_plan_does_not_create_the_file() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("missing.db");

        let conn = open_for_plan(&db_path, Duration::from_secs(1)).unwrap();

        let tables: i64 = conn
            .query_row("SELECT COUNT(*) FROM sqlite_master", [], |r| r.get(0))
            .unwrap();
        assert_eq!(tables, 0);
        assert!(!db_path.exists());
    }

    #[test]
    fn test_open_for_plan_leaves_existing_database_unchanged() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("test.db");
        Connection::open(&db_path)
            .unwrap()
            .execute_batch("CREATE TABLE t (id INTEGER)")
            .unwrap();

        let conn = open_for_plan(&db_path, Duration::from_secs(1)).unwrap();

        let journal_mode: String = conn
            .query_row("PRAGMA journal_mode", [], |r| r.get(0))
            .unwrap();
        assert_eq!(journal_mode.to_lowercase(), "delete");
        assert!(conn.execute_batch("INSERT INTO t VALUES (1)").is_err());
    }

    #[test]
    fn test_sync_without_assets_dir_uses_compiled_in_avatars() {
        let dir = TempDir::new().unwrap();
        let conn = open_connection(&dir.path().join("test.db"), Duration::from_secs(1)).unwrap();
        let catalog = crate::schema_catalog::schema_catalog(&Default::default()).unwrap();

        let report = sync_schema(&conn, &catalog, None);

        assert_eq!(report.failed(), 0);
        let avatars: i64 = conn
            .query_row("SELECT COUNT(*) FROM system_avatar", [], |r| r.get(0))
            .unwrap();
        assert_eq!(avatars, crate::schema_catalog::AVATARS.len() as i64);
    }

    #[test]
    fn test_checkpoint() {
        let dir = TempDir::new().unwrap();
        let conn = open_connection(&dir.path().join("test.db"), Duration::from_secs(1)).unwrap();
        conn.execute_batch("CREATE TABLE t (id INTEGER)").unwrap();
        checkpoint(&conn).unwrap();
    }
}
