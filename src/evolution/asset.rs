//! Seeding of named binary assets (bundled avatar images).
//!
//! Each seed is its own step: the guard looks the name up, the action loads
//! the payload and inserts one row. A missing payload fails that seed only.

use super::errors::{AssetLoadError, IntrospectionError, StepError};
use super::introspector::SchemaIntrospector;
use super::step::StepContext;
use chrono::{SecondsFormat, Utc};
use rusqlite::types::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Provides asset payloads by name.
pub trait AssetSource: Send + Sync {
    fn load(&self, name: &str) -> Result<Vec<u8>, AssetLoadError>;
}

/// Reads `<dir>/<name>.<extension>`.
#[derive(Debug, Clone)]
pub struct DirectoryAssetSource {
    dir: PathBuf,
    extension: String,
}

impl DirectoryAssetSource {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, self.extension))
    }
}

impl AssetSource for DirectoryAssetSource {
    fn load(&self, name: &str) -> Result<Vec<u8>, AssetLoadError> {
        let path = self.path_for(name);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AssetLoadError::Missing {
                name: name.to_string(),
                location: self.dir.display().to_string(),
            }),
            Err(source) => Err(AssetLoadError::Io {
                name: name.to_string(),
                source,
            }),
        }
    }
}

/// In-memory payloads.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetSource {
    assets: HashMap<String, Vec<u8>>,
}

impl MemoryAssetSource {
    pub fn with(mut self, name: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        self.insert(name, payload);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, payload: impl Into<Vec<u8>>) {
        self.assets.insert(name.into(), payload.into());
    }
}

impl AssetSource for MemoryAssetSource {
    fn load(&self, name: &str) -> Result<Vec<u8>, AssetLoadError> {
        self.assets
            .get(name)
            .cloned()
            .ok_or_else(|| AssetLoadError::Missing {
                name: name.to_string(),
                location: "memory".to_string(),
            })
    }
}

/// Payloads compiled into the binary, looked up by name.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedAssetSource {
    assets: &'static [(&'static str, &'static [u8])],
}

impl EmbeddedAssetSource {
    pub const fn new(assets: &'static [(&'static str, &'static [u8])]) -> Self {
        Self { assets }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.assets.iter().map(|(name, _)| *name)
    }
}

impl AssetSource for EmbeddedAssetSource {
    fn load(&self, name: &str) -> Result<Vec<u8>, AssetLoadError> {
        self.assets
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, payload)| payload.to_vec())
            .ok_or_else(|| AssetLoadError::Missing {
                name: name.to_string(),
                location: "binary".to_string(),
            })
    }
}

/// One named asset to store in `table`, which must have the columns
/// `name, created_date, mime_type, width, height, data`.
#[derive(Debug, Clone)]
pub struct AssetSeed {
    id: String,
    pub table: &'static str,
    pub name: &'static str,
    pub mime_type: &'static str,
    pub width: u32,
    pub height: u32,
}

impl AssetSeed {
    pub fn new(
        table: &'static str,
        name: &'static str,
        mime_type: &'static str,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            id: format!("asset:{}.{}", table, name),
            table,
            name,
            mime_type,
            width,
            height,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_seeded(&self, introspector: &SchemaIntrospector<'_>) -> Result<bool, IntrospectionError> {
        introspector.row_exists("name = ?1", self.table, &[Value::Text(self.name.to_string())])
    }

    /// Loads and checks the payload, then inserts the row.
    pub fn seed(&self, ctx: &StepContext<'_>) -> Result<(), StepError> {
        let payload = ctx.assets.load(self.name)?;
        self.check_mime_type(&payload)?;
        debug!("Seeding {} ({} bytes)", self.id, payload.len());

        let sql = format!(
            "INSERT INTO {} (name, created_date, mime_type, width, height, data) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            self.table
        );
        ctx.executor().update(
            &sql,
            &[
                Value::Text(self.name.to_string()),
                Value::Text(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
                Value::Text(self.mime_type.to_string()),
                Value::Integer(i64::from(self.width)),
                Value::Integer(i64::from(self.height)),
                Value::Blob(payload),
            ],
        )?;
        Ok(())
    }

    fn check_mime_type(&self, payload: &[u8]) -> Result<(), AssetLoadError> {
        let actual = infer::get(payload)
            .map(|kind| kind.mime_type())
            .unwrap_or("unknown data");
        if actual != self.mime_type {
            return Err(AssetLoadError::MimeMismatch {
                name: self.name.to_string(),
                expected: self.mime_type.to_string(),
                actual: actual.to_string(),
            });
        }
        Ok(())
    }
}
