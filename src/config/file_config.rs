use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Database settings (can override CLI)
    pub db_path: Option<String>,
    pub busy_timeout_ms: Option<u64>,
    pub strict: Option<bool>,

    // Seeded content
    pub assets_dir: Option<String>,
    pub default_music_folder: Option<String>,
    pub admin: Option<AdminConfig>,
}

/// Credentials of the account created together with the `user` table.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct AdminConfig {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
