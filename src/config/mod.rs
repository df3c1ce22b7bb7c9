mod file_config;

pub use file_config::{AdminConfig, FileConfig};

use crate::schema_catalog::CatalogSettings;
use anyhow::{bail, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub db_path: Option<PathBuf>,
    pub assets_dir: Option<PathBuf>,
    pub default_music_folder: Option<String>,
    pub busy_timeout_ms: u64,
    pub strict: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            assets_dir: None,
            default_music_folder: None,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            strict: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    /// Where avatar images are read from. `None` uses the ones compiled in.
    pub assets_dir: Option<PathBuf>,
    pub busy_timeout: Duration,
    /// Exit with an error when some step failed.
    pub strict: bool,
    pub catalog: CatalogSettings,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .or_else(|| cli.db_path.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("db_path must be specified via --db-path or in config file")
            })?;

        if db_path.is_dir() {
            bail!("db_path is a directory: {:?}", db_path);
        }
        // The file itself is created on first open, its directory is not
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                bail!("Database directory does not exist: {:?}", parent);
            }
        }

        let assets_dir = file
            .assets_dir
            .map(PathBuf::from)
            .or_else(|| cli.assets_dir.clone());

        let busy_timeout_ms = file.busy_timeout_ms.unwrap_or(cli.busy_timeout_ms);
        let strict = file.strict.unwrap_or(cli.strict);

        let mut catalog = CatalogSettings::default();
        if let Some(folder) = file
            .default_music_folder
            .or_else(|| cli.default_music_folder.clone())
        {
            catalog.default_music_folder = folder;
        }
        let admin = file.admin.unwrap_or_default();
        if let Some(username) = admin.username {
            if username.trim().is_empty() {
                bail!("admin.username must not be empty");
            }
            catalog.admin_username = username;
        }
        if let Some(password) = admin.password {
            catalog.admin_password = password;
        }

        Ok(Self {
            db_path,
            assets_dir,
            busy_timeout: Duration::from_millis(busy_timeout_ms),
            strict,
            catalog,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_temp_db_dir() -> TempDir {
        TempDir::new().unwrap()
    }

    #[test]
    fn test_resolve_cli_only() {
        let temp_dir = make_temp_db_dir();
        let cli = CliConfig {
            db_path: Some(temp_dir.path().join("libresonic.db")),
            assets_dir: Some(PathBuf::from("/assets")),
            default_music_folder: Some("/cli/music".to_string()),
            busy_timeout_ms: 1500,
            strict: true,
        };

        let config = AppConfig::resolve(&cli, None).unwrap();

        assert_eq!(config.db_path, temp_dir.path().join("libresonic.db"));
        assert_eq!(config.assets_dir, Some(PathBuf::from("/assets")));
        assert_eq!(config.busy_timeout, Duration::from_millis(1500));
        assert!(config.strict);
        assert_eq!(config.catalog.default_music_folder, "/cli/music");
        assert_eq!(config.catalog.admin_username, "admin");
        assert_eq!(config.catalog.admin_password, "admin");
    }

    #[test]
    fn test_resolve_toml_overrides_cli() {
        let temp_dir = make_temp_db_dir();
        let cli = CliConfig {
            db_path: Some(PathBuf::from("/should/be/overridden.db")),
            default_music_folder: Some("/cli/music".to_string()),
            busy_timeout_ms: 1500,
            ..Default::default()
        };

        let file_config = FileConfig {
            db_path: Some(
                temp_dir
                    .path()
                    .join("libresonic.db")
                    .to_string_lossy()
                    .to_string(),
            ),
            default_music_folder: Some("/toml/music".to_string()),
            strict: Some(true),
            admin: Some(AdminConfig {
                username: Some("root".to_string()),
                password: Some("hunter2".to_string()),
            }),
            ..Default::default()
        };

        let config = AppConfig::resolve(&cli, Some(file_config)).unwrap();

        // TOML values should override CLI
        assert_eq!(config.db_path, temp_dir.path().join("libresonic.db"));
        assert_eq!(config.catalog.default_music_folder, "/toml/music");
        assert!(config.strict);
        assert_eq!(config.catalog.admin_username, "root");
        assert_eq!(config.catalog.admin_password, "hunter2");
        // CLI value used when TOML doesn't specify
        assert_eq!(config.busy_timeout, Duration::from_millis(1500));
        assert_eq!(config.assets_dir, None);
    }

    #[test]
    fn test_resolve_missing_db_path_error() {
        let cli = CliConfig::default();
        let result = AppConfig::resolve(&cli, None);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("db_path must be specified"));
    }

    #[test]
    fn test_resolve_nonexistent_db_dir_error() {
        let cli = CliConfig {
            db_path: Some(PathBuf::from("/nonexistent/path/that/should/not/exist/x.db")),
            ..Default::default()
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    #[test]
    fn test_resolve_db_path_is_directory_error() {
        let temp_dir = make_temp_db_dir();
        let cli = CliConfig {
            db_path: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("is a directory"));
    }

    #[test]
    fn test_resolve_empty_admin_username_error() {
        let temp_dir = make_temp_db_dir();
        let cli = CliConfig {
            db_path: Some(temp_dir.path().join("libresonic.db")),
            ..Default::default()
        };
        let file_config = FileConfig {
            admin: Some(AdminConfig {
                username: Some("  ".to_string()),
                password: None,
            }),
            ..Default::default()
        };
        let result = AppConfig::resolve(&cli, Some(file_config));
        assert!(result.unwrap_err().to_string().contains("admin.username"));
    }

    #[test]
    fn test_resolve_defaults() {
        let temp_dir = make_temp_db_dir();
        let cli = CliConfig {
            db_path: Some(temp_dir.path().join("libresonic.db")),
            ..Default::default()
        };

        let config = AppConfig::resolve(&cli, None).unwrap();
        assert_eq!(
            config.busy_timeout,
            Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS)
        );
        assert!(!config.strict);
        assert_eq!(
            config.catalog.default_music_folder,
            CatalogSettings::default_music_folder()
        );
    }
}
