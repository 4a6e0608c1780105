//! Layered configuration
//!
//! Values are resolved from, in increasing precedence:
//! 1. Built-in defaults
//! 2. A YAML or TOML file, either passed with `--config` or found in the
//!    platform config directory as `helpdesk.yaml`
//! 3. `HELPDESK__SECTION__KEY` environment variables, e.g.
//!    `HELPDESK__STORAGE__DATA_DIR=/srv/helpdesk`

use crate::error::{HelpdeskError, Result};
use config::{Environment, File, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix for configuration environment variables
pub const ENV_PREFIX: &str = "HELPDESK";

const CONFIG_FILE_NAME: &str = "helpdesk.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the document and backup files
    pub data_dir: PathBuf,
    pub file_name: String,
    pub backup_file: String,
    /// Number of snapshots kept in the backup ring
    pub backup_retention: usize,
    /// Seed demo users and tickets into a fresh store
    pub sample_data: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                data_dir: default_data_dir(),
                file_name: "helpdesk.json".to_string(),
                backup_file: "backups.json".to_string(),
                backup_retention: 5,
                sample_data: false,
            },
            log: LogConfig {
                level: "warn".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from defaults, file and process environment
    ///
    /// An explicit `path` must exist; the default config file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Load with an explicit environment map instead of the process environment
    pub fn load_with_env(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<Self> {
        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default(
                "storage.data_dir",
                defaults.storage.data_dir.to_string_lossy().into_owned(),
            )?
            .set_default("storage.file_name", defaults.storage.file_name)?
            .set_default("storage.backup_file", defaults.storage.backup_file)?
            .set_default(
                "storage.backup_retention",
                u64::try_from(defaults.storage.backup_retention).unwrap_or(5),
            )?
            .set_default("storage.sample_data", defaults.storage.sample_data)?
            .set_default("log.level", defaults.log.level)?;

        builder = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(HelpdeskError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                builder.add_source(File::from(path))
            },
            None => match default_config_path() {
                Some(path) => builder.add_source(File::from(path).required(false)),
                None => builder,
            },
        };

        let config: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .source(env),
            )
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.storage.file_name.trim().is_empty() {
            return Err(HelpdeskError::Config(
                "storage.file_name must not be empty".to_string(),
            ));
        }
        if self.storage.backup_retention == 0 {
            return Err(HelpdeskError::Config(
                "storage.backup_retention must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Full path of the persisted document
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.storage.data_dir.join(&self.storage.file_name)
    }

    /// Full path of the backup ring file
    #[must_use]
    pub fn backup_path(&self) -> PathBuf {
        self.storage.data_dir.join(&self.storage.backup_file)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("edu", "campus", "campus-helpdesk")
}

fn default_data_dir() -> PathBuf {
    project_dirs().map_or_else(|| PathBuf::from(".helpdesk"), |dirs| dirs.data_dir().to_path_buf())
}

/// Platform location of the optional config file
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let missing = temp_dir.path().join("absent");
        let config = Config::load_with_env(None, env(&[])).expect("Failed to load config");

        assert_eq!(config.storage.file_name, "helpdesk.json");
        assert_eq!(config.storage.backup_retention, 5);
        assert!(!config.storage.sample_data);
        assert!(config.data_path().ends_with("helpdesk.json"));
        assert!(Config::load_with_env(Some(&missing), env(&[])).is_err());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("helpdesk.yaml");
        std::fs::write(
            &path,
            "storage:\n  data_dir: /srv/helpdesk\n  backup_retention: 3\nlog:\n  level: debug\n",
        )
        .expect("Failed to write config");

        let config = Config::load_with_env(Some(&path), env(&[])).expect("Failed to load config");
        assert_eq!(config.storage.data_dir, PathBuf::from("/srv/helpdesk"));
        assert_eq!(config.storage.backup_retention, 3);
        assert_eq!(config.storage.file_name, "helpdesk.json");
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.backup_path(), PathBuf::from("/srv/helpdesk/backups.json"));
    }

    #[test]
    fn test_environment_overrides_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("helpdesk.yaml");
        std::fs::write(&path, "storage:\n  data_dir: /srv/helpdesk\n").expect("Failed to write");

        let config = Config::load_with_env(
            Some(&path),
            env(&[
                ("HELPDESK__STORAGE__DATA_DIR", "/tmp/desk"),
                ("HELPDESK__STORAGE__SAMPLE_DATA", "true"),
            ]),
        )
        .expect("Failed to load config");
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/desk"));
        assert!(config.storage.sample_data);
    }

    #[test]
    fn test_zero_retention_is_rejected() {
        let err = Config::load_with_env(None, env(&[("HELPDESK__STORAGE__BACKUP_RETENTION", "0")]))
            .unwrap_err();
        assert!(err.is_config_error());
    }
}
