//! Config - Persisted tool settings under a config folder.
//!
//! The file is `meta_inspect.yaml` inside the config folder:
//!
//! ```yaml
//! WorkspacePath: /home/me/mi_workspace
//! BasePath: by-dev/meta
//! SchemaVersion: "2.2"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::SchemaVersion;

pub const CONFIG_FILE_NAME: &str = "meta_inspect.yaml";
pub const DEFAULT_BASE_PATH: &str = "by-dev/meta";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config path does not exist: {}", .0.display())]
    ConfigPathNotExist(PathBuf),
    #[error("config path is a file: {}", .0.display())]
    ConfigPathIsFile(PathBuf),
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    /// Folder holding the config file; not persisted.
    #[serde(skip)]
    pub config_path: PathBuf,
    #[serde(default = "default_workspace_path")]
    pub workspace_path: PathBuf,
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default)]
    pub schema_version: SchemaVersion,
}

fn default_base_path() -> String {
    DEFAULT_BASE_PATH.to_string()
}

/// `$HOME/mi_workspace`, or `mi_workspace` when no home is known.
pub fn default_workspace_path() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home).join("mi_workspace"),
        _ => PathBuf::from("mi_workspace"),
    }
}

pub fn default_config_path() -> PathBuf {
    default_workspace_path().join(".mi_config")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: default_config_path(),
            workspace_path: default_workspace_path(),
            base_path: default_base_path(),
            schema_version: SchemaVersion::default(),
        }
    }
}

impl Config {
    /// Load the config file from an existing config folder.
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config_path = config_path.as_ref();
        check_config_path(config_path)?;

        let bytes = fs::read(config_path.join(CONFIG_FILE_NAME))?;
        let mut config: Config = serde_yaml::from_slice(&bytes)?;
        config.config_path = config_path.to_path_buf();
        Ok(config)
    }

    /// Load the config, writing a default one first if the folder is missing.
    /// The workspace folder is created on a best-effort basis.
    pub fn load_or_create(config_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_or_create_from(config_path, Config::default())
    }

    /// Like [`Config::load_or_create`], writing `defaults` when nothing exists yet.
    pub fn load_or_create_from(
        config_path: impl AsRef<Path>,
        defaults: Config,
    ) -> Result<Self, ConfigError> {
        let config_path = config_path.as_ref();
        let config = match Self::load(config_path) {
            Ok(config) => config,
            Err(ConfigError::ConfigPathNotExist(_)) => {
                debug!(path = %config_path.display(), "creating default config");
                let config = Config {
                    config_path: config_path.to_path_buf(),
                    ..defaults
                };
                config.save()?;
                config
            }
            Err(err) => return Err(err),
        };

        config.setup_workspace();
        Ok(config)
    }

    pub fn file_path(&self) -> PathBuf {
        self.config_path.join(CONFIG_FILE_NAME)
    }

    /// Write the config file, creating the folder if needed.
    pub fn save(&self) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.config_path)?;
        let yaml = serde_yaml::to_string(self)?;
        fs::write(self.file_path(), yaml)?;
        Ok(())
    }

    fn setup_workspace(&self) {
        if let Err(err) = fs::create_dir_all(&self.workspace_path) {
            warn!(
                path = %self.workspace_path.display(),
                error = %err,
                "failed to set up workspace folder"
            );
        }
    }
}

fn check_config_path(path: &Path) -> Result<(), ConfigError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ConfigError::ConfigPathIsFile(path.to_path_buf())),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(ConfigError::ConfigPathNotExist(path.to_path_buf()))
        }
        Err(err) => Err(err.into()),
    }
}
