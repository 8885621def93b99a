use crate::{MigrateError, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// External tools used to run pipelines.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Shell that interprets each pipeline
    pub shell: PathBuf,

    /// Shell function or script sourced to load repository credentials
    pub env_loader: String,

    /// Variable the access key is exported under
    pub access_key_var: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            shell: PathBuf::from("/bin/bash"),
            env_loader: "env-load".to_string(),
            access_key_var: "RESTIC_PASSWORD".to_string(),
        }
    }
}

impl ToolsConfig {
    /// Default location: `<config dir>/pve-migrate/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "pve-migrate").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load from an explicit path, or from the default path if it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(MigrateError::ConfigNotFound(path.display().to_string()));
                }
                Self::from_file(path)
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ToolsConfig = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded tools config");
        Ok(config)
    }
}
