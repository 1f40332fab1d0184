use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ConfigManager;
use crate::trello::DEFAULT_API_BASE_URL;

/// Optional settings file, used when a value is not given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Destination root for backups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_to: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub api_token: Option<String>,
    pub save_to: Option<PathBuf>,
}

/// Everything a backup run needs, fully resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupConfig {
    pub api_key: String,
    pub api_token: String,
    pub save_to: PathBuf,
    pub api_base_url: String,
}

impl Settings {
    /// Load settings from the config directory, defaults if the file is absent
    pub fn load() -> Result<Self> {
        Self::load_from(&ConfigManager::settings_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Merge with command line values and fill in defaults
    ///
    /// Command line wins over the settings file. An empty key or token is
    /// treated as missing.
    pub fn resolve(self, overrides: Overrides, default_save_to: PathBuf) -> Result<BackupConfig> {
        let api_key = pick(overrides.api_key, self.api_key);
        let api_token = pick(overrides.api_token, self.api_token);

        let Some(api_key) = api_key else {
            bail!("Missing Trello API key. Pass --trello-api-key or set TRELLO_API_KEY.");
        };
        let Some(api_token) = api_token else {
            bail!("Missing Trello API token. Pass --trello-api-token or set TRELLO_API_TOKEN.");
        };

        Ok(BackupConfig {
            api_key,
            api_token,
            save_to: overrides.save_to.or(self.save_to).unwrap_or(default_save_to),
            api_base_url: self
                .api_base_url
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        })
    }
}

fn pick(primary: Option<String>, fallback: Option<String>) -> Option<String> {
    primary
        .filter(|v| !v.trim().is_empty())
        .or_else(|| fallback.filter(|v| !v.trim().is_empty()))
}
