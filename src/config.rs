use anyhow::{Context, Result};
use std::path::PathBuf;

/// Name used for the configuration directory and the default backup folder
pub const APP_NAME: &str = "trello-backup";

/// Cross-platform configuration directory manager
pub struct ConfigManager;

impl ConfigManager {
    /// Get the main configuration directory path following platform conventions:
    /// - Linux: $XDG_CONFIG_HOME/trello-backup or ~/.config/trello-backup
    /// - macOS: ~/Library/Application Support/trello-backup
    /// - Windows: %APPDATA%\trello-backup
    pub fn config_dir() -> Result<PathBuf> {
        #[cfg(target_os = "linux")]
        {
            if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
                Ok(PathBuf::from(xdg_config).join(APP_NAME))
            } else {
                let home = dirs::home_dir().context("Failed to get home directory")?;
                Ok(home.join(".config").join(APP_NAME))
            }
        }

        #[cfg(target_os = "macos")]
        {
            let home = dirs::home_dir().context("Failed to get home directory")?;
            Ok(home.join("Library").join("Application Support").join(APP_NAME))
        }

        #[cfg(target_os = "windows")]
        {
            Ok(dirs::config_dir()
                .context("Failed to get Windows config directory")?
                .join(APP_NAME))
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
        {
            let home = dirs::home_dir().context("Failed to get home directory")?;
            Ok(home.join(format!(".{APP_NAME}")))
        }
    }

    /// Get the settings file path (settings.toml)
    pub fn settings_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("settings.toml"))
    }

    /// Get the log file path
    pub fn log_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(format!("{APP_NAME}.log")))
    }

    /// Default backup destination: `<cwd>/trello-backup`
    pub fn default_backup_dir() -> Result<PathBuf> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(cwd.join(APP_NAME))
    }

    /// Ensure the configuration directory exists
    pub fn ensure_config_dir() -> Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir).with_context(|| {
            format!("Failed to create config directory: {}", config_dir.display())
        })?;
        Ok(config_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_config_paths() {
        let config_dir = ConfigManager::config_dir().unwrap();
        assert!(config_dir.to_string_lossy().contains("trello-backup"));

        let settings = ConfigManager::settings_file_path().unwrap();
        assert!(settings.ends_with("trello-backup/settings.toml"));

        let log = ConfigManager::log_file_path().unwrap();
        assert!(log.ends_with("trello-backup/trello-backup.log"));
    }

    #[test]
    fn test_default_backup_dir_is_under_cwd() {
        let dir = ConfigManager::default_backup_dir().unwrap();
        assert_eq!(dir, std::env::current_dir().unwrap().join("trello-backup"));
    }

    #[test]
    #[serial]
    #[cfg(target_os = "linux")]
    fn test_xdg_config_home_respected() {
        let temp = tempfile::TempDir::new().unwrap();
        std::env::set_var("XDG_CONFIG_HOME", temp.path());

        let config_dir = ConfigManager::config_dir().unwrap();
        assert_eq!(config_dir, temp.path().join("trello-backup"));

        let ensured = ConfigManager::ensure_config_dir().unwrap();
        assert!(ensured.is_dir());

        std::env::remove_var("XDG_CONFIG_HOME");
    }
}
