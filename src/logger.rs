use anyhow::{Context, Result};
use log::LevelFilter;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::config::ConfigManager;

/// Rotate the log file once it grows past this size
const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024;

/// Initialize console logging
///
/// `debug` forces the `Debug` level. Otherwise `RUST_LOG` is honoured and
/// `Info` is the default:
///
/// ```bash
/// # Only errors on the console
/// RUST_LOG=error trello-backup full-backup
///
/// # Same as --debug
/// RUST_LOG=debug trello-backup full-backup
/// ```
pub fn init_logger(debug: bool) {
    let level = console_level(debug, std::env::var("RUST_LOG").ok().as_deref());

    env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{:5}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(level)
        .target(env_logger::Target::Stdout)
        .try_init()
        .ok(); // Ignore error if logger is already initialized
}

fn console_level(debug: bool, rust_log: Option<&str>) -> LevelFilter {
    if debug {
        return LevelFilter::Debug;
    }
    rust_log
        .and_then(|s| s.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Append a line to the log file in the config directory
pub fn log_to_file(message: &str) -> Result<()> {
    ConfigManager::ensure_config_dir()?;
    append_line(&ConfigManager::log_file_path()?, message)
}

fn append_line(log_path: &Path, message: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    writeln!(
        file,
        "[{}] {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        message
    )?;

    Ok(())
}

/// Rotate the log file if it exceeds 10MB
pub fn rotate_log_if_needed() -> Result<()> {
    rotate(&ConfigManager::log_file_path()?)
}

fn rotate(log_path: &Path) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    if std::fs::metadata(log_path)?.len() > MAX_LOG_SIZE {
        let old_log_path = log_path.with_extension("log.old");

        if old_log_path.exists() {
            std::fs::remove_file(&old_log_path)?;
        }
        std::fs::rename(log_path, &old_log_path)?;

        log::info!("Log file rotated to {}", old_log_path.display());
    }

    Ok(())
}
